//! Standalone SVG rendering of projected regions.

use std::collections::BTreeMap;

use poll_map_geography_models::{CanvasSize, GeoFeature, ProjectedFeature};

/// How a region should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStyle {
    /// The hovered, focused, or selected region.
    Active,
    /// A region with at least one poll observation.
    WithData,
    /// A region without poll observations.
    NoData,
}

impl RegionStyle {
    /// Fill color.
    #[must_use]
    pub const fn fill(self) -> &'static str {
        match self {
            Self::Active => "#22d3ee",
            Self::WithData => "#cffafe",
            Self::NoData => "#dbe4ee",
        }
    }

    /// Stroke color.
    #[must_use]
    pub const fn stroke(self) -> &'static str {
        match self {
            Self::Active => "#0f172a",
            Self::WithData | Self::NoData => "#55657a",
        }
    }

    /// Stroke width.
    #[must_use]
    pub const fn stroke_width(self) -> f64 {
        match self {
            Self::Active => 2.6,
            Self::WithData | Self::NoData => 1.4,
        }
    }
}

/// Renders every projected feature as one `<path>`, in feature order.
///
/// Features missing from `projected` are skipped.
#[must_use]
pub fn render_svg(
    features: &[GeoFeature],
    projected: &BTreeMap<String, ProjectedFeature>,
    canvas: CanvasSize,
    style: impl Fn(&GeoFeature) -> RegionStyle,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" role=\"img\">\n",
        canvas.width, canvas.height
    ));

    for feature in features {
        let Some(shape) = projected.get(&feature.region_code) else {
            continue;
        };
        let style = style(feature);
        out.push_str(&format!(
            "  <path data-region-code=\"{}\" aria-label=\"{}\" d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            escape_attr(&feature.region_code),
            escape_attr(&feature.region_name),
            shape.path,
            style.fill(),
            style.stroke(),
            style.stroke_width(),
        ));
    }

    out.push_str("</svg>\n");
    out
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use poll_map_geography_models::Geometry;

    use super::*;
    use crate::project;

    #[test]
    fn renders_one_path_per_feature_with_style() {
        let features = vec![
            GeoFeature {
                region_code: "KR-11".to_string(),
                region_name: "서울특별시".to_string(),
                geometry: Geometry::Polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]),
            },
            GeoFeature {
                region_code: "KR-26".to_string(),
                region_name: "부산 \"광역시\"".to_string(),
                geometry: Geometry::Polygon(vec![vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0]]]),
            },
        ];
        let canvas = CanvasSize::default();
        let projected = project(&features, canvas);

        let svg = render_svg(&features, &projected, canvas, |f| {
            if f.region_code == "KR-11" {
                RegionStyle::Active
            } else {
                RegionStyle::NoData
            }
        });

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 760 900""#));
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains(r##"data-region-code="KR-11" aria-label="서울특별시""##));
        assert!(svg.contains(r##"fill="#22d3ee" stroke="#0f172a" stroke-width="2.6""##));
        assert!(svg.contains("&quot;광역시&quot;"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.lines().count(), 4);
        assert!(svg.lines().skip(1).take(2).all(|l| l.starts_with("  <path")));
    }

    #[test]
    fn skips_unprojected_features() {
        let features = vec![GeoFeature {
            region_code: "KR-11".to_string(),
            region_name: String::new(),
            geometry: Geometry::Polygon(Vec::new()),
        }];
        let svg = render_svg(
            &features,
            &BTreeMap::new(),
            CanvasSize::default(),
            |_| RegionStyle::WithData,
        );
        assert!(!svg.contains("<path"));
    }
}
