//! Linear lon/lat to canvas projection.
//!
//! This is not a cartographic projection: longitude and latitude are
//! scaled independently to fill the padded canvas. Good enough for a
//! province-level choropleth, wrong for anything that needs area or
//! angle fidelity.

use std::collections::BTreeMap;

use poll_map_geography_models::{
    CanvasPath, CanvasPoint, CanvasSize, GeoFeature, LonLat, PathCommand, ProjectedFeature, Ring,
};

/// Smallest coordinate span used for scaling, in degrees.
pub const MIN_RANGE: f64 = 0.1;

/// Bounding box of a set of lon/lat points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    /// Westernmost longitude.
    pub min_lon: f64,
    /// Easternmost longitude.
    pub max_lon: f64,
    /// Southernmost latitude.
    pub min_lat: f64,
    /// Northernmost latitude.
    pub max_lat: f64,
}

impl Bounds {
    /// Computes the bounding box of `points`.
    ///
    /// Returns `None` if there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LonLat>) -> Option<Self> {
        let mut iter = points.into_iter();
        let &[lon, lat] = iter.next()?;
        let init = Self {
            min_lon: lon,
            max_lon: lon,
            min_lat: lat,
            max_lat: lat,
        };

        Some(iter.fold(init, |acc, &[lon, lat]| Self {
            min_lon: acc.min_lon.min(lon),
            max_lon: acc.max_lon.max(lon),
            min_lat: acc.min_lat.min(lat),
            max_lat: acc.max_lat.max(lat),
        }))
    }

    /// Longitude span, floored at [`MIN_RANGE`].
    #[must_use]
    pub fn lon_range(&self) -> f64 {
        (self.max_lon - self.min_lon).max(MIN_RANGE)
    }

    /// Latitude span, floored at [`MIN_RANGE`].
    #[must_use]
    pub fn lat_range(&self) -> f64 {
        (self.max_lat - self.min_lat).max(MIN_RANGE)
    }
}

/// Projects lon/lat points into a padded canvas.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    bounds: Bounds,
    canvas: CanvasSize,
}

impl Projector {
    /// Creates a projector that maps `bounds` onto `canvas`.
    #[must_use]
    pub const fn new(bounds: Bounds, canvas: CanvasSize) -> Self {
        Self { bounds, canvas }
    }

    /// Bounding box this projector scales against.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Projects a single point. Latitude is inverted because canvas y grows
    /// downward.
    #[must_use]
    pub fn project_point(&self, [lon, lat]: LonLat) -> CanvasPoint {
        let Self { bounds, canvas } = self;
        let inner_width = 2.0f64.mul_add(-canvas.padding, canvas.width);
        let inner_height = 2.0f64.mul_add(-canvas.padding, canvas.height);

        CanvasPoint {
            x: canvas.padding + (lon - bounds.min_lon) / bounds.lon_range() * inner_width,
            y: canvas.padding + (bounds.max_lat - lat) / bounds.lat_range() * inner_height,
        }
    }

    fn project_ring(&self, ring: &Ring) -> Vec<CanvasPoint> {
        ring.iter().map(|&point| self.project_point(point)).collect()
    }

    /// Projects every ring of `feature` and builds its outline and centroid.
    #[must_use]
    pub fn project_feature(&self, feature: &GeoFeature) -> ProjectedFeature {
        let rings: Vec<Vec<CanvasPoint>> = feature
            .geometry
            .rings()
            .map(|ring| self.project_ring(ring))
            .collect();

        ProjectedFeature {
            path: build_path(&rings),
            centroid: mean_point(rings.iter().flatten()),
        }
    }
}

/// Builds one move/line.../close segment per ring. Outer rings and holes
/// are treated alike.
fn build_path(rings: &[Vec<CanvasPoint>]) -> CanvasPath {
    let segments = rings
        .iter()
        .map(|ring| {
            let Some((first, rest)) = ring.split_first() else {
                return Vec::new();
            };
            let mut commands = Vec::with_capacity(ring.len() + 1);
            commands.push(PathCommand::MoveTo(*first));
            commands.extend(rest.iter().copied().map(PathCommand::LineTo));
            commands.push(PathCommand::Close);
            commands
        })
        .collect();

    CanvasPath { segments }
}

/// Unweighted arithmetic mean. The origin for an empty set.
#[allow(clippy::cast_precision_loss)]
fn mean_point<'a>(points: impl Iterator<Item = &'a CanvasPoint>) -> CanvasPoint {
    let (sum_x, sum_y, count) = points.fold((0.0, 0.0, 0usize), |(x, y, n), p| {
        (x + p.x, y + p.y, n + 1)
    });

    if count == 0 {
        return CanvasPoint::default();
    }

    CanvasPoint {
        x: sum_x / count as f64,
        y: sum_y / count as f64,
    }
}

/// Projects a boundary collection onto `canvas`, keyed by region code.
///
/// The bounding box spans every point of every feature so that all regions
/// share one scale. An empty collection yields an empty map. Duplicate
/// region codes keep the last feature.
#[must_use]
pub fn project(features: &[GeoFeature], canvas: CanvasSize) -> BTreeMap<String, ProjectedFeature> {
    if features.is_empty() {
        return BTreeMap::new();
    }

    let bounds = Bounds::from_points(features.iter().flat_map(|f| f.geometry.points()))
        .unwrap_or_default();
    log::debug!(
        "Projecting {} features within lon [{}, {}], lat [{}, {}]",
        features.len(),
        bounds.min_lon,
        bounds.max_lon,
        bounds.min_lat,
        bounds.max_lat,
    );

    let projector = Projector::new(bounds, canvas);
    features
        .iter()
        .map(|feature| {
            (
                feature.region_code.clone(),
                projector.project_feature(feature),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use poll_map_geography_models::Geometry;

    use super::*;

    const CANVAS: CanvasSize = CanvasSize {
        width: 760.0,
        height: 900.0,
        padding: 30.0,
    };

    fn feature(code: &str, geometry: Geometry) -> GeoFeature {
        GeoFeature {
            region_code: code.to_string(),
            region_name: code.to_string(),
            geometry,
        }
    }

    fn square(min: f64, max: f64) -> Ring {
        vec![[min, min], [max, min], [max, max], [min, max]]
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_collection_yields_empty_map() {
        assert!(project(&[], CANVAS).is_empty());
    }

    #[test]
    fn corners_map_to_padded_canvas_edges() {
        let features = [feature("KR-11", Geometry::Polygon(vec![square(0.0, 1.0)]))];
        let projected = project(&features, CANVAS);
        let commands: Vec<PathCommand> = projected["KR-11"].path.commands().copied().collect();

        // (0,0) is the south-west corner: left edge, bottom of the canvas.
        assert_eq!(
            commands[0],
            PathCommand::MoveTo(CanvasPoint::new(30.0, 870.0))
        );
        // (1,0) is south-east.
        assert_eq!(
            commands[1],
            PathCommand::LineTo(CanvasPoint::new(730.0, 870.0))
        );
        // (1,1) is north-east: top of the canvas.
        assert_eq!(
            commands[2],
            PathCommand::LineTo(CanvasPoint::new(730.0, 30.0))
        );
        assert_eq!(commands.last(), Some(&PathCommand::Close));
    }

    #[test]
    fn all_features_share_one_scale() {
        let features = [
            feature("KR-11", Geometry::Polygon(vec![square(0.0, 1.0)])),
            feature("KR-26", Geometry::Polygon(vec![square(1.0, 2.0)])),
        ];
        let projected = project(&features, CANVAS);

        let west = projected["KR-11"].centroid;
        let east = projected["KR-26"].centroid;
        assert!(approx(west.x, 205.0), "west x: {}", west.x);
        assert!(approx(east.x, 555.0), "east x: {}", east.x);
        assert!(east.y < west.y, "north-east region should sit higher");
    }

    #[test]
    fn identical_points_do_not_divide_by_zero() {
        let features = [feature(
            "KR-36",
            Geometry::Polygon(vec![vec![[127.0, 36.5], [127.0, 36.5], [127.0, 36.5]]]),
        )];
        let projected = project(&features, CANVAS);
        let result = &projected["KR-36"];

        assert!(result.centroid.x.is_finite());
        assert!(result.centroid.y.is_finite());
        assert!(approx(result.centroid.x, 30.0));
        assert!(approx(result.centroid.y, 30.0));
        assert_eq!(
            result.path.to_string(),
            "M 30.00 30.00 L 30.00 30.00 L 30.00 30.00 Z"
        );
    }

    #[test]
    fn multipolygon_rings_each_get_a_segment() {
        let features = [feature(
            "KR-46",
            Geometry::MultiPolygon(vec![
                vec![square(0.0, 1.0), square(0.25, 0.75)],
                vec![square(2.0, 3.0)],
            ]),
        )];
        let projected = project(&features, CANVAS);
        let path = &projected["KR-46"].path;

        assert_eq!(path.segments.len(), 3);
        assert!(
            path.segments
                .iter()
                .all(|s| matches!(s.first(), Some(PathCommand::MoveTo(_))))
        );
        assert_eq!(path.to_string().matches('Z').count(), 3);
    }

    #[test]
    fn empty_ring_yields_empty_segment() {
        let features = [feature(
            "KR-50",
            Geometry::Polygon(vec![square(0.0, 1.0), Vec::new()]),
        )];
        let projected = project(&features, CANVAS);
        let path = &projected["KR-50"].path;

        assert_eq!(path.segments.len(), 2);
        assert!(path.segments[1].is_empty());
        assert!(path.to_string().ends_with("Z "));
    }

    #[test]
    fn centroid_is_unweighted_point_mean() {
        // Duplicate point pulls the mean towards it; an area centroid would not.
        let features = [feature(
            "KR-41",
            Geometry::Polygon(vec![vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 1.0],
                [0.0, 0.0],
            ]]),
        )];
        let projected = project(&features, CANVAS);
        let centroid = projected["KR-41"].centroid;

        assert!(approx(centroid.x, 30.0 + 0.4 * 700.0), "x: {}", centroid.x);
        assert!(approx(centroid.y, 30.0 + 0.6 * 840.0), "y: {}", centroid.y);
    }

    #[test]
    fn feature_without_points_projects_to_origin() {
        let features = [feature("KR-11", Geometry::Polygon(Vec::new()))];
        let projected = project(&features, CANVAS);
        assert!(projected["KR-11"].path.is_empty());
        assert_eq!(projected["KR-11"].centroid, CanvasPoint::default());
    }

    #[test]
    fn bounds_floor_small_ranges() {
        let bounds = Bounds::from_points(&[[127.0, 37.0], [127.05, 37.0]]).unwrap();
        assert!(approx(bounds.lon_range(), 0.1));
        assert!(approx(bounds.lat_range(), 0.1));
        assert_eq!(Bounds::from_points(&[]), None);
    }
}
