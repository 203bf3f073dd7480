//! Loads the province boundary asset into [`GeoFeature`]s.
//!
//! Each feature must carry `region_code` and `region_name` properties and
//! a `Polygon` or `MultiPolygon` geometry. Anything else is skipped.

use std::path::Path;

use geojson::{Feature, GeoJson, PolygonType, Value};
use poll_map_geography_models::{GeoFeature, Geometry, LonLat, Ring};

use crate::GeoError;

/// Parses a `GeoJSON` `FeatureCollection` document.
///
/// # Errors
///
/// Returns an error if the document is not valid `GeoJSON` or is not a
/// `FeatureCollection`.
pub fn load_feature_collection(json: &str) -> Result<Vec<GeoFeature>, GeoError> {
    let GeoJson::FeatureCollection(collection) = json.parse::<GeoJson>()? else {
        return Err(GeoError::Conversion {
            message: "expected a FeatureCollection".to_string(),
        });
    };

    let total = collection.features.len();
    let features: Vec<GeoFeature> = collection
        .features
        .iter()
        .filter_map(convert_feature)
        .collect();

    if features.len() < total {
        log::warn!(
            "Skipped {} of {total} boundary features",
            total - features.len()
        );
    }
    log::info!("Loaded {} boundary features", features.len());

    Ok(features)
}

/// Reads and parses a boundary asset from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_feature_collection_file(path: &Path) -> Result<Vec<GeoFeature>, GeoError> {
    let json = std::fs::read_to_string(path)?;
    load_feature_collection(&json)
}

fn convert_feature(feature: &Feature) -> Option<GeoFeature> {
    let region_code = string_property(feature, "region_code")?;
    let region_name = string_property(feature, "region_name").unwrap_or_default();

    let Some(geometry) = &feature.geometry else {
        log::warn!("Boundary {region_code} has no geometry");
        return None;
    };

    let geometry = match &geometry.value {
        Value::Polygon(polygon) => Geometry::Polygon(convert_polygon(polygon)),
        Value::MultiPolygon(polygons) => {
            Geometry::MultiPolygon(polygons.iter().map(convert_polygon).collect())
        }
        other => {
            log::warn!(
                "Boundary {region_code} has unsupported geometry type {}",
                geometry_kind(other)
            );
            return None;
        }
    };

    Some(GeoFeature {
        region_code,
        region_name,
        geometry,
    })
}

const fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn string_property(feature: &Feature, name: &str) -> Option<String> {
    feature
        .property(name)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn convert_polygon(polygon: &PolygonType) -> Vec<Ring> {
    polygon
        .iter()
        .map(|ring| ring.iter().filter_map(|pos| to_lon_lat(pos)).collect())
        .collect()
}

/// Positions may carry altitude; anything shorter than two values is
/// dropped.
fn to_lon_lat(position: &[f64]) -> Option<LonLat> {
    match position {
        [lon, lat, ..] => Some([*lon, *lat]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"region_code": "KR-11", "region_name": "서울특별시"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[126.8, 37.4], [127.2, 37.4], [127.2, 37.7], [126.8, 37.4]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"region_code": "KR-50", "region_name": "제주특별자치도"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[126.1, 33.2, 5.0], [126.9, 33.2], [126.5, 33.6]]],
                        [[[126.2, 33.9], [126.3, 33.9], [126.25, 34.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {"region_name": "코드 없음"},
                "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0]]]}
            },
            {
                "type": "Feature",
                "properties": {"region_code": "KR-99"},
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
            }
        ]
    }"#;

    #[test]
    fn loads_polygon_and_multipolygon_features() {
        let features = load_feature_collection(COLLECTION).unwrap();
        assert_eq!(features.len(), 2);

        assert_eq!(features[0].region_code, "KR-11");
        assert_eq!(features[0].region_name, "서울특별시");
        assert!(matches!(features[0].geometry, Geometry::Polygon(ref r) if r[0].len() == 4));

        let Geometry::MultiPolygon(polygons) = &features[1].geometry else {
            panic!("expected a multipolygon");
        };
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0][0][0], [126.1, 33.2], "altitude is dropped");
    }

    #[test]
    fn rejects_non_collection() {
        let json = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(matches!(
            load_feature_collection(json),
            Err(GeoError::Conversion { .. })
        ));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            load_feature_collection("not json"),
            Err(GeoError::GeoJson(_))
        ));
    }

    #[test]
    fn empty_collection() {
        let json = r#"{"type": "FeatureCollection", "features": []}"#;
        assert!(load_feature_collection(json).unwrap().is_empty());
    }
}
