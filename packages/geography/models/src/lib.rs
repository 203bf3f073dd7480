#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary feature and projected canvas path types.
//!
//! Boundaries arrive as longitude/latitude rings grouped into polygons.
//! Projection turns each feature into a [`CanvasPath`] of move/line/close
//! commands plus a label anchor.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A `[longitude, latitude]` pair.
pub type LonLat = [f64; 2];

/// An ordered list of points. The first and last point are not required
/// to coincide.
pub type Ring = Vec<LonLat>;

/// Boundary geometry of a single region.
///
/// The first ring of each polygon is its outer boundary; any further rings
/// are holes, but they are not distinguished when drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single polygon as a list of rings.
    Polygon(Vec<Ring>),
    /// A list of polygons, each a list of rings.
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Iterates over every ring, flattening multi-polygons in order.
    pub fn rings(&self) -> Box<dyn Iterator<Item = &Ring> + '_> {
        match self {
            Self::Polygon(rings) => Box::new(rings.iter()),
            Self::MultiPolygon(polygons) => Box::new(polygons.iter().flatten()),
        }
    }

    /// Iterates over every point of every ring.
    pub fn points(&self) -> impl Iterator<Item = &LonLat> + '_ {
        self.rings().flatten()
    }
}

/// A named administrative region boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    /// Region code in map form (e.g. `"KR-11"`).
    pub region_code: String,
    /// Display name (e.g. `"서울특별시"`).
    pub region_name: String,
    /// Boundary geometry.
    pub geometry: Geometry,
}

/// A point in canvas coordinates (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl CanvasPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at the point.
    MoveTo(CanvasPoint),
    /// Draw a straight line to the point.
    LineTo(CanvasPoint),
    /// Close the current subpath.
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M {:.2} {:.2}", p.x, p.y),
            Self::LineTo(p) => write!(f, "L {:.2} {:.2}", p.x, p.y),
            Self::Close => f.write_str("Z"),
        }
    }
}

/// Drawing commands for a whole feature, one segment per ring.
///
/// Renders as SVG path data. Segments are joined with a single space; an
/// empty ring contributes an empty segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasPath {
    /// Commands grouped by source ring.
    pub segments: Vec<Vec<PathCommand>>,
}

impl CanvasPath {
    /// Iterates over every command across all segments.
    pub fn commands(&self) -> impl Iterator<Item = &PathCommand> + '_ {
        self.segments.iter().flatten()
    }

    /// Returns `true` if no segment has any command.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(Vec::is_empty)
    }
}

impl fmt::Display for CanvasPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for (j, command) in segment.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{command}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for CanvasPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A feature after projection onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedFeature {
    /// Outline of every ring.
    pub path: CanvasPath,
    /// Unweighted mean of all projected points, used as a label anchor.
    pub centroid: CanvasPoint,
}

/// Target canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Margin kept clear on every side.
    pub padding: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 760.0,
            height: 900.0,
            padding: 30.0,
        }
    }
}
