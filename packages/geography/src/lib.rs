#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Regional boundary loading and map projection.
//!
//! Loads the province boundary asset (a `GeoJSON` `FeatureCollection`),
//! projects it onto a fixed-size canvas with a simple linear lon/lat
//! scaling, and renders the resulting outlines as SVG.

pub mod load;
pub mod projection;
pub mod svg;

pub use load::load_feature_collection;
pub use projection::{Bounds, Projector, project};

use thiserror::Error;

/// Errors that can occur while loading boundary data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document parsed but is not a usable boundary collection.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
