#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Poll observation reconciliation.
//!
//! Reduces the map-latest observation stream to the freshest observation
//! per region key ([`LatestObservationIndex`]) and formats observation
//! meta lines for the region detail panel ([`meta`]).

pub mod index;
pub mod meta;

pub use index::LatestObservationIndex;
pub use meta::ObservationMeta;
