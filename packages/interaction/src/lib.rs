#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interaction state of the regional map panel.
//!
//! [`InteractionState`] tracks which region is hovered, focused, and
//! selected. [`ElectionLoader`] tracks the elections fetch for the selected
//! region and drops responses that arrive after the selection moved on.

pub mod loader;
pub mod state;

pub use loader::{ElectionLoader, LoadState, RequestTicket};
pub use state::{InteractionEvent, InteractionMode, InteractionState};
