#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-office election resolution.
//!
//! For a region and a fixed, ordered list of office slots, picks exactly
//! one representative [`ElectionCandidateRecord`] per slot and synthesizes
//! a placeholder where no record exists. Also generates the code-master
//! slot records the elections query is seeded with.
//!
//! [`ElectionCandidateRecord`]: poll_map_election_models::ElectionCandidateRecord

pub mod master;
pub mod priority;
pub mod resolver;
pub mod status;
pub mod title;

pub use master::build_master_slots;
pub use priority::{election_priority, pick_representative};
pub use resolver::{placeholder_election, resolve_official_slots, resolve_slots};
pub use status::election_status;
pub use title::fallback_title;
