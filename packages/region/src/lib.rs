#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region code normalization.
//!
//! A province-level region (sido) is identified by a two-digit prefix that
//! shows up in three interchangeable textual forms:
//!
//! - map form: `"KR-11"` (used by the boundary asset)
//! - API form: `"11-000"` (used by the polling API)
//! - bare prefix: `"11"`
//!
//! Sub-regions append a three-digit suffix to the prefix (`"11-015"`).
//! Every function here is total: malformed input yields `None`, never a
//! panic.

pub mod canonical;
pub mod param;
pub mod sido;

use std::sync::LazyLock;

use regex::Regex;

pub use canonical::{RegionCodeNormalization, canonicalize};
pub use param::{RegionParam, normalize_region_param};

/// Optional `KR-` marker followed by the two-digit prefix. Not anchored, so
/// the prefix may appear mid-string.
static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:KR-)?([0-9]{2})").expect("valid regex"));

/// A sub-region code: two-digit prefix, dash, three-digit suffix.
static SPECIFIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[0-9]{3}$").expect("valid regex"));

/// Marker that precedes the prefix in map form.
pub const MAP_CODE_MARKER: &str = "KR-";

/// Suffix that turns a prefix into its province-level API form.
pub const PROVINCE_SUFFIX: &str = "-000";

/// Extracts the two-digit province prefix from any region code form.
///
/// `"11-000"`, `"KR-11"`, `"11"` and `"11-015"` all yield `Some("11")`.
#[must_use]
pub fn region_prefix(value: &str) -> Option<&str> {
    PREFIX_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Converts any region code form to map form (`"KR-NN"`).
#[must_use]
pub fn to_map_code(value: &str) -> Option<String> {
    region_prefix(value).map(|prefix| format!("{MAP_CODE_MARKER}{prefix}"))
}

/// Converts any region code form to the province-level API form
/// (`"NN-000"`).
#[must_use]
pub fn to_api_code(value: &str) -> Option<String> {
    region_prefix(value).map(|prefix| format!("{prefix}{PROVINCE_SUFFIX}"))
}

/// Returns `true` if `code` is a sub-region API code such as `"11-015"`.
///
/// The province-level `"11-000"` also matches; it is its own
/// generalization.
#[must_use]
pub fn is_specific_region_code(code: &str) -> bool {
    SPECIFIC_RE.is_match(code)
}

/// Generalizes a sub-region code to its province-level form:
/// `"11-015"` becomes `"11-000"`.
///
/// Returns `None` unless `code` is exactly `NN-MMM`.
#[must_use]
pub fn generalize(code: &str) -> Option<String> {
    if is_specific_region_code(code) {
        Some(format!("{}{PROVINCE_SUFFIX}", &code[..2]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_from_every_form() {
        for value in ["11", "KR-11", "11-000", "11-015", "KR-11-015"] {
            assert_eq!(region_prefix(value), Some("11"), "input: {value}");
        }
    }

    #[test]
    fn prefix_absent_for_malformed() {
        for value in ["", "KR-", "Seoul", "1", "K-1"] {
            assert_eq!(region_prefix(value), None, "input: {value}");
        }
    }

    #[test]
    fn prefix_matches_mid_string() {
        assert_eq!(region_prefix("region 26 busan"), Some("26"));
    }

    #[test]
    fn map_and_api_forms() {
        assert_eq!(to_map_code("41-000").as_deref(), Some("KR-41"));
        assert_eq!(to_map_code("41").as_deref(), Some("KR-41"));
        assert_eq!(to_api_code("KR-41").as_deref(), Some("41-000"));
        assert_eq!(to_api_code("41-135").as_deref(), Some("41-000"));
        assert_eq!(to_map_code("nope"), None);
        assert_eq!(to_api_code(""), None);
    }

    #[test]
    fn map_then_api_matches_direct_api() {
        for value in ["11", "KR-26", "27-000", "28-110"] {
            let via_map = to_map_code(value).and_then(|m| to_api_code(&m));
            assert_eq!(via_map, to_api_code(value), "input: {value}");
        }
    }

    #[test]
    fn all_forms_mutually_derivable() {
        let api = to_api_code("KR-50").unwrap();
        let map = to_map_code(&api).unwrap();
        assert_eq!(map, "KR-50");
        assert_eq!(region_prefix(&map), region_prefix(&api));
    }

    #[test]
    fn generalize_specific_codes() {
        assert_eq!(generalize("11-015").as_deref(), Some("11-000"));
        assert_eq!(generalize("11-000").as_deref(), Some("11-000"));
        assert_eq!(generalize("KR-11"), None);
        assert_eq!(generalize("11"), None);
        assert_eq!(generalize("11-0155"), None);
    }

    #[test]
    fn specific_code_pattern_is_anchored() {
        assert!(is_specific_region_code("26-440"));
        assert!(!is_specific_region_code(" 26-440"));
        assert!(!is_specific_region_code("26-44"));
    }
}
