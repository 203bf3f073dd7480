//! Strict canonicalization of user- or source-supplied region codes.
//!
//! Unlike [`crate::region_prefix`], which only extracts a prefix, this
//! produces a full canonical API code (`"NN-MMM"`, or `"NN-NN-MMM"` for
//! scenario datasets) and remaps retired province prefixes.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SIMPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}(?:-[0-9]{3})?$").expect("valid regex"));

static COMPACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("valid regex"));

static SCENARIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{3}$").expect("valid regex"));

/// Retired province prefixes and their current replacements.
///
/// `32` was Gangwon-do before it became Gangwon Special Self-Governing
/// Province (`42`).
pub const LEGACY_PREFIX_ALIASES: &[(&str, &str)] = &[("32", "42")];

/// Result of [`canonicalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCodeNormalization {
    /// Input after trimming.
    pub raw: String,
    /// Canonical API code, if the input looked like a region code.
    pub canonical: Option<String>,
    /// Whether the input was recognized as a region code at all.
    pub is_code_like: bool,
    /// Whether the canonical form differs from the cleaned-up input.
    pub was_aliased: bool,
}

impl RegionCodeNormalization {
    fn not_code_like(raw: String) -> Self {
        Self {
            raw,
            canonical: None,
            is_code_like: false,
            was_aliased: false,
        }
    }
}

/// Canonicalizes a raw region code.
///
/// Accepted shapes (after removing spaces, mapping `_` to `-`, uppercasing
/// and stripping a leading `KR-`/`KR`):
///
/// - `NN` becomes `NN-000`
/// - `NN-MMM` is kept
/// - `NNMMM` becomes `NN-MMM`
/// - `NN-NN-MMM` (scenario datasets) is kept
///
/// Legacy prefixes are then remapped via [`LEGACY_PREFIX_ALIASES`].
#[must_use]
pub fn canonicalize(raw_value: &str) -> RegionCodeNormalization {
    let raw = raw_value.trim().to_string();
    if raw.is_empty() {
        return RegionCodeNormalization::not_code_like(raw);
    }

    let token = raw.replace(' ', "").replace('_', "-").to_uppercase();
    let Some(canonical) = canonicalize_token(&token) else {
        return RegionCodeNormalization::not_code_like(raw);
    };

    let was_aliased = token != canonical;
    RegionCodeNormalization {
        raw,
        canonical: Some(canonical),
        is_code_like: true,
        was_aliased,
    }
}

fn canonicalize_token(token: &str) -> Option<String> {
    let stripped = strip_country_marker(token);

    if SCENARIO_RE.is_match(stripped) {
        return Some(apply_legacy_alias(stripped));
    }

    if SIMPLE_RE.is_match(stripped) {
        let digits: String = stripped.chars().filter(char::is_ascii_digit).collect();
        return match digits.len() {
            2 => Some(apply_legacy_alias(&format!("{digits}-000"))),
            5 => Some(apply_legacy_alias(&format!(
                "{}-{}",
                &digits[..2],
                &digits[2..]
            ))),
            _ => None,
        };
    }

    if COMPACT_RE.is_match(stripped) {
        return Some(apply_legacy_alias(&format!(
            "{}-{}",
            &stripped[..2],
            &stripped[2..]
        )));
    }

    None
}

fn strip_country_marker(value: &str) -> &str {
    value
        .strip_prefix("KR-")
        .or_else(|| value.strip_prefix("KR"))
        .unwrap_or(value)
}

fn apply_legacy_alias(code: &str) -> String {
    let prefix = &code[..2];
    let mapped = LEGACY_PREFIX_ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == prefix)
        .map_or(prefix, |(_, current)| *current);
    format!("{mapped}{}", &code[2..])
}
