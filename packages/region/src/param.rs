//! Normalization of the `selected_region` query parameter.

use serde::{Deserialize, Serialize};

use crate::{MAP_CODE_MARKER, PROVINCE_SUFFIX, to_api_code};

/// A region query parameter after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionParam {
    /// Trimmed input.
    pub input: String,
    /// Value to query the API with, or `None` for an empty parameter.
    pub normalized: Option<String>,
    /// Whether `normalized` differs from what the user typed.
    pub corrected: bool,
}

/// Normalizes a region query parameter to API form.
///
/// - `"KR-11"` becomes `"11-000"` (corrected)
/// - `"11"` becomes `"11-000"` (corrected)
/// - `"11-680"` passes through
/// - anything else passes through trimmed, uncorrected
#[must_use]
pub fn normalize_region_param(raw: Option<&str>) -> RegionParam {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return RegionParam::default();
    }

    let input = trimmed.to_string();

    let expanded = trimmed
        .strip_prefix(MAP_CODE_MARKER)
        .filter(|rest| rest.len() == 2)
        .and_then(to_api_code)
        .or_else(|| is_bare_prefix(trimmed).then(|| format!("{trimmed}{PROVINCE_SUFFIX}")));

    match expanded {
        Some(normalized) => RegionParam {
            input,
            normalized: Some(normalized),
            corrected: true,
        },
        None => RegionParam {
            normalized: Some(input.clone()),
            input,
            corrected: false,
        },
    }
}

fn is_bare_prefix(value: &str) -> bool {
    value.len() == 2 && value.bytes().all(|b| b.is_ascii_digit())
}
