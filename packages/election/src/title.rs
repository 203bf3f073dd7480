//! Titles for synthesized placeholder elections.
//!
//! The generic title is `"{region name} {office label}"`. Regions whose
//! elections follow their own naming convention are listed in
//! [`TITLE_OVERRIDES`], keyed by province prefix.

use poll_map_election_models::OfficeType;
use poll_map_region::{region_prefix, sido::SEJONG_PREFIX};

/// Per-region title overrides: `(prefix, office, title)`.
pub const TITLE_OVERRIDES: &[(&str, OfficeType, &str)] = &[
    (SEJONG_PREFIX, OfficeType::MetroHead, "세종시장"),
    (SEJONG_PREFIX, OfficeType::MetroCouncil, "세종시의회"),
    (SEJONG_PREFIX, OfficeType::Superintendent, "세종교육감"),
];

/// Looks up an override title for the region and office.
#[must_use]
pub fn title_override(region_code: &str, office: OfficeType) -> Option<&'static str> {
    let prefix = region_prefix(region_code)?;
    TITLE_OVERRIDES
        .iter()
        .find(|(p, o, _)| *p == prefix && *o == office)
        .map(|(_, _, title)| *title)
}

/// Title for a placeholder election.
///
/// Uses [`TITLE_OVERRIDES`] when the region has one for `office`, the bare
/// office label when `region_name` is blank, and
/// `"{region_name} {office}"` otherwise.
#[must_use]
pub fn fallback_title(region_code: &str, region_name: &str, office: OfficeType) -> String {
    if let Some(title) = title_override(region_code, office) {
        return title.to_string();
    }

    let region_name = region_name.trim();
    if region_name.is_empty() {
        return office.label().to_string();
    }

    format!("{region_name} {}", office.label())
}
