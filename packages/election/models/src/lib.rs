#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Election record and office slot types.
//!
//! The regional elections query returns zero or more
//! [`ElectionCandidateRecord`]s per office. The map panel shows exactly one
//! [`ResolvedElection`] per [`OfficeType`] slot.

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Topology tag of the production dataset.
pub const OFFICIAL_TOPOLOGY: &str = "official";

/// Source tag of synthesized placeholder entries.
pub const GENERATED_SOURCE: &str = "generated";

/// Source tag of slots generated from the election code master.
pub const CODE_MASTER_SOURCE: &str = "code_master";

/// Elected office categories.
///
/// Parsing accepts the canonical Korean label, an English key, and a few
/// common alternate labels. Display always yields the canonical label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum OfficeType {
    /// Metropolitan mayor or provincial governor.
    #[serde(rename = "광역자치단체장", alias = "metro_mayor")]
    #[strum(
        to_string = "광역자치단체장",
        serialize = "metro_mayor",
        serialize = "광역단체장",
        serialize = "시도지사",
        serialize = "시·도지사"
    )]
    MetroHead,
    /// Metropolitan or provincial council.
    #[serde(rename = "광역의회", alias = "metro_council")]
    #[strum(
        to_string = "광역의회",
        serialize = "metro_council",
        serialize = "광역의원",
        serialize = "시도의회",
        serialize = "시·도의회"
    )]
    MetroCouncil,
    /// Superintendent of education.
    #[serde(rename = "교육감", alias = "superintendent")]
    #[strum(
        to_string = "교육감",
        serialize = "superintendent",
        serialize = "시도교육감",
        serialize = "시·도교육감"
    )]
    Superintendent,
    /// City, county, or district head.
    #[serde(rename = "기초자치단체장", alias = "local_mayor")]
    #[strum(
        to_string = "기초자치단체장",
        serialize = "local_mayor",
        serialize = "기초단체장",
        serialize = "구시군의장",
        serialize = "구·시·군의 장"
    )]
    LocalHead,
    /// City, county, or district council.
    #[serde(rename = "기초의회", alias = "local_council")]
    #[strum(
        to_string = "기초의회",
        serialize = "local_council",
        serialize = "기초의원",
        serialize = "구시군의회",
        serialize = "구·시·군의회"
    )]
    LocalCouncil,
}

/// Slots shown for a province-level region, in display order.
pub const METRO_OFFICE_TYPES: [OfficeType; 3] = [
    OfficeType::MetroHead,
    OfficeType::MetroCouncil,
    OfficeType::Superintendent,
];

/// Slots shown for a city/county/district region, in display order.
pub const LOCAL_OFFICE_TYPES: [OfficeType; 2] = [OfficeType::LocalHead, OfficeType::LocalCouncil];

impl OfficeType {
    /// Parses a raw office label, ignoring surrounding whitespace.
    ///
    /// Returns `None` for unrecognized or blank labels.
    #[must_use]
    pub fn parse_label(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    /// Canonical Korean label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MetroHead => "광역자치단체장",
            Self::MetroCouncil => "광역의회",
            Self::Superintendent => "교육감",
            Self::LocalHead => "기초자치단체장",
            Self::LocalCouncil => "기초의회",
        }
    }
}

/// Administrative level of a region.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AdminLevel {
    /// Province-level unit.
    Sido,
    /// City, county, or district within a province.
    Sigungu,
}

impl AdminLevel {
    /// Office slots for this level, in display order.
    #[must_use]
    pub const fn default_office_types(self) -> &'static [OfficeType] {
        match self {
            Self::Sido => &METRO_OFFICE_TYPES,
            Self::Sigungu => &LOCAL_OFFICE_TYPES,
        }
    }
}

/// A prospective election entry for a region and office, as returned by
/// the regional elections query.
///
/// Several records may exist for one office (e.g. across topology
/// versions); exactly one is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionCandidateRecord {
    /// Matchup identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub matchup_id: String,
    /// Region code in API form.
    #[serde(default, deserialize_with = "null_as_default")]
    pub region_code: String,
    /// Raw office label; may use an alternate spelling.
    #[serde(default, deserialize_with = "null_as_default")]
    pub office_type: String,
    /// Display title (e.g. `"서울시장"`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Dataset tag. Missing means [`OFFICIAL_TOPOLOGY`].
    #[serde(default)]
    pub topology: Option<String>,
    /// Dataset version within the topology.
    #[serde(default)]
    pub topology_version_id: Option<String>,
    /// Provenance tag (e.g. `"master"`, `"article"`).
    #[serde(default)]
    pub source: Option<String>,
    /// Whether the election is currently scheduled.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    /// Whether this record was produced by a fallback path.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_fallback: bool,
    /// Whether this record stands in for missing data.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_placeholder: bool,
    /// Whether any poll exists for this election.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_poll_data: bool,
    /// Whether any candidate is registered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_candidate_data: bool,
    /// ISO end date of the latest poll. Compared lexicographically.
    #[serde(default)]
    pub latest_survey_end_date: Option<String>,
    /// Matchup holding the latest poll.
    #[serde(default)]
    pub latest_matchup_id: Option<String>,
    /// Explicit status text.
    #[serde(default)]
    pub status: Option<String>,
}

impl ElectionCandidateRecord {
    /// Topology tag, defaulting to [`OFFICIAL_TOPOLOGY`].
    #[must_use]
    pub fn topology(&self) -> &str {
        self.topology.as_deref().unwrap_or(OFFICIAL_TOPOLOGY)
    }
}

/// Reads `null` as the type's default, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The region an election listing is resolved for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionContext {
    /// Region code in any form.
    pub region_code: String,
    /// Display name (e.g. `"서울특별시"`), possibly empty.
    pub region_name: String,
}

/// The representative election chosen for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedElection {
    /// Slot this entry fills.
    pub slot: OfficeType,
    /// Chosen or synthesized record. Its `office_type` is the canonical
    /// label and its `status` is always set.
    #[serde(flatten)]
    pub record: ElectionCandidateRecord,
}

impl ResolvedElection {
    /// Status text.
    #[must_use]
    pub fn status(&self) -> &str {
        self.record.status.as_deref().unwrap_or_default()
    }

    /// Matchup to link to: the latest matchup if known, otherwise the
    /// record's own matchup unless it is a placeholder.
    #[must_use]
    pub fn navigation_matchup_id(&self) -> Option<&str> {
        self.record
            .latest_matchup_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                (!self.record.is_placeholder && !self.record.matchup_id.is_empty())
                    .then_some(self.record.matchup_id.as_str())
            })
    }
}

/// A region row from the election code master.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRegion {
    /// Region code in API form.
    pub region_code: String,
    /// Province name (e.g. `"서울특별시"`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub sido_name: String,
    /// City/county/district name; `"전체"` for the province itself.
    #[serde(default)]
    pub sigungu_name: Option<String>,
    /// Administrative level. Missing means [`AdminLevel::Sido`].
    #[serde(default)]
    pub admin_level: Option<AdminLevel>,
}
