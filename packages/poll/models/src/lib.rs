#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Poll observation types.
//!
//! A [`PollObservation`] is one published data point from the dashboard
//! map-latest query. Observations are immutable once received.

pub mod lenient;

use serde::{Deserialize, Serialize};

/// Reported margin of error. Sources publish either a number of
/// percentage points or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarginOfError {
    /// Margin in percentage points (e.g. `3.1`).
    Points(f64),
    /// Free-form text (e.g. `"95% 신뢰수준 ±3.1%p"`).
    Text(String),
}

/// A single polling data point for a region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollObservation {
    /// Region the poll was published for, in API form (`"11-000"`,
    /// `"11-680"`).
    #[serde(default)]
    pub region_code: Option<String>,
    /// Alternate targeting key when the poll's audience differs from its
    /// primary region.
    #[serde(default)]
    pub audience_region_code: Option<String>,
    /// ISO date the fieldwork ended. Compared lexicographically.
    #[serde(default)]
    pub survey_end_date: Option<String>,
    /// Office the poll concerns (e.g. `"광역자치단체장"`).
    #[serde(default)]
    pub office_type: Option<String>,
    /// Matchup the poll belongs to.
    #[serde(default)]
    pub matchup_id: Option<String>,
    /// Headline (e.g. `"서울시장 가상대결"`).
    #[serde(default)]
    pub title: String,
    /// Leading option's name.
    #[serde(default)]
    pub option_name: Option<String>,
    /// Representative value in percent.
    #[serde(default, deserialize_with = "lenient::number")]
    pub value_mid: Option<f64>,
    /// Polling organization.
    #[serde(default)]
    pub pollster: Option<String>,
    /// Number of respondents.
    #[serde(default, deserialize_with = "lenient::count")]
    pub sample_size: Option<u64>,
    /// Margin of error.
    #[serde(default, alias = "moe", deserialize_with = "lenient::margin")]
    pub margin_of_error: Option<MarginOfError>,
    /// Channels the poll was collected from (e.g. `"article"`, `"nesdc"`).
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub source_channels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_record() {
        let obs: PollObservation =
            serde_json::from_str(r#"{"region_code": "11-000", "survey_end_date": "2026-02-01"}"#)
                .unwrap();
        assert_eq!(obs.region_code.as_deref(), Some("11-000"));
        assert_eq!(obs.survey_end_date.as_deref(), Some("2026-02-01"));
        assert!(obs.audience_region_code.is_none());
        assert!(obs.source_channels.is_empty());
    }

    #[test]
    fn margin_accepts_number_or_text() {
        let obs: PollObservation = serde_json::from_str(r#"{"moe": 3.1}"#).unwrap();
        assert_eq!(obs.margin_of_error, Some(MarginOfError::Points(3.1)));

        let obs: PollObservation =
            serde_json::from_str(r#"{"margin_of_error": "±3.5%p"}"#).unwrap();
        assert_eq!(
            obs.margin_of_error,
            Some(MarginOfError::Text("±3.5%p".to_string()))
        );
    }

    #[test]
    fn null_fields_are_none() {
        let obs: PollObservation = serde_json::from_str(
            r#"{"region_code": "26-000", "audience_region_code": null, "value_mid": null}"#,
        )
        .unwrap();
        assert!(obs.audience_region_code.is_none());
        assert!(obs.value_mid.is_none());
    }

    #[test]
    fn uneven_numbers_are_coerced() {
        let items: Vec<PollObservation> = serde_json::from_str(
            r#"[
                {"sample_size": 1000, "value_mid": 41},
                {"sample_size": 1004.0, "value_mid": "38.5"},
                {"sample_size": "802", "value_mid": "n/a"},
                {"sample_size": -5, "value_mid": true},
                {"sample_size": null, "value_mid": null}
            ]"#,
        )
        .unwrap();

        let samples: Vec<_> = items.iter().map(|o| o.sample_size).collect();
        assert_eq!(samples, [Some(1000), Some(1004), Some(802), None, None]);

        let values: Vec<_> = items.iter().map(|o| o.value_mid).collect();
        assert_eq!(values, [Some(41.0), Some(38.5), None, None, None]);
    }

    #[test]
    fn uneven_channels_and_margin() {
        let obs: PollObservation = serde_json::from_str(
            r#"{"source_channels": null, "margin_of_error": {"low": 3}}"#,
        )
        .unwrap();
        assert!(obs.source_channels.is_empty());
        assert!(obs.margin_of_error.is_none());

        let obs: PollObservation = serde_json::from_str(
            r#"{"source_channels": ["article", 7, null, "nesdc"], "moe": "  "}"#,
        )
        .unwrap();
        assert_eq!(obs.source_channels, ["article", "nesdc"]);
        assert!(obs.margin_of_error.is_none());

        let obs: PollObservation =
            serde_json::from_str(r#"{"source_channels": "article"}"#).unwrap();
        assert_eq!(obs.source_channels, ["article"]);
    }
}
