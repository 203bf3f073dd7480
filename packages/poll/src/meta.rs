//! Display meta lines for the region detail panel.

use chrono::NaiveDate;
use poll_map_poll_models::{MarginOfError, PollObservation};
use serde::Serialize;

/// Shown in place of any value that is missing.
pub const MISSING: &str = "-";

/// Formatted meta lines for one observation, or the placeholder lines for
/// a region without observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationMeta {
    /// Headline.
    pub title: String,
    /// Representative value (e.g. `"42.5%"`).
    pub value: String,
    /// Survey end date (e.g. `"2026년 2월 1일"`).
    pub survey_date: String,
    /// Polling organization.
    pub pollster: String,
    /// Sample size line.
    pub sample: String,
    /// Margin of error line.
    pub margin: String,
    /// Collection channels.
    pub channels: String,
}

impl ObservationMeta {
    /// Formats the meta lines of `observation`.
    #[must_use]
    pub fn from_observation(observation: &PollObservation) -> Self {
        Self {
            title: observation.title.clone(),
            value: format_percent(observation.value_mid),
            survey_date: format_date(observation.survey_end_date.as_deref()),
            pollster: observation
                .pollster
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or("조사기관 미확인")
                .to_string(),
            sample: format_sample(observation.sample_size),
            margin: format_margin(observation.margin_of_error.as_ref()),
            channels: join_channels(&observation.source_channels),
        }
    }

    /// Placeholder lines for a region with no observation.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            title: "최신 조사 메타".to_string(),
            value: MISSING.to_string(),
            survey_date: MISSING.to_string(),
            pollster: "조사 데이터 없음".to_string(),
            sample: "표본 정보: 없음".to_string(),
            margin: "오차 정보: 없음".to_string(),
            channels: MISSING.to_string(),
        }
    }

    /// Meta for an optional observation.
    #[must_use]
    pub fn for_region(observation: Option<&PollObservation>) -> Self {
        observation.map_or_else(Self::placeholder, Self::from_observation)
    }
}

/// `"42.5%"`, or [`MISSING`].
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}%"),
        _ => MISSING.to_string(),
    }
}

/// Formats an ISO date (or datetime) as `"2026년 2월 1일"`.
///
/// Returns [`MISSING`] for empty or unparseable input.
#[must_use]
pub fn format_date(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .and_then(|v| v.get(..10))
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
        .map_or_else(
            || MISSING.to_string(),
            |date| date.format("%Y년 %-m월 %-d일").to_string(),
        )
}

/// `"표본 1,004명"`, or `"표본 정보 없음"`.
#[must_use]
pub fn format_sample(value: Option<u64>) -> String {
    value.map_or_else(
        || "표본 정보 없음".to_string(),
        |n| format!("표본 {}명", group_thousands(n)),
    )
}

/// `"오차 ±3.1%p"` for a numeric margin, `"오차 <text>"` otherwise.
#[must_use]
pub fn format_margin(value: Option<&MarginOfError>) -> String {
    match value {
        Some(MarginOfError::Points(points)) if points.is_finite() => format!("오차 ±{points}%p"),
        Some(MarginOfError::Text(text)) if !text.trim().is_empty() => {
            let text = text.trim();
            text.parse::<f64>().map_or_else(
                |_| format!("오차 {text}"),
                |points| format!("오차 ±{points}%p"),
            )
        }
        _ => "오차 정보 없음".to_string(),
    }
}

/// Channels joined by `" · "`, or [`MISSING`].
#[must_use]
pub fn join_channels(channels: &[String]) -> String {
    if channels.is_empty() {
        return MISSING.to_string();
    }
    channels.join(" · ")
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
