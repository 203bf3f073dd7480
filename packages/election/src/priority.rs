//! Priority scoring and tie-breaking between records for the same slot.

use std::cmp::Ordering;

use poll_map_election_models::{ElectionCandidateRecord, OFFICIAL_TOPOLOGY};

/// Source tags that come from the curated election master.
pub const PRIMARY_SOURCES: &[&str] = &["master", "code_master"];

const OFFICIAL_WEIGHT: u32 = 100;
const PRIMARY_SOURCE_WEIGHT: u32 = 50;
const NOT_FALLBACK_WEIGHT: u32 = 20;
const NOT_PLACEHOLDER_WEIGHT: u32 = 12;
const POLL_DATA_WEIGHT: u32 = 8;
const CANDIDATE_DATA_WEIGHT: u32 = 4;
const ACTIVE_WEIGHT: u32 = 2;

/// Sums the weighted quality signals of a record. Higher is better.
#[must_use]
pub fn election_priority(record: &ElectionCandidateRecord) -> u32 {
    let source = record
        .source
        .as_deref()
        .map(|s| s.trim().to_ascii_lowercase())
        .unwrap_or_default();

    [
        (record.topology() == OFFICIAL_TOPOLOGY, OFFICIAL_WEIGHT),
        (
            PRIMARY_SOURCES.contains(&source.as_str()),
            PRIMARY_SOURCE_WEIGHT,
        ),
        (!record.is_fallback, NOT_FALLBACK_WEIGHT),
        (!record.is_placeholder, NOT_PLACEHOLDER_WEIGHT),
        (record.has_poll_data, POLL_DATA_WEIGHT),
        (record.has_candidate_data, CANDIDATE_DATA_WEIGHT),
        (record.is_active, ACTIVE_WEIGHT),
    ]
    .into_iter()
    .filter_map(|(signal, weight)| signal.then_some(weight))
    .sum()
}

/// Total order used to pick a representative: priority, then latest survey
/// date (missing sorts first), then matchup id.
#[must_use]
pub fn compare_candidates(a: &ElectionCandidateRecord, b: &ElectionCandidateRecord) -> Ordering {
    election_priority(a)
        .cmp(&election_priority(b))
        .then_with(|| sortable_date(a).cmp(sortable_date(b)))
        .then_with(|| a.matchup_id.cmp(&b.matchup_id))
}

/// Keeps `current` unless `next` strictly outranks it.
#[must_use]
pub fn pick_representative(
    current: Option<ElectionCandidateRecord>,
    next: ElectionCandidateRecord,
) -> ElectionCandidateRecord {
    match current {
        Some(current) if compare_candidates(&next, &current) != Ordering::Greater => current,
        _ => next,
    }
}

fn sortable_date(record: &ElectionCandidateRecord) -> &str {
    record
        .latest_survey_end_date
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(matchup_id: &str) -> ElectionCandidateRecord {
        ElectionCandidateRecord {
            matchup_id: matchup_id.to_string(),
            topology: Some("scenario".to_string()),
            is_fallback: true,
            is_placeholder: true,
            ..ElectionCandidateRecord::default()
        }
    }

    #[test]
    fn zero_signal_record_scores_zero() {
        let mut scenario = record("b");
        scenario.source = Some("article".to_string());
        assert_eq!(election_priority(&scenario), 0);
    }

    #[test]
    fn all_signals_sum() {
        let full = ElectionCandidateRecord {
            topology: None,
            source: Some(" Master ".to_string()),
            is_active: true,
            has_poll_data: true,
            has_candidate_data: true,
            ..ElectionCandidateRecord::default()
        };
        assert_eq!(election_priority(&full), 100 + 50 + 20 + 12 + 8 + 4 + 2);
    }

    #[test]
    fn official_master_signals() {
        let official = ElectionCandidateRecord {
            topology: Some("official".to_string()),
            source: Some("master".to_string()),
            is_active: true,
            has_poll_data: true,
            is_fallback: true,
            is_placeholder: true,
            ..ElectionCandidateRecord::default()
        };
        assert_eq!(election_priority(&official), 160);

        let official = ElectionCandidateRecord {
            is_placeholder: false,
            is_fallback: false,
            ..official
        };
        assert_eq!(election_priority(&official), 192);
    }

    #[test]
    fn code_master_is_primary() {
        let mut rec = record("a");
        rec.source = Some("code_master".to_string());
        assert_eq!(election_priority(&rec), 50);
    }

    #[test]
    fn later_date_breaks_priority_tie() {
        let mut older = record("z");
        older.latest_survey_end_date = Some("2026-01-01".to_string());
        let mut newer = record("a");
        newer.latest_survey_end_date = Some("2026-02-01".to_string());

        assert_eq!(compare_candidates(&newer, &older), Ordering::Greater);

        let mut undated = record("zz");
        undated.latest_survey_end_date = None;
        assert_eq!(compare_candidates(&older, &undated), Ordering::Greater);
    }

    #[test]
    fn matchup_id_breaks_date_tie() {
        let a = record("m-001");
        let b = record("m-002");
        assert_eq!(compare_candidates(&b, &a), Ordering::Greater);
    }

    #[test]
    fn pick_keeps_current_on_full_tie() {
        let first = record("same");
        let mut second = record("same");
        second.title = "second".to_string();
        let picked = pick_representative(Some(first), second);
        assert_eq!(picked.title, "");
    }

    #[test]
    fn pick_takes_next_when_empty() {
        let picked = pick_representative(None, record("only"));
        assert_eq!(picked.matchup_id, "only");
    }
}
