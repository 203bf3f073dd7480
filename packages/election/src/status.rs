//! Status text shown next to each election.

use poll_map_election_models::ElectionCandidateRecord;

/// Status for a record with at least one poll.
pub const STATUS_READY: &str = "데이터 준비 완료";

/// Status for a record without polls.
pub const STATUS_NO_DATA: &str = "조사 데이터 없음";

/// The record's explicit status when non-blank, otherwise a canned status
/// derived from `has_poll_data`.
#[must_use]
pub fn election_status(record: &ElectionCandidateRecord) -> String {
    record
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(if record.has_poll_data {
            STATUS_READY
        } else {
            STATUS_NO_DATA
        })
        .to_string()
}
