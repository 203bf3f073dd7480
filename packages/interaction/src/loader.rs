//! Elections fetch state for the selected region.
//!
//! Each selection change starts a new request generation. A response is
//! applied only if its [`RequestTicket`] still matches the current
//! generation and selection, so a slow response for a previous region can
//! never overwrite the list for the current one.

use std::fmt::Display;

use poll_map_election::resolve_official_slots;
use poll_map_election_models::{ElectionCandidateRecord, RegionContext, ResolvedElection};
use serde::Serialize;

/// Progress of an asynchronous load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum LoadState<T> {
    /// Nothing requested.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Ready(T),
    /// The latest request failed with this message.
    Error(String),
}

impl<T> LoadState<T> {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Identifies one started request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    generation: u64,
    region_code: String,
}

impl RequestTicket {
    /// Region the request was started for.
    #[must_use]
    pub fn region_code(&self) -> &str {
        &self.region_code
    }
}

/// Loads the elections of the selected region.
#[derive(Debug, Default)]
pub struct ElectionLoader {
    generation: u64,
    selection: Option<String>,
    state: LoadState<Vec<ElectionCandidateRecord>>,
}

impl ElectionLoader {
    /// Idle loader with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to a new selection.
    ///
    /// Returns the ticket for the request to start, or `None` when the
    /// selection was cleared. Any outstanding request is superseded either
    /// way.
    pub fn select(&mut self, region_code: Option<&str>) -> Option<RequestTicket> {
        self.generation += 1;
        self.selection = region_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(ToString::to_string);

        let Some(region_code) = self.selection.clone() else {
            self.state = LoadState::Idle;
            return None;
        };

        log::debug!(
            "Loading elections for {region_code} (request {})",
            self.generation
        );
        self.state = LoadState::Loading;

        Some(RequestTicket {
            generation: self.generation,
            region_code,
        })
    }

    /// Applies the outcome of the request behind `ticket`.
    ///
    /// Returns `false` and leaves the state untouched if the request was
    /// superseded.
    pub fn complete<E: Display>(
        &mut self,
        ticket: &RequestTicket,
        result: Result<Vec<ElectionCandidateRecord>, E>,
    ) -> bool {
        if !self.is_current(ticket) {
            log::warn!(
                "Discarding stale elections response for {} (request {}, current {})",
                ticket.region_code,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(records) => LoadState::Ready(records),
            Err(e) => {
                log::error!(
                    "Failed to load elections for {}: {e}",
                    ticket.region_code
                );
                LoadState::Error(e.to_string())
            }
        };
        true
    }

    /// Whether `ticket` belongs to the newest request for the current
    /// selection.
    #[must_use]
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation
            && self.selection.as_deref() == Some(ticket.region_code.as_str())
    }

    /// Currently selected region code.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Load state of the current selection.
    #[must_use]
    pub const fn state(&self) -> &LoadState<Vec<ElectionCandidateRecord>> {
        &self.state
    }

    /// Official slots for the loaded selection, or empty until the load is
    /// ready.
    #[must_use]
    pub fn resolved(&self, region_name: &str) -> Vec<ResolvedElection> {
        match (&self.selection, self.state.ready()) {
            (Some(region_code), Some(records)) => resolve_official_slots(
                records,
                &RegionContext {
                    region_code: region_code.clone(),
                    region_name: region_name.to_string(),
                },
            ),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(matchup_id: &str) -> ElectionCandidateRecord {
        ElectionCandidateRecord {
            matchup_id: matchup_id.to_string(),
            office_type: "광역자치단체장".to_string(),
            source: Some("master".to_string()),
            ..ElectionCandidateRecord::default()
        }
    }

    #[test]
    fn select_starts_loading() {
        let mut loader = ElectionLoader::new();
        assert_eq!(loader.state(), &LoadState::Idle);

        let ticket = loader.select(Some("KR-11")).unwrap();
        assert_eq!(ticket.region_code(), "KR-11");
        assert!(loader.state().is_loading());
        assert!(loader.resolved("서울특별시").is_empty());

        assert!(loader.complete::<String>(&ticket, Ok(vec![record("m-1")])));
        let resolved = loader.resolved("서울특별시");
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].record.matchup_id, "m-1");
        assert!(resolved[1].record.is_placeholder);
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut loader = ElectionLoader::new();
        let first = loader.select(Some("KR-11")).unwrap();
        let second = loader.select(Some("KR-26")).unwrap();

        assert!(!loader.complete::<String>(&first, Ok(vec![record("stale")])));
        assert!(loader.state().is_loading());

        assert!(loader.complete::<String>(&second, Ok(vec![record("fresh")])));
        assert_eq!(loader.state().ready().unwrap()[0].matchup_id, "fresh");
    }

    #[test]
    fn reselecting_same_region_supersedes() {
        let mut loader = ElectionLoader::new();
        let first = loader.select(Some("KR-11")).unwrap();
        let second = loader.select(Some("KR-11")).unwrap();
        assert!(!loader.is_current(&first));
        assert!(loader.is_current(&second));
    }

    #[test]
    fn clearing_resets_to_idle() {
        let mut loader = ElectionLoader::new();
        let ticket = loader.select(Some("KR-11")).unwrap();
        assert!(loader.select(None).is_none());
        assert_eq!(loader.state(), &LoadState::Idle);
        assert_eq!(loader.selection(), None);

        assert!(!loader.complete::<String>(&ticket, Ok(vec![])));
        assert_eq!(loader.state(), &LoadState::Idle);
    }

    #[test]
    fn failure_is_recorded() {
        let mut loader = ElectionLoader::new();
        let ticket = loader.select(Some("KR-11")).unwrap();
        assert!(loader.complete(&ticket, Err("status 500")));
        assert_eq!(loader.state(), &LoadState::Error("status 500".to_string()));
        assert!(loader.resolved("").is_empty());
    }
}
