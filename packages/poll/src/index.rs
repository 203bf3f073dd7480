//! Latest observation per region key.
//!
//! Each observation is filed under every key it can answer for: its own
//! region code, its audience region code, and the province-level
//! generalization of either when they name a sub-region. Under each key
//! the observation with the greatest survey end date wins; on equal dates
//! the later observation in input order wins.

use std::collections::{BTreeMap, BTreeSet};

use poll_map_poll_models::PollObservation;
use poll_map_region::{generalize, is_specific_region_code, to_api_code};

/// Freshest observation per region key.
#[derive(Debug, Clone, Default)]
pub struct LatestObservationIndex {
    observations: Vec<PollObservation>,
    by_key: BTreeMap<String, usize>,
}

impl LatestObservationIndex {
    /// Builds the index from observations in arrival order.
    #[must_use]
    pub fn build(observations: impl IntoIterator<Item = PollObservation>) -> Self {
        let observations: Vec<PollObservation> = observations.into_iter().collect();
        let mut by_key: BTreeMap<String, usize> = BTreeMap::new();

        for (idx, observation) in observations.iter().enumerate() {
            for key in candidate_keys(observation) {
                let replace = by_key
                    .get(&key)
                    .is_none_or(|&existing| is_fresher_or_equal(observation, &observations[existing]));
                if replace {
                    by_key.insert(key, idx);
                }
            }
        }

        log::debug!(
            "Indexed {} poll observations under {} region keys",
            observations.len(),
            by_key.len()
        );

        Self {
            observations,
            by_key,
        }
    }

    /// Returns the freshest observation filed under exactly `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PollObservation> {
        self.by_key.get(key).map(|&idx| &self.observations[idx])
    }

    /// Returns `true` if any observation is filed under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Looks up a region by any code form.
    ///
    /// Tries `code` as given, then, for map form or a bare prefix, its
    /// province-level API form (`"KR-11"` and `"11"` both fall back to
    /// `"11-000"`). A sub-region code never falls back to its province.
    #[must_use]
    pub fn lookup_region(&self, code: &str) -> Option<&PollObservation> {
        let code = code.trim();
        self.get(code).or_else(|| {
            if is_specific_region_code(code) {
                return None;
            }
            to_api_code(code).and_then(|api| self.get(&api))
        })
    }

    /// Number of distinct region keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` if no observation produced a key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Iterates over region keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_key.keys().map(String::as_str)
    }

    /// Iterates over `(key, observation)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PollObservation)> + '_ {
        self.by_key
            .iter()
            .map(|(key, &idx)| (key.as_str(), &self.observations[idx]))
    }
}

impl FromIterator<PollObservation> for LatestObservationIndex {
    fn from_iter<I: IntoIterator<Item = PollObservation>>(iter: I) -> Self {
        Self::build(iter)
    }
}

/// Keys an observation is filed under.
fn candidate_keys(observation: &PollObservation) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();

    for code in [&observation.region_code, &observation.audience_region_code] {
        let Some(code) = code.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        keys.insert(code.to_string());
        if let Some(general) = generalize(code) {
            keys.insert(general);
        }
    }

    keys
}

/// Missing dates sort first, so a dated observation always replaces an
/// undated one.
fn is_fresher_or_equal(next: &PollObservation, existing: &PollObservation) -> bool {
    let next_date = next.survey_end_date.as_deref().unwrap_or_default();
    let existing_date = existing.survey_end_date.as_deref().unwrap_or_default();
    next_date >= existing_date
}
