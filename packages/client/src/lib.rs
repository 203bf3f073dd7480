#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client for the dashboard API.
//!
//! Fetches the latest map observations and the per-region election list.
//! Items that do not decode are skipped with a warning so one bad row does
//! not empty the map.

use poll_map_election_models::{ElectionCandidateRecord, OFFICIAL_TOPOLOGY};
use poll_map_poll_models::PollObservation;
use reqwest::Url;
use serde::{Deserialize, de::DeserializeOwned};

/// Environment variable holding the API base URL.
pub const API_BASE_ENV: &str = "POLL_MAP_API_BASE";

/// API base URL used when [`API_BASE_ENV`] is unset.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8100";

/// Errors that can occur while talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The base URL could not be turned into a request URL.
    #[error("Invalid URL: {message}")]
    InvalidUrl {
        /// Description of what went wrong.
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct MapLatestResponse {
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

/// Dashboard API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Client for the API at `base` (e.g. `"http://127.0.0.1:8100"`).
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Client for the base URL in [`API_BASE_ENV`], falling back to
    /// [`DEFAULT_API_BASE`].
    #[must_use]
    pub fn from_env() -> Self {
        let base = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base)
    }

    /// Base URL requests are built from.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetches the latest observation feed of the map.
    ///
    /// Malformed items are skipped; see [`decode_observations`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the server answers
    /// with a non-success status, or the body is not a feed object.
    pub async fn fetch_map_latest(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<PollObservation>, ClientError> {
        let url = map_latest_url(&self.base, limit)?;
        let body = self.get(url).await?;
        let response: MapLatestResponse = serde_json::from_str(&body)?;
        let observations = decode_observations(response.items.unwrap_or_default());

        log::info!("Fetched {} map observations", observations.len());
        Ok(observations)
    }

    /// Fetches the election records of a region.
    ///
    /// A body that is not a JSON array decodes as an empty list, and
    /// malformed elements are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the server answers
    /// with a non-success status, or the body is not JSON.
    pub async fn fetch_region_elections(
        &self,
        region_code: &str,
        topology: Option<&str>,
        version_id: Option<&str>,
    ) -> Result<Vec<ElectionCandidateRecord>, ClientError> {
        let url = region_elections_url(&self.base, region_code, topology, version_id)?;
        let body = self.get(url).await?;
        let records = decode_elections(serde_json::from_str(&body)?);

        log::info!(
            "Fetched {} election records for {region_code}",
            records.len()
        );
        Ok(records)
    }

    /// Fetches a static asset, such as the boundary `GeoJSON`, as text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if `url` is invalid, the request fails, or
    /// the server answers with a non-success status.
    pub async fn fetch_asset(&self, url: &str) -> Result<String, ClientError> {
        let url = Url::parse(url).map_err(|e| ClientError::InvalidUrl {
            message: format!("{url}: {e}"),
        })?;
        self.get(url).await
    }

    async fn get(&self, url: Url) -> Result<String, ClientError> {
        log::debug!("GET {url}");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// `{base}/api/v1/dashboard/map-latest[?limit=N]`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] if `base` is not a valid base URL.
pub fn map_latest_url(base: &str, limit: Option<u32>) -> Result<Url, ClientError> {
    let mut url = api_url(base, &["dashboard", "map-latest"])?;
    if let Some(limit) = limit {
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
    }
    Ok(url)
}

/// `{base}/api/v1/regions/{code}/elections?topology=T[&version_id=V]`.
///
/// The region code is percent-encoded. A missing topology means
/// [`OFFICIAL_TOPOLOGY`].
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] if `base` is not a valid base URL.
pub fn region_elections_url(
    base: &str,
    region_code: &str,
    topology: Option<&str>,
    version_id: Option<&str>,
) -> Result<Url, ClientError> {
    let mut url = api_url(base, &["regions", region_code, "elections"])?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("topology", topology.unwrap_or(OFFICIAL_TOPOLOGY));
        if let Some(version_id) = version_id.filter(|v| !v.is_empty()) {
            query.append_pair("version_id", version_id);
        }
    }
    Ok(url)
}

/// Decodes an elections response body. Non-array bodies yield an empty
/// list; elements that are not records are skipped with a warning.
#[must_use]
pub fn decode_elections(body: serde_json::Value) -> Vec<ElectionCandidateRecord> {
    let serde_json::Value::Array(items) = body else {
        log::warn!("Elections response is not an array; treating as empty");
        return Vec::new();
    };
    decode_each(items, "election record")
}

/// Decodes poll feed items, skipping any that are not observations.
#[must_use]
pub fn decode_observations(items: Vec<serde_json::Value>) -> Vec<PollObservation> {
    decode_each(items, "poll observation")
}

fn decode_each<T: DeserializeOwned>(items: Vec<serde_json::Value>, kind: &str) -> Vec<T> {
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| log::warn!("Skipping {kind} #{i}: {e}"))
                .ok()
        })
        .collect();

    if decoded.len() < total {
        log::warn!("Skipped {} of {total} {kind} items", total - decoded.len());
    }
    decoded
}

fn api_url(base: &str, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = Url::parse(base).map_err(|e| ClientError::InvalidUrl {
        message: format!("{base}: {e}"),
    })?;

    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl {
            message: format!("{base} cannot be a base URL"),
        })?
        .pop_if_empty()
        .extend(["api", "v1"])
        .extend(segments);

    Ok(url)
}
