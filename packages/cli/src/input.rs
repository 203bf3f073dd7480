//! Input loading for the subcommands.
//!
//! Every input can come from a local JSON file; when no file is given the
//! data is fetched through [`ApiClient`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use poll_map_client::{ApiClient, decode_elections, decode_observations};
use poll_map_election::master::RegionOffice;
use poll_map_election_models::{ElectionCandidateRecord, MasterRegion};
use poll_map_geography::load::load_feature_collection_file;
use poll_map_geography_models::GeoFeature;
use poll_map_poll_models::PollObservation;
use poll_map_region::sido::sido_name_for_code;
use serde::Deserialize;

/// Environment variable holding the boundary asset path or URL.
pub const GEOJSON_ENV: &str = "POLL_MAP_GEOJSON";

/// Boundary asset used when neither a flag nor [`GEOJSON_ENV`] is set.
pub const DEFAULT_GEOJSON: &str = "public/geo/kr_adm1_simplified.geojson";

/// A poll feed file: either the API's `{"items": [...]}` envelope or a bare
/// array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ObservationFile {
    Envelope { items: Vec<serde_json::Value> },
    List(Vec<serde_json::Value>),
}

impl ObservationFile {
    fn into_items(self) -> Vec<PollObservation> {
        match self {
            Self::Envelope { items } | Self::List(items) => decode_observations(items),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestMatchup {
    region_code: String,
    office_type: String,
    matchup_id: String,
}

#[derive(Debug, Deserialize)]
struct ObservedOffice {
    region_code: String,
    office_type: String,
}

/// Code-master input file.
#[derive(Debug, Deserialize)]
struct MasterFile {
    regions: Vec<MasterRegion>,
    #[serde(default)]
    latest_matchups: Vec<LatestMatchup>,
    #[serde(default)]
    byelections: Vec<ObservedOffice>,
}

/// Inputs of [`poll_map_election::build_master_slots`].
pub struct MasterInput {
    pub regions: Vec<MasterRegion>,
    pub latest_matchup_by_pair: BTreeMap<RegionOffice, String>,
    pub observed_byelection_pairs: BTreeSet<RegionOffice>,
}

/// Resolves the boundary asset location: flag, then env, then default.
#[must_use]
pub fn geojson_location(flag: Option<String>) -> String {
    flag.unwrap_or_else(|| {
        std::env::var(GEOJSON_ENV).unwrap_or_else(|_| DEFAULT_GEOJSON.to_string())
    })
}

/// Loads boundary features from a path or an `http(s)` URL.
///
/// # Errors
///
/// Returns an error if the asset cannot be read, fetched, or parsed.
pub async fn load_features(
    client: &ApiClient,
    location: &str,
) -> Result<Vec<GeoFeature>, Box<dyn std::error::Error>> {
    if is_remote(location) {
        let json = client.fetch_asset(location).await?;
        Ok(poll_map_geography::load_feature_collection(&json)?)
    } else {
        Ok(load_feature_collection_file(Path::new(location))?)
    }
}

/// Loads poll observations from `path`, or the API's latest feed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the fetch
/// fails.
pub async fn load_observations(
    client: &ApiClient,
    path: Option<&Path>,
    limit: Option<u32>,
) -> Result<Vec<PollObservation>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(parse_observations(&std::fs::read_to_string(path)?)?),
        None => Ok(client.fetch_map_latest(limit).await?),
    }
}

/// Display name for placeholder titles: the flag, else the province name of
/// `region`.
#[must_use]
pub fn region_display_name(flag: Option<String>, region: &str) -> String {
    flag.or_else(|| sido_name_for_code(region).map(ToString::to_string))
        .unwrap_or_default()
}

/// Loads election records from `path`. Fetching is driven by the caller so
/// superseded requests can be tracked.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON.
pub fn read_elections(
    path: &Path,
) -> Result<Vec<ElectionCandidateRecord>, Box<dyn std::error::Error>> {
    let body: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    Ok(decode_elections(body))
}

/// Loads a code-master input file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_master(path: &Path) -> Result<MasterInput, Box<dyn std::error::Error>> {
    Ok(parse_master(&std::fs::read_to_string(path)?)?)
}

fn parse_observations(json: &str) -> Result<Vec<PollObservation>, serde_json::Error> {
    serde_json::from_str::<ObservationFile>(json).map(ObservationFile::into_items)
}

fn parse_master(json: &str) -> Result<MasterInput, serde_json::Error> {
    let file: MasterFile = serde_json::from_str(json)?;

    Ok(MasterInput {
        regions: file.regions,
        latest_matchup_by_pair: file
            .latest_matchups
            .into_iter()
            .map(|m| ((m.region_code, m.office_type), m.matchup_id))
            .collect(),
        observed_byelection_pairs: file
            .byelections
            .into_iter()
            .map(|o| (o.region_code, o.office_type))
            .collect(),
    })
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
