#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the regional poll map engine.
//!
//! Every subcommand prints pretty JSON to stdout. Inputs are read from
//! files when given and fetched from the dashboard API otherwise.

mod input;

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use poll_map_client::ApiClient;
use poll_map_election::build_master_slots;
use poll_map_election_models::{ElectionCandidateRecord, ResolvedElection};
use poll_map_geography::{
    project,
    svg::{RegionStyle, render_svg},
};
use poll_map_geography_models::CanvasSize;
use poll_map_interaction::{ElectionLoader, InteractionState, LoadState};
use poll_map_poll::{LatestObservationIndex, ObservationMeta};
use poll_map_poll_models::PollObservation;
use poll_map_region::{
    RegionCodeNormalization, RegionParam, canonicalize, normalize_region_param, region_prefix,
    sido::sido_name, to_api_code, to_map_code,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "poll_map", about = "Regional poll map engine")]
struct Cli {
    /// Dashboard API base URL (overrides `POLL_MAP_API_BASE`)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every normalized form of a region code
    Normalize {
        /// Region code in any form (e.g. "KR-11", "11", "11-680")
        code: String,
    },
    /// Project the boundary asset onto the canvas
    Project {
        /// Boundary `GeoJSON` path or URL (overrides `POLL_MAP_GEOJSON`)
        #[arg(long)]
        geojson: Option<String>,
        #[arg(long, default_value = "760")]
        width: f64,
        #[arg(long, default_value = "900")]
        height: f64,
        #[arg(long, default_value = "30")]
        padding: f64,
        /// Also write a standalone SVG to this path
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Poll feed used to shade regions with data in the SVG
        #[arg(long)]
        polls: Option<PathBuf>,
        /// Region drawn as selected in the SVG
        #[arg(long)]
        selected: Option<String>,
    },
    /// Build the latest-observation index
    Latest {
        /// Poll feed file (`{"items": [...]}` or an array). Fetched when omitted.
        #[arg(long)]
        polls: Option<PathBuf>,
        /// Only show the detail meta for this region
        #[arg(long)]
        region: Option<String>,
        /// Maximum number of observations to fetch
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Resolve the official election slots of a region
    Elections {
        /// Region code in any form
        #[arg(long)]
        region: String,
        /// Region display name used in placeholder titles
        #[arg(long)]
        region_name: Option<String>,
        /// Election records file. Fetched when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Dataset topology to query
        #[arg(long)]
        topology: Option<String>,
        /// Dataset version within the topology
        #[arg(long)]
        version_id: Option<String>,
    },
    /// Generate code-master slot records
    Master {
        /// JSON file with `regions`, `latest_matchups`, and `byelections`
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct NormalizedCode {
    prefix: Option<String>,
    map_code: Option<String>,
    api_code: Option<String>,
    sido_name: Option<&'static str>,
    param: RegionParam,
    canonical: RegionCodeNormalization,
}

#[derive(Serialize)]
struct RegionLatest<'a> {
    region_code: String,
    observation: Option<&'a PollObservation>,
    meta: ObservationMeta,
}

#[derive(Serialize)]
struct ElectionEntry<'a> {
    #[serde(flatten)]
    election: &'a ResolvedElection,
    navigation_matchup_id: Option<&'a str>,
}

#[allow(clippy::too_many_lines)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let client = cli.api_base.map_or_else(ApiClient::from_env, ApiClient::new);

    match cli.command {
        Commands::Normalize { code } => {
            let prefix = region_prefix(&code);
            print_json(&NormalizedCode {
                prefix: prefix.map(ToString::to_string),
                map_code: to_map_code(&code),
                api_code: to_api_code(&code),
                sido_name: prefix.and_then(sido_name),
                param: normalize_region_param(Some(&code)),
                canonical: canonicalize(&code),
            })?;
        }
        Commands::Project {
            geojson,
            width,
            height,
            padding,
            svg,
            polls,
            selected,
        } => {
            let location = input::geojson_location(geojson);
            let features = input::load_features(&client, &location).await?;
            let canvas = CanvasSize {
                width,
                height,
                padding,
            };
            let projected = project(&features, canvas);
            log::info!("Projected {} regions from {location}", projected.len());

            if let Some(out) = svg {
                let observations = match polls {
                    Some(path) => {
                        input::load_observations(&client, Some(path.as_path()), None).await?
                    }
                    None => Vec::new(),
                };
                let index = LatestObservationIndex::build(observations);
                let interaction = InteractionState::with_selection(selected);

                let document = render_svg(&features, &projected, canvas, |feature| {
                    if interaction.is_active(&feature.region_code) {
                        RegionStyle::Active
                    } else if index.lookup_region(&feature.region_code).is_some() {
                        RegionStyle::WithData
                    } else {
                        RegionStyle::NoData
                    }
                });
                std::fs::write(&out, document)?;
                log::info!("Wrote {}", out.display());
            }

            print_json(&projected)?;
        }
        Commands::Latest {
            polls,
            region,
            limit,
        } => {
            let observations = input::load_observations(&client, polls.as_deref(), limit).await?;
            let index = LatestObservationIndex::build(observations);
            log::info!("Indexed {} region keys", index.len());

            if let Some(region) = region {
                let observation = index.lookup_region(&region);
                print_json(&RegionLatest {
                    meta: ObservationMeta::for_region(observation),
                    region_code: region,
                    observation,
                })?;
            } else {
                print_json(&index.iter().collect::<BTreeMap<_, _>>())?;
            }
        }
        Commands::Elections {
            region,
            region_name,
            file,
            topology,
            version_id,
        } => {
            let param = normalize_region_param(Some(&region));
            if param.corrected {
                log::info!(
                    "Normalized region {} to {}",
                    param.input,
                    param.normalized.as_deref().unwrap_or_default()
                );
            }

            let mut loader = ElectionLoader::new();
            let Some(ticket) = loader.select(param.normalized.as_deref()) else {
                return Err("region code must not be empty".into());
            };

            let result: Result<Vec<ElectionCandidateRecord>, Box<dyn std::error::Error>> =
                match &file {
                    Some(path) => input::read_elections(path),
                    None => client
                        .fetch_region_elections(
                            ticket.region_code(),
                            topology.as_deref(),
                            version_id.as_deref(),
                        )
                        .await
                        .map_err(Into::into),
                };
            loader.complete(&ticket, result);

            if let LoadState::Error(message) = loader.state() {
                return Err(message.clone().into());
            }

            let region_name = input::region_display_name(region_name, &region);
            let resolved = loader.resolved(&region_name);
            let entries: Vec<ElectionEntry> = resolved
                .iter()
                .map(|election| ElectionEntry {
                    election,
                    navigation_matchup_id: election.navigation_matchup_id(),
                })
                .collect();
            print_json(&entries)?;
        }
        Commands::Master { file } => {
            let master = input::read_master(&file)?;
            let slots = build_master_slots(
                &master.regions,
                &master.latest_matchup_by_pair,
                &master.observed_byelection_pairs,
            );
            log::info!(
                "Generated {} slots for {} regions",
                slots.len(),
                master.regions.len()
            );
            print_json(&slots)?;
        }
    }

    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
