//! Reduces candidate records to one representative per office slot.

use std::collections::BTreeMap;

use poll_map_election_models::{
    ElectionCandidateRecord, GENERATED_SOURCE, METRO_OFFICE_TYPES, OFFICIAL_TOPOLOGY, OfficeType,
    RegionContext, ResolvedElection,
};
use poll_map_region::normalize_region_param;

use crate::{
    priority::pick_representative,
    status::{STATUS_NO_DATA, election_status},
    title::fallback_title,
};

/// Resolves exactly one election per entry of `slots`, in slot order.
///
/// Records whose office type is unrecognized or not among `slots` are
/// dropped. Each remaining group is reduced with [`pick_representative`];
/// slots without any record get a [`placeholder_election`]. Every returned
/// record carries the canonical office label and a non-empty status.
#[must_use]
pub fn resolve_slots(
    records: &[ElectionCandidateRecord],
    slots: &[OfficeType],
    ctx: &RegionContext,
) -> Vec<ResolvedElection> {
    let mut representatives: BTreeMap<OfficeType, ElectionCandidateRecord> = BTreeMap::new();

    for record in records {
        let Some(office) = OfficeType::parse_label(&record.office_type) else {
            log::debug!(
                "Dropping election {} with unrecognized office type {:?}",
                record.matchup_id,
                record.office_type
            );
            continue;
        };

        if !slots.contains(&office) {
            log::debug!(
                "Dropping election {} for office {office} outside the requested slots",
                record.matchup_id
            );
            continue;
        }

        let current = representatives.remove(&office);
        representatives.insert(office, pick_representative(current, record.clone()));
    }

    slots
        .iter()
        .map(|&slot| {
            let mut record = representatives
                .get(&slot)
                .cloned()
                .unwrap_or_else(|| placeholder_election(slot, ctx));
            record.office_type = slot.label().to_string();
            record.status = Some(election_status(&record));
            ResolvedElection { slot, record }
        })
        .collect()
}

/// Resolves the province-level slots: metro head, metro council, and
/// superintendent.
#[must_use]
pub fn resolve_official_slots(
    records: &[ElectionCandidateRecord],
    ctx: &RegionContext,
) -> Vec<ResolvedElection> {
    resolve_slots(records, &METRO_OFFICE_TYPES, ctx)
}

/// Synthesizes the stand-in record for a slot without data.
#[must_use]
pub fn placeholder_election(office: OfficeType, ctx: &RegionContext) -> ElectionCandidateRecord {
    let region_code = normalize_region_param(Some(&ctx.region_code))
        .normalized
        .unwrap_or_default();

    ElectionCandidateRecord {
        matchup_id: format!("placeholder|{office}|{region_code}"),
        title: fallback_title(&region_code, &ctx.region_name, office),
        office_type: office.label().to_string(),
        region_code,
        topology: Some(OFFICIAL_TOPOLOGY.to_string()),
        topology_version_id: None,
        source: Some(GENERATED_SOURCE.to_string()),
        is_active: true,
        is_fallback: true,
        is_placeholder: true,
        has_poll_data: false,
        has_candidate_data: false,
        latest_survey_end_date: None,
        latest_matchup_id: None,
        status: Some(STATUS_NO_DATA.to_string()),
    }
}
