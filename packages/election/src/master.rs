//! Slot records generated from the election code master.
//!
//! Every region in the master gets one record per default office of its
//! administrative level. Offices with an observed by-election in that
//! region are appended after the defaults.

use std::collections::{BTreeMap, BTreeSet};

use poll_map_election_models::{
    AdminLevel, CODE_MASTER_SOURCE, ElectionCandidateRecord, MasterRegion,
};

/// Sigungu name used for the province itself.
pub const WHOLE_PROVINCE: &str = "전체";

/// A `(region_code, office_label)` pair.
pub type RegionOffice = (String, String);

/// Builds the code-master slot records for `regions`, in region order.
///
/// Regions with a blank code are skipped. `latest_matchup_by_pair` maps a
/// region/office pair to the matchup holding its latest poll; a slot has
/// poll data exactly when it has an entry there.
#[must_use]
pub fn build_master_slots(
    regions: &[MasterRegion],
    latest_matchup_by_pair: &BTreeMap<RegionOffice, String>,
    observed_byelection_pairs: &BTreeSet<RegionOffice>,
) -> Vec<ElectionCandidateRecord> {
    let mut slots = Vec::new();

    for region in regions {
        let region_code = region.region_code.trim();
        if region_code.is_empty() {
            log::debug!("Skipping master region without a code: {region:?}");
            continue;
        }

        let mut offices: Vec<String> = region
            .admin_level
            .unwrap_or(AdminLevel::Sido)
            .default_office_types()
            .iter()
            .map(|office| office.label().to_string())
            .collect();

        for (_, office) in observed_byelection_pairs
            .iter()
            .filter(|(code, _)| code == region_code)
        {
            if !offices.contains(office) {
                offices.push(office.clone());
            }
        }

        for office in offices {
            let latest_matchup_id = latest_matchup_by_pair
                .get(&(region_code.to_string(), office.clone()))
                .filter(|id| !id.is_empty())
                .cloned();

            slots.push(ElectionCandidateRecord {
                matchup_id: slot_matchup_id(region_code, &office),
                region_code: region_code.to_string(),
                title: slot_title(region, &office),
                source: Some(CODE_MASTER_SOURCE.to_string()),
                is_active: true,
                has_poll_data: latest_matchup_id.is_some(),
                latest_matchup_id,
                office_type: office,
                ..ElectionCandidateRecord::default()
            });
        }
    }

    slots
}

/// `"master|{office}|{region_code}"`.
#[must_use]
pub fn slot_matchup_id(region_code: &str, office: &str) -> String {
    format!("master|{office}|{region_code}")
}

/// Title of a code-master slot.
///
/// Sigungu regions with a real sigungu name read
/// `"{sido} {sigungu} {office}"`; everything else reads `"{sido} {office}"`.
#[must_use]
pub fn slot_title(region: &MasterRegion, office: &str) -> String {
    let sido = region.sido_name.trim();
    let sigungu = region
        .sigungu_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != WHOLE_PROVINCE);

    let title = match (region.admin_level, sigungu) {
        (Some(AdminLevel::Sigungu), Some(sigungu)) => format!("{sido} {sigungu} {office}"),
        _ => format!("{sido} {office}"),
    };

    title.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seoul() -> MasterRegion {
        MasterRegion {
            region_code: "11-000".to_string(),
            sido_name: "서울특별시".to_string(),
            sigungu_name: Some(WHOLE_PROVINCE.to_string()),
            admin_level: Some(AdminLevel::Sido),
        }
    }

    fn jongno() -> MasterRegion {
        MasterRegion {
            region_code: "11-110".to_string(),
            sido_name: "서울특별시".to_string(),
            sigungu_name: Some("종로구".to_string()),
            admin_level: Some(AdminLevel::Sigungu),
        }
    }

    fn pair(code: &str, office: &str) -> RegionOffice {
        (code.to_string(), office.to_string())
    }

    #[test]
    fn sido_region_gets_metro_slots() {
        let mut latest = BTreeMap::new();
        latest.insert(pair("11-000", "교육감"), "m-7".to_string());

        let slots = build_master_slots(&[seoul()], &latest, &BTreeSet::new());

        assert_eq!(
            slots.iter().map(|s| s.office_type.as_str()).collect::<Vec<_>>(),
            ["광역자치단체장", "광역의회", "교육감"]
        );
        assert_eq!(slots[0].matchup_id, "master|광역자치단체장|11-000");
        assert_eq!(slots[0].title, "서울특별시 광역자치단체장");
        assert_eq!(slots[0].source.as_deref(), Some("code_master"));
        assert!(slots[0].is_active);
        assert!(!slots[0].has_poll_data);

        assert!(slots[2].has_poll_data);
        assert_eq!(slots[2].latest_matchup_id.as_deref(), Some("m-7"));
    }

    #[test]
    fn sigungu_region_gets_local_slots_and_full_title() {
        let slots = build_master_slots(&[jongno()], &BTreeMap::new(), &BTreeSet::new());

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].title, "서울특별시 종로구 기초자치단체장");
        assert_eq!(slots[1].matchup_id, "master|기초의회|11-110");
    }

    #[test]
    fn observed_byelections_are_appended_once() {
        let observed: BTreeSet<_> = [
            pair("11-110", "국회의원"),
            pair("11-110", "기초의회"),
            pair("26-000", "교육감"),
        ]
        .into_iter()
        .collect();

        let slots = build_master_slots(&[jongno()], &BTreeMap::new(), &observed);

        assert_eq!(
            slots.iter().map(|s| s.office_type.as_str()).collect::<Vec<_>>(),
            ["기초자치단체장", "기초의회", "국회의원"]
        );
    }

    #[test]
    fn blank_codes_are_skipped() {
        let blank = MasterRegion {
            region_code: "  ".to_string(),
            ..seoul()
        };
        let slots = build_master_slots(&[blank, seoul()], &BTreeMap::new(), &BTreeSet::new());
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn missing_level_defaults_to_sido() {
        let region = MasterRegion {
            admin_level: None,
            sigungu_name: Some("종로구".to_string()),
            ..seoul()
        };
        let slots = build_master_slots(&[region], &BTreeMap::new(), &BTreeSet::new());
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[1].title, "서울특별시 광역의회");
    }

    #[test]
    fn title_without_names_is_office_label() {
        let region = MasterRegion {
            region_code: "99-000".to_string(),
            ..MasterRegion::default()
        };
        assert_eq!(slot_title(&region, "교육감"), "교육감");
    }
}
