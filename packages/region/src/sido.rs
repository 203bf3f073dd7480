//! Province-level (sido) reference table.
//!
//! Maps the two-digit region prefix to the official and short Korean
//! names of the 17 province-level administrative units.

/// Prefixes of all current province-level units, in administrative order.
pub const SIDO_PREFIXES: &[&str] = &[
    "11", "26", "27", "28", "29", "30", "31", "36", "41", "42", "43", "44", "45", "46", "47", "48",
    "50",
];

/// Prefix of Sejong Special Self-Governing City.
pub const SEJONG_PREFIX: &str = "36";

/// Maps a two-digit prefix to the official sido name.
///
/// Returns `None` for unrecognized prefixes.
#[must_use]
pub fn sido_name(prefix: &str) -> Option<&'static str> {
    match prefix {
        "11" => Some("서울특별시"),
        "26" => Some("부산광역시"),
        "27" => Some("대구광역시"),
        "28" => Some("인천광역시"),
        "29" => Some("광주광역시"),
        "30" => Some("대전광역시"),
        "31" => Some("울산광역시"),
        "36" => Some("세종특별자치시"),
        "41" => Some("경기도"),
        "42" => Some("강원특별자치도"),
        "43" => Some("충청북도"),
        "44" => Some("충청남도"),
        "45" => Some("전북특별자치도"),
        "46" => Some("전라남도"),
        "47" => Some("경상북도"),
        "48" => Some("경상남도"),
        "50" => Some("제주특별자치도"),
        _ => None,
    }
}

/// Maps a two-digit prefix to the short sido name used in titles
/// (e.g. `"서울"`).
#[must_use]
pub fn sido_short_name(prefix: &str) -> Option<&'static str> {
    match prefix {
        "11" => Some("서울"),
        "26" => Some("부산"),
        "27" => Some("대구"),
        "28" => Some("인천"),
        "29" => Some("광주"),
        "30" => Some("대전"),
        "31" => Some("울산"),
        "36" => Some("세종"),
        "41" => Some("경기"),
        "42" => Some("강원"),
        "43" => Some("충북"),
        "44" => Some("충남"),
        "45" => Some("전북"),
        "46" => Some("전남"),
        "47" => Some("경북"),
        "48" => Some("경남"),
        "50" => Some("제주"),
        _ => None,
    }
}

/// Looks up the sido name for any region code form.
#[must_use]
pub fn sido_name_for_code(code: &str) -> Option<&'static str> {
    crate::region_prefix(code).and_then(sido_name)
}
