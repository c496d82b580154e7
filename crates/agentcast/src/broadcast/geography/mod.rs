//! Hierarchical geographic model: state → county → town → neighborhood.
//!
//! Resolution is permissive throughout: unknown states and counties degrade
//! to empty lists, and unrecognized state input normalizes to an uppercased
//! passthrough rather than an error. The UI turns empty lists into an
//! empty-state message.

mod coverage;
mod reference;

pub use coverage::{CoverageSelection, TownSelection};

/// County sentinel meaning "every county in the selected state".
pub const ALL_COUNTIES: &str = "all";

/// Canonicalize a two-letter code or full state name to the two-letter code.
///
/// Unrecognized input is uppercased and passed through unchanged.
pub fn normalize_state_code(input: &str) -> String {
    let trimmed = input.trim();
    for (code, name) in reference::STATE_CODES {
        if code.eq_ignore_ascii_case(trimmed) || name.eq_ignore_ascii_case(trimmed) {
            return (*code).to_string();
        }
    }
    trimmed.to_ascii_uppercase()
}

/// Whether the state carries county→town tables (vs a flat city list).
pub fn has_county_data(state: &str) -> bool {
    reference::region(&normalize_state_code(state))
        .map(|region| !region.counties.is_empty())
        .unwrap_or(false)
}

/// Resolve the town list for a state and county.
///
/// County `"all"` (or blank) unions every county's towns; a named county is
/// matched case-insensitively, ignoring an optional trailing `"County"`.
/// The result is lexicographically sorted and deduplicated.
pub fn resolve_towns(state: &str, county: &str) -> Vec<String> {
    let code = normalize_state_code(state);
    let Some(region) = reference::region(&code) else {
        return Vec::new();
    };

    let mut towns: Vec<String> = if region.counties.is_empty() {
        region.cities.iter().map(|city| (*city).to_string()).collect()
    } else if county_is_all(county) {
        region
            .counties
            .iter()
            .flat_map(|entry| entry.towns.iter())
            .map(|town| (*town).to_string())
            .collect()
    } else {
        let wanted = canonical_county(county);
        region
            .counties
            .iter()
            .filter(|entry| entry.county.eq_ignore_ascii_case(&wanted))
            .flat_map(|entry| entry.towns.iter())
            .map(|town| (*town).to_string())
            .collect()
    };

    towns.sort();
    towns.dedup();
    towns
}

/// Resolve the neighborhood-level sub-areas under a town, sorted.
///
/// Sub-areas live in their own lookup and are never mixed into a town list.
pub fn resolve_sub_areas(state: &str, town: &str) -> Vec<String> {
    let code = normalize_state_code(state);
    let Some(region) = reference::region(&code) else {
        return Vec::new();
    };

    let mut areas: Vec<String> = region
        .sub_areas
        .iter()
        .filter(|(parent, _)| parent.eq_ignore_ascii_case(town.trim()))
        .flat_map(|(_, list)| list.iter())
        .map(|area| (*area).to_string())
        .collect();

    areas.sort();
    areas
}

fn county_is_all(county: &str) -> bool {
    let trimmed = county.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_COUNTIES)
}

fn canonical_county(county: &str) -> String {
    let lowered = county.trim().to_ascii_lowercase();
    match lowered.strip_suffix("county") {
        Some(prefix) => prefix.trim_end().to_string(),
        None => lowered,
    }
}
