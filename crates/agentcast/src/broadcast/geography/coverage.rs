use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{normalize_state_code, resolve_towns, ALL_COUNTIES};

/// One entry in a coverage selection: a whole town, or a single
/// neighborhood-level sub-area inside a town.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TownSelection {
    pub town: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_area: Option<String>,
}

impl TownSelection {
    pub fn whole_town(town: impl Into<String>) -> Self {
        Self {
            town: town.into(),
            sub_area: None,
        }
    }

    pub fn sub_area(town: impl Into<String>, sub_area: impl Into<String>) -> Self {
        Self {
            town: town.into(),
            sub_area: Some(sub_area.into()),
        }
    }

    pub fn is_sub_area(&self) -> bool {
        self.sub_area.is_some()
    }

    /// Display label: `"Town – SubArea"` for a sub-area selection, the bare
    /// town name otherwise.
    pub fn label(&self) -> String {
        match &self.sub_area {
            Some(area) => format!("{} – {}", self.town, area),
            None => self.town.clone(),
        }
    }
}

/// A mutable geographic selection: the state and county scope plus the chosen
/// towns and sub-areas within it.
///
/// Used both for an agent's saved coverage settings and for the transient
/// filter attached to a single broadcast. Selecting a whole town supersedes
/// any of its sub-area entries; narrowing the state or county scope always
/// clears the town set rather than leaving it stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSelection {
    state: String,
    county: String,
    towns: BTreeSet<TownSelection>,
    include_sub_areas: bool,
}

impl CoverageSelection {
    pub fn new(state: &str) -> Self {
        Self {
            state: normalize_state_code(state),
            county: ALL_COUNTIES.to_string(),
            towns: BTreeSet::new(),
            include_sub_areas: false,
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn county(&self) -> &str {
        &self.county
    }

    pub fn towns(&self) -> &BTreeSet<TownSelection> {
        &self.towns
    }

    pub fn include_sub_areas(&self) -> bool {
        self.include_sub_areas
    }

    pub fn set_include_sub_areas(&mut self, include: bool) {
        self.include_sub_areas = include;
    }

    /// Switch state: county resets to `"all"` and the town set clears.
    pub fn select_state(&mut self, state: &str) {
        self.state = normalize_state_code(state);
        self.county = ALL_COUNTIES.to_string();
        self.towns.clear();
    }

    /// Switch county scope; the town set is re-derived for the new scope,
    /// never carried over.
    pub fn select_county(&mut self, county: &str) {
        self.county = county.trim().to_string();
        self.towns.clear();
    }

    /// Toggle a whole-town selection. Adding a town removes any sub-area
    /// entries it supersedes; removing it also removes all of its sub-areas.
    pub fn toggle_town(&mut self, town: &str) {
        let entry = TownSelection::whole_town(town);
        if self.towns.contains(&entry) {
            self.remove_town_entries(town);
        } else {
            self.remove_sub_area_entries(town);
            self.towns.insert(entry);
        }
    }

    /// Toggle one sub-area entry. The bare town entry is never touched.
    pub fn toggle_sub_area(&mut self, town: &str, sub_area: &str) {
        let entry = TownSelection::sub_area(town, sub_area);
        if !self.towns.remove(&entry) {
            self.towns.insert(entry);
        }
    }

    /// Select every town in the currently resolved scope, whole-town only.
    pub fn select_all(&mut self) {
        for town in resolve_towns(&self.state, &self.county) {
            let entry = TownSelection::whole_town(town.as_str());
            if !self.towns.contains(&entry) {
                self.remove_sub_area_entries(&town);
                self.towns.insert(entry);
            }
        }
    }

    /// Clear every selection within the currently resolved scope.
    pub fn clear_all(&mut self) {
        for town in resolve_towns(&self.state, &self.county) {
            self.remove_town_entries(&town);
        }
    }

    pub fn is_town_selected(&self, town: &str) -> bool {
        self.towns.contains(&TownSelection::whole_town(town))
    }

    pub fn is_sub_area_selected(&self, town: &str, sub_area: &str) -> bool {
        self.towns.contains(&TownSelection::sub_area(town, sub_area))
    }

    /// Distinct towns covered by the selection, whether whole-town or through
    /// a sub-area entry.
    pub fn selected_towns(&self) -> BTreeSet<String> {
        self.towns.iter().map(|entry| entry.town.clone()).collect()
    }

    /// Display labels for every entry, in set order.
    pub fn labels(&self) -> Vec<String> {
        self.towns.iter().map(TownSelection::label).collect()
    }

    fn remove_town_entries(&mut self, town: &str) {
        self.towns.retain(|entry| entry.town != town);
    }

    fn remove_sub_area_entries(&mut self, town: &str) {
        self.towns
            .retain(|entry| !(entry.town == town && entry.sub_area.is_some()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_defaults_to_all_counties() {
        let selection = CoverageSelection::new("massachusetts");
        assert_eq!(selection.state(), "MA");
        assert_eq!(selection.county(), ALL_COUNTIES);
        assert!(selection.towns().is_empty());
        assert!(!selection.include_sub_areas());
    }

    #[test]
    fn sub_area_granularity_is_an_explicit_toggle() {
        let mut selection = CoverageSelection::new("MA");
        selection.set_include_sub_areas(true);
        assert!(selection.include_sub_areas());

        // The flag governs presentation granularity; entries survive it.
        selection.toggle_sub_area("Boston", "Back Bay");
        selection.set_include_sub_areas(false);
        assert!(selection.is_sub_area_selected("Boston", "Back Bay"));
    }

    #[test]
    fn selecting_state_resets_county_and_towns() {
        let mut selection = CoverageSelection::new("MA");
        selection.select_county("Middlesex");
        selection.toggle_town("Cambridge");

        selection.select_state("CT");

        assert_eq!(selection.state(), "CT");
        assert_eq!(selection.county(), ALL_COUNTIES);
        assert!(selection.towns().is_empty());
    }

    #[test]
    fn selecting_county_clears_towns() {
        let mut selection = CoverageSelection::new("MA");
        selection.toggle_town("Boston");

        selection.select_county("Middlesex");

        assert_eq!(selection.county(), "Middlesex");
        assert!(selection.towns().is_empty());
    }

    #[test]
    fn toggling_town_on_then_off_restores_prior_state() {
        let mut selection = CoverageSelection::new("MA");
        selection.toggle_town("Quincy");
        let before = selection.clone();

        selection.toggle_town("Boston");
        selection.toggle_sub_area("Boston", "Back Bay");
        selection.toggle_sub_area("Boston", "Fenway");
        selection.toggle_town("Boston");

        assert_eq!(selection, before);
    }

    #[test]
    fn whole_town_supersedes_its_sub_areas() {
        let mut selection = CoverageSelection::new("MA");
        selection.toggle_sub_area("Boston", "Back Bay");
        selection.toggle_sub_area("Boston", "Seaport");
        selection.toggle_sub_area("Cambridge", "Riverside");

        selection.toggle_town("Boston");

        assert!(selection.is_town_selected("Boston"));
        assert!(!selection.is_sub_area_selected("Boston", "Back Bay"));
        assert!(!selection.is_sub_area_selected("Boston", "Seaport"));
        // Other towns' sub-areas are untouched.
        assert!(selection.is_sub_area_selected("Cambridge", "Riverside"));
    }

    #[test]
    fn toggling_sub_area_never_touches_the_bare_town() {
        let mut selection = CoverageSelection::new("MA");
        selection.toggle_town("Boston");

        selection.toggle_sub_area("Boston", "Back Bay");
        assert!(selection.is_town_selected("Boston"));

        selection.toggle_sub_area("Boston", "Back Bay");
        assert!(selection.is_town_selected("Boston"));
        assert!(!selection.is_sub_area_selected("Boston", "Back Bay"));
    }

    #[test]
    fn select_all_covers_the_resolved_scope_without_sub_areas() {
        let mut selection = CoverageSelection::new("MA");
        selection.select_county("Suffolk");
        selection.select_all();

        assert_eq!(
            selection.labels(),
            vec!["Boston", "Chelsea", "Revere", "Winthrop"]
        );
        assert!(selection.towns().iter().all(|entry| !entry.is_sub_area()));
    }

    #[test]
    fn clear_all_empties_the_resolved_scope() {
        let mut selection = CoverageSelection::new("MA");
        selection.select_county("Suffolk");
        selection.select_all();
        selection.toggle_sub_area("Boston", "Back Bay");

        selection.clear_all();

        assert!(selection.towns().is_empty());
    }

    #[test]
    fn membership_checked_insert_never_duplicates() {
        let mut selection = CoverageSelection::new("MA");
        selection.toggle_town("Quincy");
        selection.select_all();

        let quincy_entries = selection
            .towns()
            .iter()
            .filter(|entry| entry.town == "Quincy")
            .count();
        assert_eq!(quincy_entries, 1);
    }

    #[test]
    fn labels_follow_the_display_rule() {
        assert_eq!(TownSelection::whole_town("Quincy").label(), "Quincy");
        assert_eq!(
            TownSelection::sub_area("Boston", "Back Bay").label(),
            "Boston – Back Bay"
        );
    }
}
