//! Pure recipient-selection pipeline.
//!
//! Candidates narrow through ordered stages (category subscription, then
//! geographic coverage, then price-range overlap), and any stage that
//! empties the set short-circuits the rest. Same inputs always produce the
//! same output; nothing here caches or mutates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geography::{normalize_state_code, CoverageSelection, ALL_COUNTIES};
use super::preferences::{
    AgentId, BroadcastCategory, CoverageArea, NotificationPreference, PriceError,
};

/// Optional filter set attached to one outbound broadcast. Ephemeral: built
/// per request, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BroadcastCriteria {
    pub state: Option<String>,
    pub counties: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    /// Carried through to the delivery payload; no matching stage filters on
    /// property type.
    pub property_types: BTreeSet<String>,
}

impl BroadcastCriteria {
    pub fn has_geography(&self) -> bool {
        self.state.is_some() || !self.counties.is_empty() || !self.cities.is_empty()
    }

    pub fn has_price(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// Derive a geographic filter from a consumer-side coverage selection:
    /// the selection's state, its county when one is scoped, and the distinct
    /// towns it covers (whole-town or through a sub-area).
    pub fn from_selection(selection: &CoverageSelection) -> Self {
        let mut criteria = Self {
            state: Some(selection.state().to_string()),
            ..Self::default()
        };
        if !selection.county().eq_ignore_ascii_case(ALL_COUNTIES) {
            criteria.counties.insert(selection.county().to_string());
        }
        criteria.cities = selection.selected_towns();
        criteria
    }

    /// Validate the requested price window before matching runs.
    pub fn validate(&self) -> Result<(), PriceError> {
        for bound in [self.min_price, self.max_price].into_iter().flatten() {
            if bound > super::preferences::MAX_PRICE {
                return Err(PriceError::AboveCeiling {
                    value: i64::from(bound),
                    ceiling: super::preferences::MAX_PRICE,
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(PriceError::InvertedRange { min, max });
            }
        }
        Ok(())
    }
}

/// Select the recipients for one broadcast.
///
/// Stage order matters only for short-circuit efficiency, not correctness:
/// each stage is an intersection over the surviving candidate set.
pub fn select_recipients(
    sender: &AgentId,
    category: BroadcastCategory,
    criteria: &BroadcastCriteria,
    preferences: &[NotificationPreference],
    coverage: &[CoverageArea],
) -> Vec<AgentId> {
    // Stage 1: category subscription, excluding the requesting agent.
    let mut candidates: Vec<&NotificationPreference> = preferences
        .iter()
        .filter(|preference| preference.agent_id != *sender && preference.subscribed(category))
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    // Stage 2: at least one declared coverage row matching the criteria's
    // state and, where given, its county/city sets.
    if criteria.has_geography() {
        let state = criteria.state.as_deref().map(normalize_state_code);
        let counties = lowered(&criteria.counties);
        let cities = lowered(&criteria.cities);

        candidates.retain(|preference| {
            coverage.iter().any(|area| {
                area.agent_id == preference.agent_id
                    && area_matches(area, state.as_deref(), &counties, &cities)
            })
        });
        if candidates.is_empty() {
            return Vec::new();
        }
    }

    // Stage 3: price-range overlap.
    if criteria.has_price() {
        candidates
            .retain(|preference| preference.price_range.overlaps(criteria.min_price, criteria.max_price));
    }

    debug!(
        category = category.label(),
        survivors = candidates.len(),
        "matched broadcast recipients"
    );

    candidates
        .into_iter()
        .map(|preference| preference.agent_id.clone())
        .collect()
}

fn lowered(values: &BTreeSet<String>) -> BTreeSet<String> {
    values.iter().map(|value| value.to_ascii_lowercase()).collect()
}

/// Set-membership test for one coverage row, never a substring match.
///
/// A row declares one locality granularity, so when the criteria carry
/// county or city sets the row's declared county *or* city must be a member
/// of the corresponding set.
fn area_matches(
    area: &CoverageArea,
    state: Option<&str>,
    counties: &BTreeSet<String>,
    cities: &BTreeSet<String>,
) -> bool {
    if let Some(state) = state {
        if normalize_state_code(&area.state) != state {
            return false;
        }
    }

    if counties.is_empty() && cities.is_empty() {
        return true;
    }

    let county_hit = area
        .county
        .as_ref()
        .map(|county| counties.contains(&county.to_ascii_lowercase()))
        .unwrap_or(false);
    let city_hit = area
        .city
        .as_ref()
        .map(|city| cities.contains(&city.to_ascii_lowercase()))
        .unwrap_or(false);

    county_hit || city_hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::preferences::PriceRangePreference;

    fn agent(id: &str) -> AgentId {
        AgentId(id.to_string())
    }

    fn subscriber(id: &str, category: BroadcastCategory) -> NotificationPreference {
        let mut preference = NotificationPreference::empty(agent(id));
        preference.set_subscription(category, true);
        preference
    }

    #[test]
    fn category_stage_excludes_sender_and_unsubscribed() {
        let preferences = vec![
            subscriber("sender", BroadcastCategory::BuyerNeed),
            subscriber("match", BroadcastCategory::BuyerNeed),
            subscriber("other", BroadcastCategory::RenterNeed),
        ];

        let matched = select_recipients(
            &agent("sender"),
            BroadcastCategory::BuyerNeed,
            &BroadcastCriteria::default(),
            &preferences,
            &[],
        );

        assert_eq!(matched, vec![agent("match")]);
    }

    #[test]
    fn geography_stage_requires_a_matching_row() {
        let preferences = vec![
            subscriber("in-state", BroadcastCategory::BuyerNeed),
            subscriber("out-of-state", BroadcastCategory::BuyerNeed),
        ];
        let coverage = vec![
            CoverageArea::statewide(agent("in-state"), "MA"),
            CoverageArea::statewide(agent("out-of-state"), "CT"),
        ];
        let criteria = BroadcastCriteria {
            state: Some("MA".to_string()),
            ..BroadcastCriteria::default()
        };

        let matched = select_recipients(
            &agent("sender"),
            BroadcastCategory::BuyerNeed,
            &criteria,
            &preferences,
            &coverage,
        );

        assert_eq!(matched, vec![agent("in-state")]);
    }

    #[test]
    fn geography_stage_normalizes_state_spellings() {
        let preferences = vec![subscriber("covered", BroadcastCategory::SalesIntel)];
        let coverage = vec![CoverageArea::statewide(agent("covered"), "massachusetts")];
        let criteria = BroadcastCriteria {
            state: Some("ma".to_string()),
            ..BroadcastCriteria::default()
        };

        let matched = select_recipients(
            &agent("sender"),
            BroadcastCategory::SalesIntel,
            &criteria,
            &preferences,
            &coverage,
        );

        assert_eq!(matched, vec![agent("covered")]);
    }

    #[test]
    fn city_filter_is_set_membership_not_substring() {
        let preferences = vec![
            subscriber("newton", BroadcastCategory::BuyerNeed),
            subscriber("newtonville", BroadcastCategory::BuyerNeed),
        ];
        let coverage = vec![
            CoverageArea::city(agent("newton"), "MA", "Newton"),
            CoverageArea::city(agent("newtonville"), "MA", "Newtonville"),
        ];
        let mut criteria = BroadcastCriteria {
            state: Some("MA".to_string()),
            ..BroadcastCriteria::default()
        };
        criteria.cities.insert("Newton".to_string());

        let matched = select_recipients(
            &agent("sender"),
            BroadcastCategory::BuyerNeed,
            &criteria,
            &preferences,
            &coverage,
        );

        assert_eq!(matched, vec![agent("newton")]);
    }

    #[test]
    fn price_stage_keeps_overlapping_ranges_only() {
        let mut inside = subscriber("inside", BroadcastCategory::BuyerNeed);
        inside.price_range = PriceRangePreference {
            min_price: None,
            max_price: Some(500_000),
            has_no_min: true,
            has_no_max: false,
        };
        let mut outside = subscriber("outside", BroadcastCategory::BuyerNeed);
        outside.price_range = PriceRangePreference {
            min_price: Some(700_000),
            max_price: Some(900_000),
            ..PriceRangePreference::default()
        };

        let criteria = BroadcastCriteria {
            min_price: Some(400_000),
            max_price: Some(600_000),
            ..BroadcastCriteria::default()
        };

        let matched = select_recipients(
            &agent("sender"),
            BroadcastCategory::BuyerNeed,
            &criteria,
            &[inside, outside],
            &[],
        );

        assert_eq!(matched, vec![agent("inside")]);
    }

    #[test]
    fn agent_without_price_preference_is_unrestricted() {
        let preferences = vec![subscriber("open", BroadcastCategory::BuyerNeed)];
        let criteria = BroadcastCriteria {
            min_price: Some(1_000_000),
            ..BroadcastCriteria::default()
        };

        let matched = select_recipients(
            &agent("sender"),
            BroadcastCategory::BuyerNeed,
            &criteria,
            &preferences,
            &[],
        );

        assert_eq!(matched, vec![agent("open")]);
    }

    #[test]
    fn empty_category_stage_short_circuits() {
        let preferences = vec![subscriber("sender", BroadcastCategory::BuyerNeed)];
        let criteria = BroadcastCriteria {
            state: Some("MA".to_string()),
            ..BroadcastCriteria::default()
        };

        let matched = select_recipients(
            &agent("sender"),
            BroadcastCategory::BuyerNeed,
            &criteria,
            &preferences,
            &[],
        );

        assert!(matched.is_empty());
    }

    #[test]
    fn criteria_from_selection_carries_scope_and_towns() {
        let mut selection = CoverageSelection::new("MA");
        selection.select_county("Suffolk");
        selection.toggle_town("Chelsea");
        selection.toggle_sub_area("Boston", "Back Bay");

        let criteria = BroadcastCriteria::from_selection(&selection);

        assert_eq!(criteria.state.as_deref(), Some("MA"));
        assert!(criteria.counties.contains("Suffolk"));
        assert!(criteria.cities.contains("Chelsea"));
        // Sub-area selections surface their parent town in the city filter.
        assert!(criteria.cities.contains("Boston"));
    }

    #[test]
    fn criteria_validation_rejects_inverted_window() {
        let criteria = BroadcastCriteria {
            min_price: Some(600_000),
            max_price: Some(400_000),
            ..BroadcastCriteria::default()
        };
        assert!(matches!(
            criteria.validate(),
            Err(PriceError::InvertedRange { .. })
        ));
    }
}
