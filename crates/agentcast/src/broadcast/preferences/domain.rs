use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::price::PriceRangePreference;

/// Identifier wrapper for collaborating agents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// Closed set of broadcast categories an agent can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastCategory {
    BuyerNeed,
    SalesIntel,
    RenterNeed,
    GeneralDiscussion,
}

impl BroadcastCategory {
    pub const ALL: [BroadcastCategory; 4] = [
        BroadcastCategory::BuyerNeed,
        BroadcastCategory::SalesIntel,
        BroadcastCategory::RenterNeed,
        BroadcastCategory::GeneralDiscussion,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BroadcastCategory::BuyerNeed => "buyer_need",
            BroadcastCategory::SalesIntel => "sales_intel",
            BroadcastCategory::RenterNeed => "renter_need",
            BroadcastCategory::GeneralDiscussion => "general_discussion",
        }
    }
}

/// Per-agent subscription flags plus the price-range interest.
///
/// One record per agent, created lazily with everything off on first read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreference {
    pub agent_id: AgentId,
    pub buyer_need: bool,
    pub sales_intel: bool,
    pub renter_need: bool,
    pub general_discussion: bool,
    pub price_range: PriceRangePreference,
    /// Last-write-wins marker stamped on every upsert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NotificationPreference {
    /// The all-false default an absent record materializes as.
    pub fn empty(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            buyer_need: false,
            sales_intel: false,
            renter_need: false,
            general_discussion: false,
            price_range: PriceRangePreference::default(),
            updated_at: None,
        }
    }

    /// Total variant→field lookup; no stringly-typed column access.
    pub fn subscribed(&self, category: BroadcastCategory) -> bool {
        match category {
            BroadcastCategory::BuyerNeed => self.buyer_need,
            BroadcastCategory::SalesIntel => self.sales_intel,
            BroadcastCategory::RenterNeed => self.renter_need,
            BroadcastCategory::GeneralDiscussion => self.general_discussion,
        }
    }

    pub fn set_subscription(&mut self, category: BroadcastCategory, enabled: bool) {
        match category {
            BroadcastCategory::BuyerNeed => self.buyer_need = enabled,
            BroadcastCategory::SalesIntel => self.sales_intel = enabled,
            BroadcastCategory::RenterNeed => self.renter_need = enabled,
            BroadcastCategory::GeneralDiscussion => self.general_discussion = enabled,
        }
    }
}

/// One declared area of operation for an agent.
///
/// Provider-side counterpart of the consumer-facing `CoverageSelection`: an
/// agent may declare zero or more rows, each scoping a state and optionally a
/// county or city within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageArea {
    pub agent_id: AgentId,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl CoverageArea {
    pub fn statewide(agent_id: AgentId, state: impl Into<String>) -> Self {
        Self {
            agent_id,
            state: state.into(),
            county: None,
            city: None,
        }
    }

    pub fn county(agent_id: AgentId, state: impl Into<String>, county: impl Into<String>) -> Self {
        Self {
            agent_id,
            state: state.into(),
            county: Some(county.into()),
            city: None,
        }
    }

    pub fn city(agent_id: AgentId, state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            agent_id,
            state: state.into(),
            county: None,
            city: Some(city.into()),
        }
    }
}
