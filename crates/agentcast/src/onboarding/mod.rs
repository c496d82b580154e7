//! Explicit onboarding progression.
//!
//! The stage record travels with an application-level session value and is
//! advanced only through the pure transition below; nothing here is shared
//! mutable state.

use serde::{Deserialize, Serialize};

/// Screens an agent walks through before the broadcast surface unlocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    #[default]
    Welcome,
    Profile,
    Preferences,
    Notifications,
    Complete,
}

impl OnboardingStage {
    /// Successor stage; `Complete` is terminal and absorbs further advances.
    pub const fn next(self) -> Self {
        match self {
            OnboardingStage::Welcome => OnboardingStage::Profile,
            OnboardingStage::Profile => OnboardingStage::Preferences,
            OnboardingStage::Preferences => OnboardingStage::Notifications,
            OnboardingStage::Notifications => OnboardingStage::Complete,
            OnboardingStage::Complete => OnboardingStage::Complete,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            OnboardingStage::Welcome => "welcome",
            OnboardingStage::Profile => "profile",
            OnboardingStage::Preferences => "preferences",
            OnboardingStage::Notifications => "notifications",
            OnboardingStage::Complete => "complete",
        }
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, OnboardingStage::Complete)
    }
}

/// Session-carried onboarding record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    stage: OnboardingStage,
}

impl OnboardingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn stage(&self) -> OnboardingStage {
        self.stage
    }

    /// Pure transition: the same record advanced by one stage.
    #[must_use]
    pub const fn advanced(self) -> Self {
        Self {
            stage: self.stage.next(),
        }
    }
}
