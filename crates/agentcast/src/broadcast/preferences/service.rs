use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::domain::{AgentId, NotificationPreference};
use super::price::PriceError;
use super::repository::{PreferenceRepository, RepositoryError};

/// Upsert-by-owner access to notification preferences.
pub struct PreferenceService<P> {
    repository: Arc<P>,
}

impl<P> PreferenceService<P>
where
    P: PreferenceRepository + 'static,
{
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// Fetch an agent's preferences, materializing the all-false default on
    /// first read.
    pub fn fetch(&self, agent_id: &AgentId) -> Result<NotificationPreference, PreferenceServiceError> {
        if let Some(existing) = self.repository.fetch(agent_id)? {
            return Ok(existing);
        }

        let created = self
            .repository
            .upsert(NotificationPreference::empty(agent_id.clone()))?;
        debug!(agent = %agent_id.0, "created default notification preference");
        Ok(created)
    }

    /// Validated, idempotent upsert; stamps the last-write-wins marker.
    pub fn upsert(
        &self,
        mut preference: NotificationPreference,
    ) -> Result<NotificationPreference, PreferenceServiceError> {
        preference.price_range.validate()?;
        preference.updated_at = Some(Utc::now());
        Ok(self.repository.upsert(preference)?)
    }
}

/// Error raised by the preference service.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceServiceError {
    #[error(transparent)]
    Validation(#[from] PriceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
