use super::domain::{AgentId, CoverageArea, NotificationPreference};

/// Storage abstraction for notification preferences so the services can be
/// exercised in isolation. Writes are idempotent upserts keyed by agent id.
pub trait PreferenceRepository: Send + Sync {
    fn upsert(
        &self,
        preference: NotificationPreference,
    ) -> Result<NotificationPreference, RepositoryError>;
    fn fetch(&self, agent_id: &AgentId)
        -> Result<Option<NotificationPreference>, RepositoryError>;
    fn all(&self) -> Result<Vec<NotificationPreference>, RepositoryError>;
}

/// Storage abstraction for declared coverage areas.
pub trait CoverageRepository: Send + Sync {
    /// Replace an agent's declared rows wholesale.
    fn replace_for(
        &self,
        agent_id: &AgentId,
        areas: Vec<CoverageArea>,
    ) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<CoverageArea>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Read-only lookup of an agent's delivery address in the external directory.
pub trait AgentDirectory: Send + Sync {
    fn email_for(&self, agent_id: &AgentId) -> Result<Option<String>, DirectoryError>;
}

/// Directory lookup error.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("agent directory unavailable: {0}")]
    Unavailable(String),
}
