//! Per-agent notification preferences: category subscriptions, price-range
//! interest, and declared coverage areas, behind upsert-by-owner storage
//! contracts.

pub mod domain;
pub mod price;
pub mod repository;
pub mod service;

pub use domain::{AgentId, BroadcastCategory, CoverageArea, NotificationPreference};
pub use price::{parse_price, PriceError, PriceRangePreference, MAX_PRICE};
pub use repository::{
    AgentDirectory, CoverageRepository, DirectoryError, PreferenceRepository, RepositoryError,
};
pub use service::{PreferenceService, PreferenceServiceError};
