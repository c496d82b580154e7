//! Broadcast targeting: who receives an outbound agent notice.
//!
//! `geography` models where agents operate, `preferences` what they want to
//! hear about, `matching` intersects the two with a per-broadcast filter, and
//! `dispatch` hands the matched recipients to the delivery queue as one
//! batch. `service` and `router` tie the pieces together behind the HTTP
//! surface.

pub mod dispatch;
pub mod geography;
pub mod matching;
pub mod preferences;
pub mod router;
pub mod service;

pub use dispatch::{
    BroadcastDispatcher, BroadcastJob, DispatchOptions, DispatchOutcome, JobQueue, MessagePayload,
    QueueError, Recipient,
};
pub use geography::{CoverageSelection, TownSelection};
pub use matching::{select_recipients, BroadcastCriteria};
pub use preferences::{
    AgentDirectory, AgentId, BroadcastCategory, CoverageArea, CoverageRepository, DirectoryError,
    NotificationPreference, PreferenceRepository, PreferenceService, PreferenceServiceError,
    PriceRangePreference, RepositoryError,
};
pub use router::{broadcast_router, BroadcastApi, PreferenceRecord};
pub use service::{BroadcastError, BroadcastRequest, BroadcastResponse, BroadcastService};
