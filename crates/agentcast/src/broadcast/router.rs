use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::dispatch::JobQueue;
use super::preferences::{
    AgentDirectory, AgentId, CoverageRepository, NotificationPreference, PreferenceRepository,
    PreferenceService, PreferenceServiceError, PriceRangePreference,
};
use super::service::{BroadcastError, BroadcastRequest, BroadcastService};

/// Shared state behind the broadcast API surface.
pub struct BroadcastApi<P, C, D, Q> {
    pub preferences: PreferenceService<P>,
    pub broadcasts: BroadcastService<P, C, D, Q>,
}

impl<P, C, D, Q> BroadcastApi<P, C, D, Q>
where
    P: PreferenceRepository + 'static,
    C: CoverageRepository + 'static,
    D: AgentDirectory + 'static,
    Q: JobQueue + 'static,
{
    pub fn new(preferences: Arc<P>, coverage: Arc<C>, directory: Arc<D>, queue: Arc<Q>) -> Self {
        Self {
            preferences: PreferenceService::new(preferences.clone()),
            broadcasts: BroadcastService::new(preferences, coverage, directory, queue),
        }
    }
}

/// Flat wire form of a preference record, addressable by agent id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(default)]
    pub buyer_need: bool,
    #[serde(default)]
    pub sales_intel: bool,
    #[serde(default)]
    pub renter_need: bool,
    #[serde(default)]
    pub general_discussion: bool,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
    #[serde(default)]
    pub has_no_min: bool,
    #[serde(default)]
    pub has_no_max: bool,
}

impl PreferenceRecord {
    pub fn into_preference(self, agent_id: AgentId) -> NotificationPreference {
        NotificationPreference {
            agent_id,
            buyer_need: self.buyer_need,
            sales_intel: self.sales_intel,
            renter_need: self.renter_need,
            general_discussion: self.general_discussion,
            price_range: PriceRangePreference {
                min_price: self.min_price,
                max_price: self.max_price,
                has_no_min: self.has_no_min,
                has_no_max: self.has_no_max,
            },
            updated_at: None,
        }
    }

    pub fn from_preference(preference: &NotificationPreference) -> Self {
        Self {
            buyer_need: preference.buyer_need,
            sales_intel: preference.sales_intel,
            renter_need: preference.renter_need,
            general_discussion: preference.general_discussion,
            min_price: preference.price_range.min_price,
            max_price: preference.price_range.max_price,
            has_no_min: preference.price_range.has_no_min,
            has_no_max: preference.price_range.has_no_max,
        }
    }
}

/// Router builder exposing the preference and broadcast endpoints.
pub fn broadcast_router<P, C, D, Q>(api: Arc<BroadcastApi<P, C, D, Q>>) -> Router
where
    P: PreferenceRepository + 'static,
    C: CoverageRepository + 'static,
    D: AgentDirectory + 'static,
    Q: JobQueue + 'static,
{
    Router::new()
        .route(
            "/api/v1/agents/:agent_id/preferences",
            get(fetch_preferences_handler::<P, C, D, Q>)
                .put(upsert_preferences_handler::<P, C, D, Q>),
        )
        .route(
            "/api/v1/agents/:agent_id/broadcasts",
            post(broadcast_handler::<P, C, D, Q>),
        )
        .with_state(api)
}

pub(crate) async fn fetch_preferences_handler<P, C, D, Q>(
    State(api): State<Arc<BroadcastApi<P, C, D, Q>>>,
    Path(agent_id): Path<String>,
) -> Response
where
    P: PreferenceRepository + 'static,
    C: CoverageRepository + 'static,
    D: AgentDirectory + 'static,
    Q: JobQueue + 'static,
{
    match api.preferences.fetch(&AgentId(agent_id)) {
        Ok(preference) => (
            StatusCode::OK,
            axum::Json(PreferenceRecord::from_preference(&preference)),
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn upsert_preferences_handler<P, C, D, Q>(
    State(api): State<Arc<BroadcastApi<P, C, D, Q>>>,
    Path(agent_id): Path<String>,
    axum::Json(record): axum::Json<PreferenceRecord>,
) -> Response
where
    P: PreferenceRepository + 'static,
    C: CoverageRepository + 'static,
    D: AgentDirectory + 'static,
    Q: JobQueue + 'static,
{
    let preference = record.into_preference(AgentId(agent_id));
    match api.preferences.upsert(preference) {
        Ok(stored) => (
            StatusCode::OK,
            axum::Json(PreferenceRecord::from_preference(&stored)),
        )
            .into_response(),
        Err(PreferenceServiceError::Validation(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn broadcast_handler<P, C, D, Q>(
    State(api): State<Arc<BroadcastApi<P, C, D, Q>>>,
    Path(agent_id): Path<String>,
    axum::Json(request): axum::Json<BroadcastRequest>,
) -> Response
where
    P: PreferenceRepository + 'static,
    C: CoverageRepository + 'static,
    D: AgentDirectory + 'static,
    Q: JobQueue + 'static,
{
    match api.broadcasts.broadcast(&AgentId(agent_id), request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error @ (BroadcastError::EmptySubject | BroadcastError::EmptyMessage)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(BroadcastError::Price(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(BroadcastError::Queue(error)) => {
            let payload = json!({
                "error": format!("broadcast batch was not queued: {error}"),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
