use std::sync::Arc;

use agentcast::broadcast::dispatch::JobQueue;
use agentcast::broadcast::geography;
use agentcast::broadcast::preferences::{AgentDirectory, CoverageRepository, PreferenceRepository};
use agentcast::broadcast::router::{broadcast_router, BroadcastApi};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::infra::AppState;

pub(crate) fn with_broadcast_routes<P, C, D, Q>(api: Arc<BroadcastApi<P, C, D, Q>>) -> axum::Router
where
    P: PreferenceRepository + 'static,
    C: CoverageRepository + 'static,
    D: AgentDirectory + 'static,
    Q: JobQueue + 'static,
{
    broadcast_router(api)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/geography/:state/towns",
            axum::routing::get(towns_endpoint),
        )
        .route(
            "/api/v1/geography/:state/towns/:town/sub-areas",
            axum::routing::get(sub_areas_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct TownsQuery {
    #[serde(default)]
    pub(crate) county: Option<String>,
}

/// Town list for a state, optionally scoped to a county. Unknown regions
/// return an empty list for the UI's empty-state message.
pub(crate) async fn towns_endpoint(
    Path(state): Path<String>,
    Query(query): Query<TownsQuery>,
) -> Json<serde_json::Value> {
    let county = query
        .county
        .unwrap_or_else(|| geography::ALL_COUNTIES.to_string());
    let code = geography::normalize_state_code(&state);
    let towns = geography::resolve_towns(&code, &county);

    Json(json!({
        "state": code,
        "county": county,
        "hasCountyData": geography::has_county_data(&code),
        "towns": towns,
    }))
}

pub(crate) async fn sub_areas_endpoint(
    Path((state, town)): Path<(String, String)>,
) -> Json<serde_json::Value> {
    let code = geography::normalize_state_code(&state);
    let sub_areas = geography::resolve_sub_areas(&code, &town);

    Json(json!({
        "state": code,
        "town": town,
        "subAreas": sub_areas,
    }))
}
