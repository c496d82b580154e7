use std::sync::atomic::Ordering;
use std::sync::Arc;

use agentcast::broadcast::router::BroadcastApi;
use agentcast::config::AppConfig;
use agentcast::error::AppError;
use agentcast::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryAgentDirectory, InMemoryCoverageRepository, InMemoryJobQueue,
    InMemoryPreferenceRepository,
};
use crate::routes::with_broadcast_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let preferences = Arc::new(InMemoryPreferenceRepository::default());
    let coverage = Arc::new(InMemoryCoverageRepository::default());
    let directory = Arc::new(InMemoryAgentDirectory::default());
    let queue = Arc::new(InMemoryJobQueue::default());
    let api = Arc::new(BroadcastApi::new(preferences, coverage, directory, queue));

    let app = with_broadcast_routes(api)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "broadcast targeting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
