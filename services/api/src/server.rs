use crate::cli::ServeArgs;
use crate::infra::{build_manager, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use interview_insights::config::AppConfig;
use interview_insights::error::AppError;
use interview_insights::scoring::{InterviewScoringService, ScoringEngine};
use interview_insights::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(store) = args.store.take() {
        config.storage.aspect_store_path = Some(store);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let manager = build_manager(config.storage.aspect_store_path.clone());
    if manager.persistence_degraded() {
        warn!(
            store = %manager.store().describe(),
            "aspect store unreadable; serving from memory until the next successful save"
        );
    }
    let scoring = Arc::new(
        InterviewScoringService::new(ScoringEngine::default(), manager.clone())
            .with_default_difficulty(config.scoring.default_difficulty),
    );

    let app = with_service_routes(manager.clone(), scoring)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        aspect_scores = manager.len(),
        "interview insights service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
