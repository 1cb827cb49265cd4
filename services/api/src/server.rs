use crate::cli::ServeArgs;
use crate::infra::{build_service, load_content, AppState};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use motivation_catalyst::config::AppConfig;
use motivation_catalyst::error::AppError;
use motivation_catalyst::logging;
use motivation_catalyst::workflows::assessment::configured_sink;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    logging::init(&config.logging)?;

    let content = load_content(&config.assessment)?;
    let sink = configured_sink(&config.webhook);
    let service = Arc::new(build_service(&config, &content, sink));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: content.catalog.clone(),
    };

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        app_id = %config.assessment.app_id,
        webhook = config.webhook.endpoint().is_some(),
        "motivation assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
