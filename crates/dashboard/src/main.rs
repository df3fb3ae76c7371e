//! Provenance Dashboard Server
//!
//! Serves the review's headline counts and figure descriptions.
//! Handles:
//! - One-time load of the estimate and source tables
//! - Figure rebuilds on every request (the outlier checkbox is a query flag)
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;

use axum::{middleware::from_fn, routing::get, Router};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use provenance_common::{
    config::{AppConfig, ObservabilityConfig},
    metrics, Dataset,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
///
/// Both fields are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dataset: Arc<Dataset>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match std::env::var("APP_CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::load()?,
    };

    // Initialize tracing
    init_tracing(&config.observability);

    info!(
        service = %config.observability.service_name,
        "Starting provenance dashboard v{}", provenance_common::VERSION
    );

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets_for_metric(
                Matcher::Suffix("figure_build_duration_seconds".to_string()),
                metrics::BUILD_BUCKETS,
            )?
            .install()?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }
    metrics::register_metrics();

    // Load and validate the input tables once
    let dataset = Dataset::load(&config.data).map_err(|e| {
        tracing::error!(error = %e, "Failed to load dataset");
        e
    })?;
    metrics::record_dataset_rows("estimates", dataset.estimates().len());
    metrics::record_dataset_rows("sources", dataset.sources().len());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        config: Arc::new(config),
        dataset: Arc::new(dataset),
    };

    let app = create_router(state);

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let timeout = TimeoutLayer::new(state.config.request_timeout());

    // API routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))

        // Review counts
        .route("/stats", get(handlers::stats::stats))
        .route("/stats.md", get(handlers::stats::stats_markdown))

        // Figures
        .route("/figures", get(handlers::figures::list_figures))
        .route("/figures/{id}", get(handlers::figures::get_figure));

    // Compose the app
    Router::new()
        .nest("/v1", api_routes)
        .layer(from_fn(middleware::metrics::track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use provenance_common::dataset::{EstimateRecord, SourceRecord};

    pub fn state() -> AppState {
        let dataset = Dataset::new(
            vec![
                EstimateRecord::new("Global", "Bottom-up", 2010, 194.0),
                EstimateRecord::new("Global", "Extrapolation", 2020, 1137.0),
                EstimateRecord::new("Global", "Extrapolation", 2020, 8253.0),
                EstimateRecord::new("Global", "Bottom-up", 2030, 970.0),
                EstimateRecord::new("USA", "Bottom-up", 2014, 70.0),
                EstimateRecord::new("EU28", "Bottom-up", 2020, 104.0),
            ],
            vec![
                SourceRecord::new("Andrae & Edler, 2015", "IDC", "EL", Some(1100)),
                SourceRecord::new("Andrae & Edler, 2015", "IDC", "EL", Some(1100)),
                SourceRecord::new("Andrae & Edler, 2015", "Cisco", "PD", Some(1100)),
                SourceRecord::new("The Shift Project, 2019", "Gartner", "NF", None),
            ],
        );

        AppState {
            config: Arc::new(AppConfig::default()),
            dataset: Arc::new(dataset),
        }
    }

    pub fn app() -> Router {
        create_router(state())
    }
}
