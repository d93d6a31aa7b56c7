use axum::response::Html;
use axum::{routing::get, routing::post, Router};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use warranty_desk::{
    app_state::AppState, config::AppConfig, db, routes, services::outbox::NotificationOutbox,
};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing warranty-desk server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    // Register application metrics
    metrics::describe_counter!(
        "cases_submitted_total",
        "Total intake submissions, labeled by kind (claim/return)"
    );
    metrics::describe_counter!(
        "notices_enqueued_total",
        "Total notification notices enqueued to the outbox"
    );
    metrics::describe_counter!(
        "notices_dropped_total",
        "Notices lost because the outbox was unreachable"
    );
    metrics::describe_counter!("notices_sent_total", "Total notification emails delivered");
    metrics::describe_counter!(
        "notices_failed_total",
        "Notices abandoned after exhausting delivery attempts"
    );
    metrics::describe_gauge!(
        "notice_outbox_depth",
        "Current number of notices waiting in the outbox"
    );

    // Initialize database connection pool
    tracing::info!("Connecting to PostgreSQL database");
    let db_pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run database migrations
    tracing::info!("Running database migrations");
    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Initialize Redis notification outbox
    tracing::info!("Connecting to Redis notification outbox");
    let outbox = NotificationOutbox::new(&config.redis_url).expect("Failed to initialize outbox");

    // Create shared application state
    let state = AppState::new(db_pool, outbox);

    // Build API routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/claims",
            post(routes::claims::create_claim).get(routes::claims::list_claims),
        )
        .route(
            "/api/claims/{id}",
            get(routes::claims::get_claim).patch(routes::claims::update_claim),
        )
        .route(
            "/api/returns",
            post(routes::returns::create_return).get(routes::returns::list_returns),
        )
        .route(
            "/api/returns/{id}",
            get(routes::returns::get_return).patch(routes::returns::update_return),
        )
        .route("/api/cases", get(routes::cases::find_case))
        .route("/api/cases/{id}", get(routes::cases::get_case))
        .with_state(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        // Any unmatched path serves the client application (embedded at compile time)
        .fallback(serve_index)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1 MB limit

    tracing::info!("Starting warranty-desk on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}
