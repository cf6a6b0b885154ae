use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fieldbook::adapters::email::ResendMailer;
use fieldbook::adapters::http::{cancellation_routes, CancellationAppState};
use fieldbook::adapters::payment::{MockRefundQrProvider, VietQrConfig, VietQrProvider};
use fieldbook::adapters::postgres::{
    PostgresBookingStore, PostgresCancellationRecordRepository,
    PostgresCancellationRequestRepository, PostgresRoleDirectory,
};
use fieldbook::config::AppConfig;
use fieldbook::ports::RefundQrProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so the log filter is available
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fieldbook cancellation service...");

    // Create database pool
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("Database pool created");

    // Wire the adapters into the shared state
    let qr_provider: Arc<dyn RefundQrProvider> = if config.payment.use_mock {
        tracing::warn!("Using the mock refund QR provider");
        Arc::new(MockRefundQrProvider::new())
    } else {
        let qr_config = VietQrConfig::new(
            config.payment.vietqr_api_key.clone(),
            config.payment.bank_bin.clone(),
            config.payment.account_number.clone(),
        )
        .with_account_name(config.payment.account_name.clone());
        Arc::new(VietQrProvider::new(qr_config)?)
    };

    let state = CancellationAppState {
        booking_store: Arc::new(PostgresBookingStore::new(pool.clone())),
        role_directory: Arc::new(PostgresRoleDirectory::new(pool.clone())),
        request_repository: Arc::new(PostgresCancellationRequestRepository::new(pool.clone())),
        record_repository: Arc::new(PostgresCancellationRecordRepository::new(pool.clone())),
        qr_provider,
        mailer: Arc::new(ResendMailer::new(config.email.clone())?),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api/cancellation-requests", cancellation_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received, cleaning up...");
}
