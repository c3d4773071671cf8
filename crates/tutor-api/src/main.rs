// Tutor Booking API server
// Decision: Without DATABASE_URL the server runs on in-memory storage for local development
// Decision: A missing JWT_SECRET aborts startup rather than signing with a guessable key

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tutor_booking_api::{
    auth::{AuthConfig, AuthState},
    build_app,
    config::ServerConfig,
    storage::StorageBackend,
};

/// Log filter used when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "tutor_booking_api=debug,tower_http=debug";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("tutor-booking-api starting...");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let auth_config =
        AuthConfig::from_env(config.production).context("Invalid authentication configuration")?;
    tracing::info!(
        production = config.production,
        secure_cookie = auth_config.cookie.secure,
        token_lifetime_secs = auth_config.jwt.token_lifetime.as_secs(),
        "Authentication configured"
    );

    let storage = match &config.database_url {
        Some(url) => {
            let backend = StorageBackend::postgres(url, config.database_max_connections)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            backend
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage; data is lost on restart");
            StorageBackend::in_memory()
        }
    };

    let app = build_app(
        Arc::new(storage),
        AuthState::new(auth_config),
        &config.cors_origins,
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
