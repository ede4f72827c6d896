use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use bankly_api::auth::{CredentialHasher, TokenCodec};
use bankly_api::config;
use bankly_api::database::PgUserStore;
use bankly_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting Bankly API in {:?} mode", config.environment);

    // A missing secret is fatal: no token could ever be issued or verified
    let codec = TokenCodec::from_config(&config.security).context("invalid token configuration")?;
    let hasher = CredentialHasher::from_config(&config.security).context("invalid password hashing configuration")?;
    let store = PgUserStore::connect(&config.database)
        .await
        .context("failed to connect to the user store")?;

    let state = AppState::new(codec, hasher, Arc::new(store.clone()))
        .with_audit_logging(config.security.enable_audit_logging);

    let mut app = bankly_api::app(state).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));
    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Bankly API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
