//! Teacher Payments - API Server Binary
//!
//! This binary starts the HTTP API server for the teacher payments claim engine.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin teacher-payments-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_ACADEMIC_YEAR=2022/2023 API_SCHOOLS_PATH=schools.json cargo run --bin teacher-payments-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)
//! * `API_SESSION_TIMEOUT_MINUTES` - Journey session inactivity timeout (default: 30)
//! * `API_ACADEMIC_YEAR` - Academic year claims are made in (default: current)
//! * `API_SCHOOLS_PATH` - JSON file of schools served by the school search

use anyhow::Context;
use chrono::Utc;
use interface_api::{config::ApiConfig, create_router, session::SessionStore, AppState};
use domain_eligibility::School;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How often idle journey sessions are purged
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration and reference data, and starts
/// the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The schools file cannot be read
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("loading API configuration")?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting teacher payments API server"
    );

    let schools = load_schools(config.schools_path.as_deref())?;
    let state = AppState::in_memory(config.clone(), schools).context("building application state")?;

    tokio::spawn(purge_sessions(state.sessions.clone()));

    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("parsing server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Reads the schools served by the school search
///
/// No path means an empty directory.
fn load_schools(path: Option<&str>) -> anyhow::Result<Vec<School>> {
    let Some(path) = path else {
        tracing::warn!("API_SCHOOLS_PATH not set, school search will return no results");
        return Ok(Vec::new());
    };

    let contents = std::fs::read_to_string(path).with_context(|| format!("reading schools from {}", path))?;
    let schools: Vec<School> =
        serde_json::from_str(&contents).with_context(|| format!("parsing schools from {}", path))?;

    tracing::info!(count = schools.len(), "Loaded schools");
    Ok(schools)
}

/// Discards idle journey sessions until the server stops
async fn purge_sessions(sessions: SessionStore) {
    let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
    loop {
        interval.tick().await;
        sessions.purge_expired(Utc::now()).await;
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
