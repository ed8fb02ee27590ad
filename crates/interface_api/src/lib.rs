//! HTTP API Layer
//!
//! This crate exposes the claims engine over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claimant journeys, school search and admin decisions
//! - **Sessions**: in-progress claims held between journey requests
//! - **Middleware**: request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::in_memory(config, schools)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod session;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_claims::adapters::{InMemoryClaimStore, InMemorySchoolDirectory, TracingNotificationSender};
use domain_claims::{ClaimStore, NotificationSender, PolicyConfigurationProvider, SchoolDirectory};
use domain_eligibility::School;

use crate::config::ApiConfig;
use crate::handlers::{claims, health, journeys, schools};
use crate::middleware::request_logging;
use crate::session::SessionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub sessions: SessionStore,
    pub policy_config: Arc<dyn PolicyConfigurationProvider>,
    pub claims: Arc<dyn ClaimStore>,
    pub schools: Arc<dyn SchoolDirectory>,
    pub notifications: Arc<dyn NotificationSender>,
    /// Serialises read-modify-write of stored claims by admin handlers
    pub admin_writes: Arc<Mutex<()>>,
}

impl AppState {
    /// State over explicit adapters
    pub fn new(
        config: ApiConfig,
        policy_config: Arc<dyn PolicyConfigurationProvider>,
        claims: Arc<dyn ClaimStore>,
        schools: Arc<dyn SchoolDirectory>,
        notifications: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(config.session_timeout()),
            config,
            policy_config,
            claims,
            schools,
            notifications,
            admin_writes: Arc::new(Mutex::new(())),
        }
    }

    /// State over the in-memory adapters
    ///
    /// # Errors
    ///
    /// Returns an error if the configured academic year is invalid
    pub fn in_memory(config: ApiConfig, schools: Vec<School>) -> Result<Self, ::config::ConfigError> {
        let policy_config = config.policy_configuration()?;
        Ok(Self::new(
            config,
            Arc::new(policy_config),
            Arc::new(InMemoryClaimStore::new()),
            Arc::new(InMemorySchoolDirectory::new(schools)),
            Arc::new(TracingNotificationSender::new()),
        ))
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Adapters, sessions and configuration shared by handlers
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Journey routes
    let journey_routes = Router::new()
        .route("/", post(journeys::start_journey))
        .route("/:id", get(journeys::get_journey))
        .route("/:id/slugs/:slug", get(journeys::show_page).post(journeys::answer_page))
        .route("/:id/submit", post(journeys::submit_journey));

    // Admin claim routes
    let claims_routes = Router::new()
        .route("/", get(claims::find_claim))
        .route("/:id", get(claims::get_claim))
        .route("/:id/decisions", post(claims::create_decision))
        .route("/:id/decisions/undo", post(claims::undo_decision))
        .route("/:id/hold", put(claims::set_hold))
        .route("/:id/payment", put(claims::record_payment));

    let api_routes = Router::new()
        .nest("/journeys", journey_routes)
        .nest("/claims", claims_routes)
        .route("/schools", get(schools::search_schools))
        .layer(axum_middleware::from_fn(request_logging));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
