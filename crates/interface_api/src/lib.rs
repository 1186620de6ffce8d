//! HTTP API Layer
//!
//! This crate provides the REST API for the mutual-benefit society portal
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **Middleware**: Gateway identity, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::from_pool(pool, config);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_demands::DemandService;
use domain_documents::{AttachmentService, ExternalBlobStoreAdapter, ExternalBlobStoreConfig};
use domain_family::FamilyService;
use domain_profile::ProfileService;
use infra_db::{
    PgAuditRepository, PgDemandRepository, PgFamilyRepository, PgNotificationRepository,
    PgProfileRepository,
};

use crate::config::ApiConfig;
use crate::handlers::{demands, family, health, profiles};
use crate::middleware::{identity_middleware, request_log_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub demands: DemandService,
    pub family: FamilyService,
    pub profiles: ProfileService,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the services over PostgreSQL repositories and the external
    /// blob-store adapter
    pub fn from_pool(pool: PgPool, config: ApiConfig) -> Self {
        let storage = Arc::new(ExternalBlobStoreAdapter::new(ExternalBlobStoreConfig {
            base_url: config.storage_base_url.clone(),
            api_key: config.storage_api_key.clone(),
            ..Default::default()
        }));
        let attachments = AttachmentService::new(storage);

        let demands = DemandService::new(
            Arc::new(PgDemandRepository::new(pool.clone())),
            Arc::new(PgNotificationRepository::new(pool.clone())),
            attachments.clone(),
        );
        let family = FamilyService::new(
            Arc::new(PgFamilyRepository::new(pool.clone())),
            attachments,
        );
        let profiles = ProfileService::new(
            Arc::new(PgProfileRepository::new(pool.clone())),
            Arc::new(PgAuditRepository::new(pool)),
        );

        Self {
            demands,
            family,
            profiles,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state with the constructed services
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no identity required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Demand routes
    let demand_routes = Router::new()
        .route("/", post(demands::create_demand))
        .route("/", get(demands::list_demands))
        .route("/:id", get(demands::get_demand))
        .route("/:id", delete(demands::delete_demand))
        .route("/:id/status", put(demands::update_status));

    // Family registry routes
    let family_routes = Router::new()
        .route("/", get(family::list_family_members))
        .route("/", post(family::add_family_member))
        .route("/:id", put(family::update_family_member))
        .route("/:id", delete(family::delete_family_member))
        .route("/eligibility/:relation", get(family::check_eligibility));

    // Profile routes
    let profile_routes = Router::new()
        .route("/", get(profiles::list_profiles))
        .route("/", post(profiles::create_profile))
        .route("/:id", get(profiles::get_profile))
        .route("/:id", put(profiles::update_profile))
        .route("/:id", delete(profiles::delete_profile))
        .route("/:id/activate", post(profiles::activate_profile))
        .route("/:id/suspend", post(profiles::suspend_profile));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/demands", demand_routes)
        .nest("/family", family_routes)
        .nest("/profiles", profile_routes)
        .layer(axum_middleware::from_fn(request_log_middleware))
        .layer(axum_middleware::from_fn(identity_middleware));

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
