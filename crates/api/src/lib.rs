//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the check-in feature
//! - Authentication middleware
//! - The `{success, message, data}` response envelope

pub mod middleware;
pub mod response;
pub mod routes;

use axum::Router;
use checkin_core::checkin::{CheckinService, ConfigGroupPolicy};
use checkin_db::{AuditLogRepository, UserRepository};
use checkin_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Check-in service wired to the database repositories.
pub type DbCheckinService = CheckinService<UserRepository, AuditLogRepository, ConfigGroupPolicy>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Check-in service.
    pub checkin: Arc<DbCheckinService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
