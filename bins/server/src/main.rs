//! Check-in API Server
//!
//! Main entry point for the daily check-in service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkin_api::{AppState, create_router};
use checkin_core::checkin::{CheckinService, ConfigGroupPolicy, SystemClock};
use checkin_db::{AuditLogRepository, UserRepository, connect_with};
use checkin_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checkin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    config
        .checkin
        .validate()
        .context("Invalid check-in configuration")?;
    info!(
        enabled = config.checkin.is_enabled(),
        quota_per_sign = config.checkin.quota_per_sign,
        sign_in_days = config.checkin.sign_in_days,
        timezone = %config.checkin.timezone,
        "Check-in configured"
    );

    // Connect to database
    let db = Arc::new(connect_with(&config.database).await?);

    // Create JWT service
    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    // Wire the check-in service to the repositories
    let checkin = CheckinService::new(
        config.checkin.clone(),
        Arc::new(UserRepository::new(Arc::clone(&db))),
        Arc::new(AuditLogRepository::new(Arc::clone(&db))),
        ConfigGroupPolicy::from_config(&config.checkin),
        Arc::new(SystemClock),
    );

    // Create application state
    let state = AppState {
        db,
        jwt_service: Arc::new(jwt_service),
        checkin: Arc::new(checkin),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
