//! Daily check-in routes.
//!
//! Ineligibility is a normal outcome and is answered with HTTP 200 and
//! `success: false`. Only storage faults map to error statuses.

use axum::{
    Router,
    extract::State,
    response::Response,
    routing::get,
};
use checkin_core::checkin::{CheckinError, IneligibleReason, SignResult};
use checkin_shared::AppError;
use checkin_shared::types::UserId;
use serde::Serialize;
use tracing::error;

use crate::response::{envelope, error_response};
use crate::{AppState, middleware::AuthUser};

/// Creates the check-in routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/checkin", get(get_checkin_info).post(do_checkin))
        .route("/user/checkin/calendar", get(get_calendar))
}

/// Payload of a check-in attempt.
#[derive(Debug, Serialize)]
pub struct CheckinResponse {
    /// Quota granted, 0 when rejected.
    pub quota: i64,
    /// Rejection code, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibleReason>,
}

impl From<&SignResult> for CheckinResponse {
    fn from(result: &SignResult) -> Self {
        Self {
            quota: result.quota,
            reason: result.reason,
        }
    }
}

/// POST `/user/checkin` - Claim today's reward.
async fn do_checkin(State(state): State<AppState>, auth: AuthUser) -> Response {
    let user_id = auth.user_id();

    match state.checkin.grant(user_id).await {
        Ok(result) => envelope(
            result.success,
            &result.message,
            CheckinResponse::from(&result),
        ),
        Err(e) => fault_response(user_id, e, "Failed to grant check-in reward"),
    }
}

/// GET `/user/checkin` - Check-in page summary.
async fn get_checkin_info(State(state): State<AppState>, auth: AuthUser) -> Response {
    let user_id = auth.user_id();

    match state.checkin.info_view(user_id).await {
        Ok(info) => envelope(true, "", info),
        Err(e) => fault_response(user_id, e, "Failed to load check-in info"),
    }
}

/// GET `/user/checkin/calendar` - Day-by-day signed flags.
async fn get_calendar(State(state): State<AppState>, auth: AuthUser) -> Response {
    let user_id = auth.user_id();

    match state.checkin.list_calendar(user_id).await {
        Ok(days) => envelope(true, "", days),
        Err(e) => fault_response(user_id, e, "Failed to load check-in calendar"),
    }
}

fn fault_response(user_id: UserId, e: CheckinError, context: &str) -> Response {
    if !matches!(e, CheckinError::UserNotFound(_)) {
        error!(user_id = %user_id, error = %e, "{context}");
    }
    error_response(&AppError::from(e))
}
