//! Response envelope shared by all check-in endpoints.
//!
//! Every body has the shape `{ "success": bool, "message": string, "data": ... }`.
//! Errors add a machine-readable `error` code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use checkin_shared::AppError;
use serde::Serialize;
use serde_json::json;

/// Successful or business-level response with HTTP 200.
pub fn envelope<T: Serialize>(success: bool, message: &str, data: T) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": success,
            "message": message,
            "data": data,
        })),
    )
        .into_response()
}

/// Error response with the status mapped from the error.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    failure(status, err.error_code(), &err.public_message())
}

/// Unsuccessful response with an explicit status and code.
pub fn failure(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "message": message,
            "error": code,
            "data": null,
        })),
    )
        .into_response()
}
