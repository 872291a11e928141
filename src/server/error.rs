// Error handling utilities and response helpers

use crate::error::Error;
use crate::response;
use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

/// Helper to create a JSON error response
pub fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (
        status,
        axum::Json(json!({ "success": false, "error": message })),
    )
}

/// Helper for "not found" errors
pub fn not_found(message: &str) -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, message)
}

/// HTTP status for an operation failure
pub fn status_for(error: &Error) -> StatusCode {
    if error.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

/// Envelope response for an operation result
pub fn respond<T: Serialize>(result: crate::Result<T>) -> axum::response::Response {
    match result {
        Ok(payload) => (StatusCode::OK, axum::Json(response::success(&payload))).into_response(),
        Err(e) => {
            log::warn!("Request failed: {}", e);
            (status_for(&e), axum::Json(response::failure(&e))).into_response()
        }
    }
}
