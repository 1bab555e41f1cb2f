//! Shared utility functions for the web layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::web::state::AppState;

/// Build a standard JSON error response.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, axum::Json(body)).into_response()
}

/// Gate for admin-only handlers.  Storage failures are never surfaced to
/// users; auth failures are one of the two exceptions (the other is form
/// validation).
pub fn require_admin(state: &AppState) -> Result<(), Response> {
    if state.admin_authenticated {
        Ok(())
    } else {
        Err(api_error(
            StatusCode::UNAUTHORIZED,
            "admin authentication required",
        ))
    }
}
