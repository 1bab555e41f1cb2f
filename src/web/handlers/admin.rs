//! Password-gated admin panel: login/logout, statistics, export, deletion.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::logging;
use crate::web::state::SharedState;
use crate::web::utils::{api_error, require_admin};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    key: String,
}

/// Exact string equality against the configured key; no hashing, no rate
/// limiting, no lockout.  With no key configured the panel stays locked.
pub async fn login_handler(
    State(state): State<SharedState>,
    axum::Json(req): axum::Json<LoginRequest>,
) -> Response {
    let mut st = state.lock().await;
    let valid = match &st.admin_key {
        Some(secret) => !req.key.is_empty() && req.key == *secret,
        None => false,
    };
    if valid {
        st.admin_authenticated = true;
        crate::wlog!("admin authenticated");
        (
            StatusCode::OK,
            axum::Json(serde_json::json!({ "authenticated": true })),
        )
            .into_response()
    } else {
        api_error(StatusCode::UNAUTHORIZED, "invalid admin password")
    }
}

pub async fn logout_handler(State(state): State<SharedState>) -> Response {
    let mut st = state.lock().await;
    st.admin_authenticated = false;
    crate::wlog!("admin logged out");
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "authenticated": false })),
    )
        .into_response()
}

pub async fn stats_handler(State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    if let Err(resp) = require_admin(&st) {
        return resp;
    }

    let records = st.board.read_all();
    let senders: HashSet<&str> = records.iter().map(|m| m.name.as_str()).collect();

    let body = serde_json::json!({
        "total_messages": records.len(),
        "unique_senders": senders.len(),
        "backend": st.board.backend_name(),
        "storage_connected": st.board.connected(),
    });
    (StatusCode::OK, axum::Json(body)).into_response()
}

/// Pretty JSON download of the whole collection.
pub async fn export_handler(State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    if let Err(resp) = require_admin(&st) {
        return resp;
    }

    let records = st.board.read_all();
    let data = serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"good_luck_messages.json\"",
            ),
        ],
        data,
    )
        .into_response()
}

/// Delete one record.  Succeeds whether or not the id exists.
pub async fn delete_message_handler(
    State(state): State<SharedState>,
    Path(message_id): Path<String>,
) -> Response {
    let st = state.lock().await;
    if let Err(resp) = require_admin(&st) {
        return resp;
    }

    st.board.delete_by_id(&message_id);
    crate::wlog!("message {} deleted", logging::msg_id(&message_id));
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "deleted": message_id })),
    )
        .into_response()
}

/// Wipe the whole board.
pub async fn clear_handler(State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    if let Err(resp) = require_admin(&st) {
        return resp;
    }

    st.board.write_all(&[]);
    crate::wlog!("all messages cleared");
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "cleared": true })),
    )
        .into_response()
}
