//! Health check endpoint.
//!
//! Doubles as the "storage connected / processing" indicator: backend
//! failures are invisible everywhere else in the API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::web::state::SharedState;

pub async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let st = state.lock().await;
    let message_count = st.board.read_all().len();

    let body = serde_json::json!({
        "status": "ok",
        "backend": st.board.backend_name(),
        "storage_connected": st.board.connected(),
        "messages": message_count,
    });
    (StatusCode::OK, axum::Json(body))
}
