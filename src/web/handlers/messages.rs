//! Message feed and submission handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::logging;
use crate::record::Message;
use crate::web::state::SharedState;
use crate::web::utils::api_error;

/// All records in storage order (oldest first).  The UI reverses for
/// newest-first display.
pub async fn list_messages_handler(State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    let records = st.board.read_all();
    (StatusCode::OK, axum::Json(records)).into_response()
}

#[derive(Deserialize)]
pub struct PostMessageRequest {
    #[serde(default)]
    name: String,
    message: String,
    #[serde(default)]
    tone: String,
}

pub async fn post_message_handler(
    State(state): State<SharedState>,
    axum::Json(req): axum::Json<PostMessageRequest>,
) -> Response {
    // The only validation the board performs, and it happens here, not in
    // the store: an empty body is rejected before a record exists.
    let body = req.message.trim();
    if body.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "please write a message before sending");
    }

    let st = state.lock().await;
    let record = Message::new(&req.name, &st.recipient_string, body, &req.tone);

    // Whole-collection read-modify-write (blocking I/O under the state lock)
    st.board.append(record.clone());

    crate::wlog!(
        "message {} from {} appended",
        logging::msg_id(&record.id),
        record.name
    );
    (StatusCode::CREATED, axum::Json(record)).into_response()
}
