//! Axum router construction.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::web::handlers;
use crate::web::state::SharedState;
use crate::web::static_files::static_handler;

/// Build the complete router with all API routes and static file serving.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .route("/api/board", get(handlers::board::board_handler))
        // Messages API
        .route(
            "/api/messages",
            get(handlers::messages::list_messages_handler)
                .post(handlers::messages::post_message_handler),
        )
        // Admin API
        .route("/api/admin/login", post(handlers::admin::login_handler))
        .route("/api/admin/logout", post(handlers::admin::logout_handler))
        .route("/api/admin/stats", get(handlers::admin::stats_handler))
        .route("/api/admin/export", get(handlers::admin::export_handler))
        .route(
            "/api/admin/messages/:message_id",
            delete(handlers::admin::delete_message_handler),
        )
        .route("/api/admin/clear", post(handlers::admin::clear_handler))
        // Static fallback
        .fallback(get(static_handler))
        .with_state(state)
}
