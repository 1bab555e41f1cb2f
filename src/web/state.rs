//! Shared application state.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::storage::Board;

pub struct AppState {
    pub board: Board,
    pub title: String,
    pub subtitle: String,
    pub recipients: Vec<String>,
    /// Stored on every submitted record (`"Everyone"` when no recipients
    /// are configured).
    pub recipient_string: String,
    /// Shared admin secret; `None` disables the admin panel entirely.
    pub admin_key: Option<String>,
    /// Session flag, set by login and reset by logout.  Exact string
    /// equality against `admin_key` is the whole credential system.
    pub admin_authenticated: bool,
}

pub type SharedState = Arc<Mutex<AppState>>;
