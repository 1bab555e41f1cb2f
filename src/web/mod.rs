//! wishboard web server: serves the embedded single-page board UI and a
//! small REST API over the storage facade.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
pub mod static_files;
pub mod utils;

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use crate::storage::{Board, BoardConfig};

use config::{Cli, Config};
use state::{AppState, SharedState};

/// Entry point: parse CLI, resolve the storage backend, start the server.
pub async fn run() {
    let cli = Cli::parse();
    let config = Config::from_cli_and_env(cli);

    crate::logging::init();

    crate::wlog!("wishboard starting");
    crate::wlog!("  data directory: {}", config.data_dir.display());

    let board = Board::open(&BoardConfig {
        data_dir: config.data_dir.clone(),
        sheet_api: config.sheet_api.clone(),
        credentials_path: config.credentials_path.clone(),
        sheet_title: config.sheet_title.clone(),
    });
    crate::wlog!(
        "  storage backend: {}{}",
        board.backend_name(),
        if board.connected() { "" } else { " (fallback)" }
    );

    match &config.admin_key {
        Some(_) => crate::wlog!("  admin panel: enabled"),
        None => crate::wlog!("  admin panel: disabled (no admin key configured)"),
    }
    if config.recipients.is_empty() {
        crate::wlog!("  recipients: none configured (generic board)");
    } else {
        crate::wlog!("  recipients: {}", config.recipients.join(", "));
    }

    let state: SharedState = Arc::new(Mutex::new(AppState {
        board,
        title: config.title(),
        subtitle: config.subtitle(),
        recipients: config.recipients.clone(),
        recipient_string: config.recipient_string(),
        admin_key: config.admin_key.clone(),
        admin_authenticated: false,
    }));

    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind");
    crate::wlog!("wishboard listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.expect("server error");
}
