//! End-to-end API tests over a fallback-only board.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tokio::sync::{oneshot, Mutex};

use wishboard::record::ANONYMOUS;
use wishboard::storage::Board;
use wishboard::web::router::build_router;
use wishboard::web::state::{AppState, SharedState};

fn test_dir() -> PathBuf {
    let pid = std::process::id();
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("wishboard-web-test-{pid}-{ts}"))
}

fn test_state(admin_key: Option<&str>) -> SharedState {
    Arc::new(Mutex::new(AppState {
        board: Board::local(&test_dir()),
        title: "Good Luck Board".to_string(),
        subtitle: "Send warm exam wishes!".to_string(),
        recipients: Vec::new(),
        recipient_string: "Everyone".to_string(),
        admin_key: admin_key.map(str::to_string),
        admin_authenticated: false,
    }))
}

async fn start_app(state: SharedState) -> (String, oneshot::Sender<()>) {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind app");
    let addr = listener.local_addr().expect("app addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        let _ = shutdown_rx.await;
    });
    tokio::spawn(async move {
        let _ = server.await;
    });

    (format!("http://{}", addr), shutdown_tx)
}

fn post_json(url: &str, body: Value) -> Result<Value, u16> {
    match ureq::post(url).send_json(body) {
        Ok(resp) => Ok(resp.into_json().expect("json body")),
        Err(ureq::Error::Status(code, _)) => Err(code),
        Err(e) => panic!("transport error: {e}"),
    }
}

fn get_json(url: &str) -> Result<Value, u16> {
    match ureq::get(url).call() {
        Ok(resp) => Ok(resp.into_json().expect("json body")),
        Err(ureq::Error::Status(code, _)) => Err(code),
        Err(e) => panic!("transport error: {e}"),
    }
}

#[tokio::test]
async fn post_rejects_blank_message() {
    let (base, shutdown_tx) = start_app(test_state(None)).await;

    let status = tokio::task::spawn_blocking(move || {
        post_json(
            &format!("{base}/api/messages"),
            serde_json::json!({ "name": "Ann", "message": "   \n  ", "tone": "calm" }),
        )
        .unwrap_err()
    })
    .await
    .expect("join");
    assert_eq!(status, 400);

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn post_then_list_preserves_order_and_defaults() {
    let (base, shutdown_tx) = start_app(test_state(None)).await;

    let listed = tokio::task::spawn_blocking(move || {
        let first = post_json(
            &format!("{base}/api/messages"),
            serde_json::json!({ "name": "  ", "message": "Good luck!", "tone": "calm" }),
        )
        .expect("first post");
        // Blank names fall back to the anonymous sentinel
        assert_eq!(first["name"], ANONYMOUS);
        assert_eq!(first["recipient"], "Everyone");
        assert_eq!(first["message"], "Good luck!");
        assert!(first["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(first["timestamp"]
            .as_str()
            .is_some_and(|ts| ts.ends_with(" UTC")));

        post_json(
            &format!("{base}/api/messages"),
            serde_json::json!({ "name": "Ben", "message": "second", "tone": "" }),
        )
        .expect("second post");

        get_json(&format!("{base}/api/messages")).expect("list")
    })
    .await
    .expect("join");

    let records = listed.as_array().expect("array");
    assert_eq!(records.len(), 2);
    // Storage order: oldest first
    assert_eq!(records[0]["message"], "Good luck!");
    assert_eq!(records[1]["message"], "second");
    assert_ne!(records[0]["id"], records[1]["id"]);

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn health_reports_local_backend() {
    let (base, shutdown_tx) = start_app(test_state(None)).await;

    let health = tokio::task::spawn_blocking(move || {
        get_json(&format!("{base}/api/health")).expect("health")
    })
    .await
    .expect("join");

    assert_eq!(health["status"], "ok");
    assert_eq!(health["backend"], "local");
    assert_eq!(health["storage_connected"], false);
    assert_eq!(health["messages"], 0);

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn board_info_lists_templates_and_tones() {
    let (base, shutdown_tx) = start_app(test_state(Some("s3cret"))).await;

    let info = tokio::task::spawn_blocking(move || {
        get_json(&format!("{base}/api/board")).expect("board")
    })
    .await
    .expect("join");

    assert_eq!(info["title"], "Good Luck Board");
    assert_eq!(info["admin_enabled"], true);
    assert_eq!(info["templates"].as_array().expect("templates").len(), 5);
    assert!(info["tones"]
        .as_array()
        .expect("tones")
        .iter()
        .any(|t| t == "inspirational"));

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn admin_endpoints_require_login() {
    let (base, shutdown_tx) = start_app(test_state(Some("s3cret"))).await;

    tokio::task::spawn_blocking(move || {
        // Locked before login
        assert_eq!(get_json(&format!("{base}/api/admin/stats")).unwrap_err(), 401);
        assert_eq!(get_json(&format!("{base}/api/admin/export")).unwrap_err(), 401);

        // Wrong key, then empty key
        assert_eq!(
            post_json(
                &format!("{base}/api/admin/login"),
                serde_json::json!({ "key": "wrong" })
            )
            .unwrap_err(),
            401
        );
        assert_eq!(
            post_json(
                &format!("{base}/api/admin/login"),
                serde_json::json!({ "key": "" })
            )
            .unwrap_err(),
            401
        );

        // Exact match unlocks
        let resp = post_json(
            &format!("{base}/api/admin/login"),
            serde_json::json!({ "key": "s3cret" }),
        )
        .expect("login");
        assert_eq!(resp["authenticated"], true);

        let stats = get_json(&format!("{base}/api/admin/stats")).expect("stats");
        assert_eq!(stats["total_messages"], 0);

        // Logout locks again
        post_json(&format!("{base}/api/admin/logout"), serde_json::json!({})).expect("logout");
        assert_eq!(get_json(&format!("{base}/api/admin/stats")).unwrap_err(), 401);
    })
    .await
    .expect("join");

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn admin_login_always_fails_without_configured_key() {
    let (base, shutdown_tx) = start_app(test_state(None)).await;

    let status = tokio::task::spawn_blocking(move || {
        post_json(
            &format!("{base}/api/admin/login"),
            serde_json::json!({ "key": "anything" }),
        )
        .unwrap_err()
    })
    .await
    .expect("join");
    assert_eq!(status, 401);

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn admin_delete_clear_and_export() {
    let (base, shutdown_tx) = start_app(test_state(Some("s3cret"))).await;

    tokio::task::spawn_blocking(move || {
        for (name, body) in [("Ann", "one"), ("Ben", "two"), ("Ann", "three")] {
            post_json(
                &format!("{base}/api/messages"),
                serde_json::json!({ "name": name, "message": body, "tone": "calm" }),
            )
            .expect("post");
        }
        post_json(
            &format!("{base}/api/admin/login"),
            serde_json::json!({ "key": "s3cret" }),
        )
        .expect("login");

        let stats = get_json(&format!("{base}/api/admin/stats")).expect("stats");
        assert_eq!(stats["total_messages"], 3);
        assert_eq!(stats["unique_senders"], 2);

        // Export is the full pretty-printed collection
        let resp = ureq::get(&format!("{base}/api/admin/export"))
            .call()
            .expect("export");
        assert!(resp
            .header("content-disposition")
            .is_some_and(|d| d.contains("good_luck_messages.json")));
        let exported: Value =
            serde_json::from_str(&resp.into_string().expect("body")).expect("json");
        assert_eq!(exported.as_array().expect("array").len(), 3);

        // Delete the middle record
        let listed = get_json(&format!("{base}/api/messages")).expect("list");
        let victim = listed[1]["id"].as_str().expect("id").to_string();
        ureq::delete(&format!("{base}/api/admin/messages/{victim}"))
            .call()
            .expect("delete");
        let listed = get_json(&format!("{base}/api/messages")).expect("list");
        let bodies: Vec<&str> = listed
            .as_array()
            .expect("array")
            .iter()
            .map(|m| m["message"].as_str().unwrap())
            .collect();
        assert_eq!(bodies, vec!["one", "three"]);

        // Deleting a missing id is a quiet no-op
        ureq::delete(&format!("{base}/api/admin/messages/does-not-exist"))
            .call()
            .expect("delete missing");
        assert_eq!(
            get_json(&format!("{base}/api/messages"))
                .expect("list")
                .as_array()
                .expect("array")
                .len(),
            2
        );

        // Clear wipes the board
        post_json(&format!("{base}/api/admin/clear"), serde_json::json!({})).expect("clear");
        assert!(get_json(&format!("{base}/api/messages"))
            .expect("list")
            .as_array()
            .expect("array")
            .is_empty());
    })
    .await
    .expect("join");

    let _ = shutdown_tx.send(());
}
