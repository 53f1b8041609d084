//! HTTP-level webhook tests: signed deliveries in, background canvas
//! updates out.

mod common;

use common::TestServer;
use serde_json::json;

use canvas_relay::Block;

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;
    let response = reqwest::get(format!("{}/health", server.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_rejects_unsigned_delivery() {
    let server = TestServer::start().await;
    let response = reqwest::Client::new()
        .post(format!("{}/webhook", server.base_url))
        .json(&json!({ "kind": "canvas.interaction", "canvas_id": "cnv_1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_rejects_wrong_signature() {
    let server = TestServer::start().await;
    let response = reqwest::Client::new()
        .post(format!("{}/webhook", server.base_url))
        .header("x-relay-signature", "bm90LWEtcmVhbC1zaWduYXR1cmU=")
        .header("x-relay-timestamp", chrono::Utc::now().timestamp().to_string())
        .json(&json!({ "kind": "canvas.interaction", "canvas_id": "cnv_1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_rejects_malformed_body() {
    let server = TestServer::start().await;
    let response = server.post_webhook(&json!({ "kind": "canvas.interaction" })).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_initialized_publishes_overview() {
    let server = TestServer::start().await;
    server.seed_entry("etr_1", "lab/exp-001", 5);

    let response = server
        .post_webhook(&json!({
            "kind": "canvas.initialized",
            "canvas_id": "cnv_init",
            "entry_id": "etr_1"
        }))
        .await;
    assert_eq!(response.status(), 200);

    let blocks = server.wait_for_publish("cnv_init").await;
    match &blocks[0] {
        Block::Markdown { value, .. } => assert!(value.contains("lab/exp-001")),
        other => panic!("unexpected first block: {other:?}"),
    }
}

#[tokio::test]
async fn test_interaction_publishes_listing() {
    let server = TestServer::start().await;
    server.seed_entry("etr_1", "lab/exp-001", 40);

    server
        .post_webhook(&json!({
            "kind": "canvas.interaction",
            "canvas_id": "cnv_browse",
            "entry_id": "etr_1",
            "button_id": "browse-files-etr_1-p1-s15"
        }))
        .await;

    let blocks = server.wait_for_publish("cnv_browse").await;
    match &blocks[0] {
        Block::Markdown { value, .. } => {
            assert!(value.contains("page 2 of 3"));
            assert!(value.contains("file_015.csv"));
        }
        other => panic!("unexpected first block: {other:?}"),
    }
}

#[tokio::test]
async fn test_stray_button_never_breaks_the_canvas() {
    let server = TestServer::start().await;
    server.seed_entry("etr_1", "lab/exp-001", 5);

    let response = server
        .post_webhook(&json!({
            "kind": "canvas.interaction",
            "canvas_id": "cnv_stray",
            "entry_id": "etr_1",
            "button_id": "legacy-button-from-an-old-session"
        }))
        .await;
    // the delivery is acknowledged, not failed
    assert_eq!(response.status(), 200);

    let blocks = server.wait_for_publish("cnv_stray").await;
    match &blocks[0] {
        Block::Markdown { value, .. } => assert!(value.contains("no longer available")),
        other => panic!("unexpected first block: {other:?}"),
    }
}

#[tokio::test]
async fn test_unhandled_event_kind_is_ignored() {
    let server = TestServer::start().await;
    let response = server
        .post_webhook(&json!({
            "kind": "entry.updated",
            "canvas_id": "cnv_other"
        }))
        .await;
    assert_eq!(response.status(), 200);

    tokio::time::sleep(tokio::time::Duration::from_millis(150)).await;
    assert!(server.canvas.last_for("cnv_other").is_none());
}
