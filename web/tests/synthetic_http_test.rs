//! HTTP contract tests for the synthetic telemetry endpoints.
//!
//! Runs the full router (prefix, layers, fallback) in-process against
//! deterministic clock and session ids.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Integration tests can use expect for setup

use axum::http::StatusCode;
use axum_test::TestServer;
use booking_mock_testing::{SequentialSessionIds, test_clock};
use booking_mock_web::{AppState, RouterOptions, build_router};
use serde_json::{Value, json};
use std::sync::Arc;

fn server() -> TestServer {
    let state = AppState::with_environment(
        Arc::new(test_clock()),
        Arc::new(SequentialSessionIds::new()),
    );
    TestServer::new(build_router(state, &RouterOptions::default())).expect("test server")
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let server = server();

    let response = server.post("/_synthetic/new_session").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let session_id = response.json::<Value>()["session_id"]
        .as_str()
        .expect("session id")
        .to_string();
    assert_eq!(session_id, "session-1");

    let response = server
        .post("/_synthetic/log_event")
        .add_query_param("session_id", &session_id)
        .json(&json!({"actionType": "click", "payload": {"x": 1}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "logged"}));

    let response = server
        .get("/_synthetic/logs")
        .add_query_param("session_id", &session_id)
        .await;
    assert_eq!(
        response.json::<Value>(),
        json!([{
            "session_id": "session-1",
            "action_type": "click",
            "payload": {"x": 1},
            "timestamp": "2025-01-01T00:00:00Z",
        }])
    );

    let response = server
        .post("/_synthetic/log_event")
        .add_query_param("session_id", &session_id)
        .json(&json!({"actionType": "bogus", "payload": {}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "Invalid action type: bogus"})
    );

    let logs = server
        .get("/_synthetic/logs")
        .add_query_param("session_id", &session_id)
        .await
        .json::<Vec<Value>>();
    assert_eq!(logs.len(), 1);

    let response = server.post("/_synthetic/reset").await;
    assert_eq!(response.json::<Value>(), json!({"status": "ok", "seed": null}));

    let logs = server.get("/_synthetic/logs").await.json::<Vec<Value>>();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn test_new_session_sets_cookie() {
    let server = server();

    let response = server
        .post("/_synthetic/new_session")
        .add_query_param("seed", "7")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("session_id=session-1;"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.to_ascii_lowercase().contains("httponly"));
}

#[tokio::test]
async fn test_new_session_twice_gives_distinct_ids() {
    let server = server();
    let first = server.post("/_synthetic/new_session").await.json::<Value>();
    let second = server.post("/_synthetic/new_session").await.json::<Value>();
    assert_ne!(first["session_id"], second["session_id"]);
}

#[tokio::test]
async fn test_reset_echoes_seed() {
    let server = server();
    let response = server
        .post("/_synthetic/reset")
        .add_query_param("seed", "abc")
        .await;
    assert_eq!(response.json::<Value>(), json!({"status": "ok", "seed": "abc"}));
}

#[tokio::test]
async fn test_missing_action_type() {
    let server = server();
    let response = server
        .post("/_synthetic/log_event")
        .json(&json!({"payload": {"x": 1}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "Invalid action type: None"})
    );
    assert!(server.get("/_synthetic/logs").await.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_log_without_session_uses_fallback_bucket() {
    let server = server();
    server
        .post("/_synthetic/log_event")
        .json(&json!({"actionType": "navigation"}))
        .await;

    let logs = server
        .get("/_synthetic/logs")
        .add_query_param("session_id", "no_session")
        .await
        .json::<Vec<Value>>();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["session_id"], "no_session");
    assert_eq!(logs[0]["payload"], json!({}));
}

#[tokio::test]
async fn test_unknown_session_reads_empty() {
    let server = server();
    let response = server
        .get("/_synthetic/logs")
        .add_query_param("session_id", "does-not-exist")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_global_logs_order_parameter() {
    let server = server();
    for (session, x) in [("b", 1), ("a", 2), ("b", 3)] {
        server
            .post("/_synthetic/log_event")
            .add_query_param("session_id", session)
            .json(&json!({"actionType": "scroll", "payload": {"x": x}}))
            .await;
    }

    let grouped: Vec<Value> = server
        .get("/_synthetic/logs")
        .await
        .json::<Vec<Value>>()
        .into_iter()
        .map(|e| e["payload"]["x"].clone())
        .collect();
    assert_eq!(grouped, vec![json!(1), json!(3), json!(2)]);

    let interleaved: Vec<Value> = server
        .get("/_synthetic/logs")
        .add_query_param("order", "chronological")
        .await
        .json::<Vec<Value>>()
        .into_iter()
        .map(|e| e["payload"]["x"].clone())
        .collect();
    assert_eq!(interleaved, vec![json!(1), json!(2), json!(3)]);

    let sessions = server.get("/_synthetic/sessions").await.json::<Vec<Value>>();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["session_id"], "b");
    assert_eq!(sessions[0]["event_count"], 2);
}

#[tokio::test]
async fn test_reset_and_new_session_clear_bookings() {
    let server = server();

    let response = server
        .post("/bookings")
        .json(&json!({"movieId": "1", "seats": ["A1"]}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let created = response.json::<Value>();
    assert_eq!(created["status"], "success");
    assert_eq!(created["booking"]["movieId"], "1");

    let profile = server.get("/users").await.json::<Value>();
    assert_eq!(profile["bookings"].as_array().map(Vec::len), Some(1));

    server.post("/_synthetic/reset").await;
    assert!(server.get("/bookings").await.json::<Vec<Value>>().is_empty());

    server.post("/bookings").json(&json!({"playId": "2"})).await;
    server.post("/_synthetic/new_session").await;
    assert!(server.get("/bookings").await.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_payload_null_is_stored_as_null() {
    let server = server();
    server
        .post("/_synthetic/log_event")
        .add_query_param("session_id", "s")
        .json(&json!({"actionType": "click", "payload": null}))
        .await;
    server
        .post("/_synthetic/log_event")
        .add_query_param("session_id", "s")
        .json(&json!({"actionType": "click"}))
        .await;

    let logs = server
        .get("/_synthetic/logs")
        .add_query_param("session_id", "s")
        .await
        .json::<Vec<Value>>();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["payload"], Value::Null);
    assert_eq!(logs[1]["payload"], json!({}));
}

#[tokio::test]
async fn test_falsy_action_type_reports_none() {
    let server = server();
    for label in [json!(false), json!(0), json!([]), json!({})] {
        let response = server
            .post("/_synthetic/log_event")
            .json(&json!({"actionType": label}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"detail": "Invalid action type: None"})
        );
    }
}

#[tokio::test]
async fn test_unknown_order_is_json_client_error() {
    let server = server();
    let response = server
        .get("/_synthetic/logs")
        .add_query_param("order", "sideways")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn test_malformed_body_is_json_client_error() {
    let server = server();
    let response = server
        .post("/_synthetic/log_event")
        .text("{not json")
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["detail"].is_string());
    assert!(server.get("/_synthetic/logs").await.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_client_booking_id_wins() {
    let server = server();
    let created = server
        .post("/bookings")
        .json(&json!({"id": "mine", "x": 1}))
        .await
        .json::<Value>();
    assert_eq!(created["booking"], json!({"id": "mine", "x": 1}));
}
