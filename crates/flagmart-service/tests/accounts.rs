//! Signup and login integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn signup_creates_account_with_zero_balance() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/v1/auth/signup")
        .json(&json!({ "username": "alice", "password": "hunter2" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["balance"], 0);
    assert!(body["account_id"].as_i64().is_some());
}

#[tokio::test]
async fn signup_duplicate_username_conflicts() {
    let harness = TestHarness::new().await;
    harness.signup_and_login("alice").await;

    let response = harness
        .server
        .post("/v1/auth/signup")
        .json(&json!({ "username": "alice", "password": "other" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "username_taken");
}

#[tokio::test]
async fn signup_rejects_empty_username_and_password() {
    let harness = TestHarness::new().await;

    harness
        .server
        .post("/v1/auth/signup")
        .json(&json!({ "username": "   ", "password": "hunter2" }))
        .await
        .assert_status_bad_request();

    harness
        .server
        .post("/v1/auth/signup")
        .json(&json!({ "username": "alice", "password": "" }))
        .await
        .assert_status_bad_request();
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_issues_working_session_token() {
    let harness = TestHarness::new().await;
    let (_account_id, token) = harness.signup_and_login("alice").await;

    let response = harness
        .server
        .get("/v1/catalog")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 0);
}

#[tokio::test]
async fn login_wrong_password_is_invalid_credentials() {
    let harness = TestHarness::new().await;
    harness.signup_and_login("alice").await;

    let response = harness
        .server
        .post("/v1/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;

    response.assert_status_unauthorized();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_credentials");
}

#[tokio::test]
async fn login_unknown_user_is_indistinguishable_from_wrong_password() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/v1/auth/login")
        .json(&json!({ "username": "nobody", "password": "hunter2" }))
        .await;

    response.assert_status_unauthorized();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_credentials");
}

// ============================================================================
// Token handling
// ============================================================================

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let harness = TestHarness::new().await;

    harness.server.get("/v1/catalog").await.assert_status_unauthorized();
    harness
        .server
        .post("/v1/purchases")
        .json(&json!({ "item_id": 1 }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn requests_with_garbage_token_are_unauthorized() {
    let harness = TestHarness::new().await;

    harness
        .server
        .get("/v1/catalog")
        .add_header("authorization", "Bearer not-a-real-token")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn health_is_public() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "flagmart");
}
