//! Catalog, purchase and flag-disclosure integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn catalog_lists_seeded_items_without_secrets() {
    let harness = TestHarness::new().await;
    let (_account_id, token) = harness.signup_and_login("alice").await;

    let response = harness
        .server
        .get("/v1/catalog")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);

    let flag = items.iter().find(|i| i["name"] == "Flag").unwrap();
    assert_eq!(flag["price"], 20);
    // The secret payload is never listed.
    assert!(flag.get("value").is_none());

    assert_eq!(body["balance"], 0);
}

// ============================================================================
// Purchases
// ============================================================================

#[tokio::test]
async fn purchase_debits_balance_and_appears_in_history() {
    let harness = TestHarness::new().await;
    let (account_id, token) = harness.signup_and_login("alice").await;
    harness.grant(account_id, 10).await;

    let pen_id = harness.item_id(&token, "Pen").await;
    let response = harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "item_id": pen_id }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 8);

    let history = harness
        .server
        .get("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;
    history.assert_status_ok();
    let body: serde_json::Value = history.json();
    assert_eq!(body["revealed"], false);
    let purchases = body["purchases"].as_array().unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0]["item_name"], "Pen");
    assert_eq!(purchases[0]["price"], 2);
}

#[tokio::test]
async fn purchase_with_insufficient_funds_is_rejected() {
    let harness = TestHarness::new().await;
    let (account_id, token) = harness.signup_and_login("alice").await;
    harness.grant(account_id, 5).await;

    let flag_id = harness.item_id(&token, "Flag").await;
    let response = harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "item_id": flag_id }))
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_funds");
    assert_eq!(body["error"]["details"]["balance"], 5);
    assert_eq!(body["error"]["details"]["required"], 20);

    // Balance and ledger are untouched.
    let catalog = harness
        .server
        .get("/v1/catalog")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;
    let body: serde_json::Value = catalog.json();
    assert_eq!(body["balance"], 5);

    let history = harness
        .server
        .get("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;
    let body: serde_json::Value = history.json();
    assert_eq!(body["purchases"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn purchase_unknown_item_is_not_found() {
    let harness = TestHarness::new().await;
    let (account_id, token) = harness.signup_and_login("alice").await;
    harness.grant(account_id, 100).await;

    harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "item_id": 999 }))
        .await
        .assert_status_not_found();
}

// ============================================================================
// Flag disclosure
// ============================================================================

#[tokio::test]
async fn buying_the_flag_reveals_the_secret() {
    let harness = TestHarness::new().await;
    let (account_id, token) = harness.signup_and_login("alice").await;
    harness.grant(account_id, 20).await;

    let flag_id = harness.item_id(&token, "Flag").await;
    harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "item_id": flag_id }))
        .await
        .assert_status_ok();

    let history = harness
        .server
        .get("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;
    history.assert_status_ok();
    let body: serde_json::Value = history.json();
    assert_eq!(body["revealed"], true);
    let secret = body["secret"].as_str().unwrap();
    assert!(secret.starts_with("FLAG{"));
    // The raw ledger is replaced by the secret.
    assert_eq!(body["purchases"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn buying_the_fake_flag_reveals_nothing() {
    let harness = TestHarness::new().await;
    let (_account_id, token) = harness.signup_and_login("alice").await;

    // "Fake Flag" is free, so no grant is needed.
    let fake_id = harness.item_id(&token, "Fake Flag").await;
    harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "item_id": fake_id }))
        .await
        .assert_status_ok();

    let history = harness
        .server
        .get("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;
    let body: serde_json::Value = history.json();
    assert_eq!(body["revealed"], false);
    assert!(body.get("secret").is_none());
    assert_eq!(body["purchases"].as_array().unwrap().len(), 1);
    assert_eq!(body["purchases"][0]["item_name"], "Fake Flag");
}

#[tokio::test]
async fn disclosure_is_per_account() {
    let harness = TestHarness::new().await;
    let (alice_id, alice_token) = harness.signup_and_login("alice").await;
    let (_bob_id, bob_token) = harness.signup_and_login("bob").await;

    harness.grant(alice_id, 20).await;
    let flag_id = harness.item_id(&alice_token, "Flag").await;
    harness
        .server
        .post("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&alice_token))
        .json(&json!({ "item_id": flag_id }))
        .await
        .assert_status_ok();

    // Bob's history stays undisclosed.
    let history = harness
        .server
        .get("/v1/purchases")
        .add_header("authorization", TestHarness::bearer(&bob_token))
        .await;
    let body: serde_json::Value = history.json();
    assert_eq!(body["revealed"], false);
}

// ============================================================================
// Admin grants
// ============================================================================

#[tokio::test]
async fn grant_requires_the_admin_key() {
    let harness = TestHarness::new().await;
    let (account_id, _token) = harness.signup_and_login("alice").await;

    harness
        .server
        .post("/v1/balance/add")
        .json(&json!({ "account_id": account_id, "amount": 10 }))
        .await
        .assert_status_unauthorized();

    harness
        .server
        .post("/v1/balance/add")
        .add_header("x-admin-key", "wrong-key")
        .json(&json!({ "account_id": account_id, "amount": 10 }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn grant_rejects_non_positive_amounts() {
    let harness = TestHarness::new().await;
    let (account_id, _token) = harness.signup_and_login("alice").await;

    harness
        .server
        .post("/v1/balance/add")
        .add_header("x-admin-key", harness.admin_key.as_str())
        .json(&json!({ "account_id": account_id, "amount": 0 }))
        .await
        .assert_status_bad_request();
}
