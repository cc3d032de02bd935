//! Coupon redemption integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn redeeming_a_coupon_credits_the_balance() {
    let harness = TestHarness::new().await;
    let (_account_id, token) = harness.signup_and_login("alice").await;

    let response = harness
        .server
        .post("/v1/coupons/redeem")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "code": "FREE10DOLLARS" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 10);
    assert_eq!(body["code"], "FREE10DOLLARS");
}

#[tokio::test]
async fn a_coupon_redeems_at_most_once_per_account() {
    let harness = TestHarness::new().await;
    let (_account_id, token) = harness.signup_and_login("alice").await;

    harness
        .server
        .post("/v1/coupons/redeem")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "code": "FREE10DOLLARS" }))
        .await
        .assert_status_ok();

    let second = harness
        .server
        .post("/v1/coupons/redeem")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "code": "FREE10DOLLARS" }))
        .await;

    second.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = second.json();
    assert_eq!(body["error"]["code"], "already_redeemed");

    // The second attempt did not credit anything.
    let catalog = harness
        .server
        .get("/v1/catalog")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;
    let body: serde_json::Value = catalog.json();
    assert_eq!(body["balance"], 10);
}

#[tokio::test]
async fn each_account_gets_its_own_redemption() {
    let harness = TestHarness::new().await;
    let (_alice_id, alice_token) = harness.signup_and_login("alice").await;
    let (_bob_id, bob_token) = harness.signup_and_login("bob").await;

    for token in [&alice_token, &bob_token] {
        harness
            .server
            .post("/v1/coupons/redeem")
            .add_header("authorization", TestHarness::bearer(token))
            .json(&json!({ "code": "FREE10DOLLARS" }))
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn unknown_coupon_is_not_found() {
    let harness = TestHarness::new().await;
    let (_account_id, token) = harness.signup_and_login("alice").await;

    let response = harness
        .server
        .post("/v1/coupons/redeem")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "code": "NOSUCHCODE" }))
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_coupon");
}

#[tokio::test]
async fn empty_coupon_code_is_rejected() {
    let harness = TestHarness::new().await;
    let (_account_id, token) = harness.signup_and_login("alice").await;

    harness
        .server
        .post("/v1/coupons/redeem")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "code": "  " }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn redeem_requires_a_session() {
    let harness = TestHarness::new().await;

    harness
        .server
        .post("/v1/coupons/redeem")
        .json(&json!({ "code": "FREE10DOLLARS" }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_redemptions_credit_exactly_once() {
    let harness = TestHarness::new().await;
    let (_account_id, token) = harness.signup_and_login("alice").await;

    let attempts = (0..8).map(|_| {
        let server = &harness.server;
        let token = token.clone();
        async move {
            server
                .post("/v1/coupons/redeem")
                .add_header("authorization", TestHarness::bearer(&token))
                .json(&json!({ "code": "FREE10DOLLARS" }))
                .await
                .status_code()
        }
    });
    let statuses = futures::future::join_all(attempts).await;

    let ok = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let conflicts = statuses
        .iter()
        .filter(|s| **s == StatusCode::CONFLICT)
        .count();
    assert_eq!(ok, 1);
    assert_eq!(conflicts, statuses.len() - 1);

    let catalog = harness
        .server
        .get("/v1/catalog")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;
    let body: serde_json::Value = catalog.json();
    assert_eq!(body["balance"], 10);
}
