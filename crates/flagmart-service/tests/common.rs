//! Common test utilities for flagmart integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use flagmart_service::{create_router, AppState, ServiceConfig};
use flagmart_store::{SqliteStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// The admin key configured on the server.
    pub admin_key: String,
}

impl TestHarness {
    /// Create a new test harness with a fresh, seeded database.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SqliteStore::connect(temp_dir.path().join("store.db"))
            .await
            .expect("Failed to open store");
        store.seed_defaults().await.expect("Failed to seed store");

        let admin_key = "test-admin-key".to_string();

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            database_path: temp_dir.path().join("store.db").to_string_lossy().to_string(),
            session_secret: "test-session-secret".into(),
            session_ttl_seconds: 3600,
            admin_api_key: Some(admin_key.clone()),
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::new(store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
            admin_key,
        }
    }

    /// Sign up and log in a user, returning (account id, session token).
    pub async fn signup_and_login(&self, username: &str) -> (i64, String) {
        self.server
            .post("/v1/auth/signup")
            .json(&json!({ "username": username, "password": "hunter2" }))
            .await
            .assert_status_ok();

        let response = self
            .server
            .post("/v1/auth/login")
            .json(&json!({ "username": username, "password": "hunter2" }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let account_id = body["account_id"].as_i64().expect("account_id");
        let token = body["token"].as_str().expect("token").to_string();
        (account_id, token)
    }

    /// Format a session token as an Authorization header value.
    pub fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    /// Grant balance to an account through the admin endpoint.
    pub async fn grant(&self, account_id: i64, amount: i64) {
        self.server
            .post("/v1/balance/add")
            .add_header("x-admin-key", self.admin_key.as_str())
            .json(&json!({ "account_id": account_id, "amount": amount }))
            .await
            .assert_status_ok();
    }

    /// Look up an item id by name via the catalog endpoint.
    pub async fn item_id(&self, token: &str, name: &str) -> i64 {
        let response = self
            .server
            .get("/v1/catalog")
            .add_header("authorization", Self::bearer(token))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        body["items"]
            .as_array()
            .expect("items")
            .iter()
            .find(|item| item["name"] == name)
            .unwrap_or_else(|| panic!("item {name} not in catalog"))["id"]
            .as_i64()
            .expect("item id")
    }
}
