//! Flagmart HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    AccountSummary, ApiErrorResponse, Catalog, LoginRequest, PurchaseHistory, PurchaseReceipt,
    PurchaseRequest, RedeemRequest, Redemption, Session, SignupRequest,
};

use flagmart_core::ItemId;

/// Flagmart API client.
///
/// Provides methods for account management, catalog browsing, purchases,
/// and coupon redemption.
#[derive(Debug, Clone)]
pub struct FlagmartClient {
    client: Client,
    base_url: String,
}

impl FlagmartClient {
    /// Create a new flagmart client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the flagmart service (e.g., `"http://flagmart:8080"`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new flagmart client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with default settings).
    #[must_use]
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UsernameTaken`] if the username already exists,
    /// or another error if the request fails.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccountSummary, ClientError> {
        let url = format!("{}/v1/auth/signup", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SignupRequest { username, password })
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Log in and receive a session token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidCredentials`] if the username or
    /// password is wrong, or another error if the request fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let url = format!("{}/v1/auth/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// List the catalog together with the caller's balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn catalog(&self, token: &str) -> Result<Catalog, ClientError> {
        let url = format!("{}/v1/catalog", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {token}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Buy an item, debiting its price from the caller's balance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InsufficientFunds`] if the balance cannot
    /// cover the price, or another error if the request fails.
    pub async fn purchase(
        &self,
        token: &str,
        item_id: ItemId,
    ) -> Result<PurchaseReceipt, ClientError> {
        let url = format!("{}/v1/purchases", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {token}"))
            .json(&PurchaseRequest { item_id })
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Fetch the caller's purchase history. When the flag item has been
    /// bought, the response carries its secret value instead of the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn purchases(&self, token: &str) -> Result<PurchaseHistory, ClientError> {
        let url = format!("{}/v1/purchases", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {token}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Redeem a coupon code for its discount.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AlreadyRedeemed`] if this account has redeemed
    /// the coupon before, [`ClientError::InvalidCoupon`] if no such code
    /// exists, or another error if the request fails.
    pub async fn redeem_coupon(&self, token: &str, code: &str) -> Result<Redemption, ClientError> {
        let url = format!("{}/v1/coupons/redeem", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {token}"))
            .json(&RedeemRequest { code })
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();

                // Map specific error codes to typed errors
                match code {
                    "insufficient_funds" => {
                        let balance = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("balance"))
                            .and_then(serde_json::Value::as_i64)
                            .unwrap_or(0);
                        let required = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("required"))
                            .and_then(serde_json::Value::as_i64)
                            .unwrap_or(0);

                        Err(ClientError::InsufficientFunds { balance, required })
                    }
                    "invalid_credentials" => Err(ClientError::InvalidCredentials),
                    "username_taken" => Err(ClientError::UsernameTaken),
                    "already_redeemed" => Err(ClientError::AlreadyRedeemed),
                    "invalid_coupon" => Err(ClientError::InvalidCoupon),
                    "not_found" => Err(ClientError::NotFound(api_error.error.message)),
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message: api_error.error.message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
