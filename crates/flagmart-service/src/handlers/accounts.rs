//! Signup and login handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use flagmart_core::{Account, AccountId};
use flagmart_store::Store;

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Signup request.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Desired unique username.
    pub username: String,
    /// Raw password; only its argon2 hash is stored.
    pub password: String,
}

/// Account response.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// The account id.
    pub account_id: AccountId,
    /// The username.
    pub username: String,
    /// Current balance in store credits.
    pub balance: i64,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            username: account.username.clone(),
            balance: account.balance,
        }
    }
}

/// Create a new account.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let username = body.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".into()));
    }
    if body.password.is_empty() {
        return Err(ApiError::BadRequest("password must not be empty".into()));
    }

    let credential_hash = auth::hash_password(&body.password)?;
    let account = state.store.create_account(username, &credential_hash).await?;

    tracing::info!(account_id = %account.id, "Account created");

    Ok(Json(AccountResponse::from(&account)))
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// The username.
    pub username: String,
    /// The raw password.
    pub password: String,
}

/// Session response returned on successful login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated account id.
    pub account_id: AccountId,
    /// Current balance in store credits.
    pub balance: i64,
}

/// Log in and receive a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let account = state
        .store
        .get_account_by_username(body.username.trim())
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !auth::verify_password(&body.password, &account.credential_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::issue_session(
        account.id,
        &state.config.session_secret,
        state.config.session_ttl_seconds,
    )?;

    tracing::info!(account_id = %account.id, "Session issued");

    Ok(Json(SessionResponse {
        token,
        account_id: account.id,
        balance: account.balance,
    }))
}
