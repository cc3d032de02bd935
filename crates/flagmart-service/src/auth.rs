//! Password hashing, session tokens and authentication extractors.
//!
//! This module provides:
//! - argon2id password hashing and verification
//! - HS256 session tokens issued at login and validated per request
//! - `AuthAccount` - the authenticated account behind a bearer token
//! - `AdminAuth` - shared-key authentication for privileged endpoints

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use flagmart_core::AccountId;

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Password Hashing
// ============================================================================

/// Hash a password with argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns an internal error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored argon2 hash. An unparsable stored
/// hash verifies as false rather than erroring.
#[must_use]
pub fn verify_password(password: &str, credential_hash: &str) -> bool {
    PasswordHash::new(credential_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

// ============================================================================
// Session Tokens
// ============================================================================

/// JWT claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account id).
    pub sub: String,
    /// Issued at.
    pub iat: i64,
    /// Expiration time.
    pub exp: i64,
}

/// Issue a signed session token for an account.
///
/// # Errors
///
/// Returns an internal error if signing fails.
pub fn issue_session(
    account_id: AccountId,
    secret: &str,
    ttl_seconds: u64,
) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: account_id.to_string(),
        iat: now,
        exp: now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("session signing failed: {e}")))
}

/// Validate a session token and return its claims. Expiry is checked by the
/// default validation.
fn decode_session(token: &str, secret: &str) -> Result<SessionClaims, ApiError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Session token rejected");
        ApiError::Unauthorized
    })
}

// ============================================================================
// Extractors
// ============================================================================

/// The authenticated account extracted from a bearer session token.
///
/// This is the sole source of account identity for the transaction
/// endpoints; request bodies never carry the caller's own account id.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    /// The account id from the token's subject claim.
    pub account_id: AccountId,
}

impl FromRequestParts<Arc<AppState>> for AuthAccount {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Extract the Authorization header
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            // Extract the Bearer token
            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            let claims = decode_session(token, &state.config.session_secret)?;

            let account_id = claims
                .sub
                .parse::<AccountId>()
                .map_err(|_| ApiError::Unauthorized)?;

            Ok(AuthAccount { account_id })
        })
    }
}

/// Admin authentication via shared key.
///
/// Used for privileged endpoints like granting balance. Requires the
/// `X-Admin-Key` header to match the configured admin key.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// Admin identifier (for audit logging).
    pub admin_id: String,
}

impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Check for X-Admin-Key header
            let admin_key = parts
                .headers
                .get("x-admin-key")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            // Validate against configured admin API key
            let expected_key = state
                .config
                .admin_api_key
                .as_ref()
                .ok_or(ApiError::Unauthorized)?;

            if admin_key != expected_key {
                return Err(ApiError::Unauthorized);
            }

            // Extract admin identifier from header if provided
            let admin_id = parts
                .headers
                .get("x-admin-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("admin")
                .to_string();

            tracing::info!(admin_id = %admin_id, "Admin authenticated");

            Ok(AdminAuth { admin_id })
        })
    }
}
