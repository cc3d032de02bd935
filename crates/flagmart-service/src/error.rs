//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid session token.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An account with this username already exists.
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// Login failed. Unknown usernames and wrong passwords are deliberately
    /// indistinguishable.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No coupon exists with the given code.
    #[error("invalid coupon code: {0}")]
    InvalidCoupon(String),

    /// The coupon was already redeemed by this account.
    #[error("coupon already redeemed: {0}")]
    AlreadyRedeemed(String),

    /// Balance cannot cover the purchase.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// Price of the item.
        required: i64,
    },

    /// Internal server error. The detail is logged, never sent to clients.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::UsernameTaken(_) => (
                StatusCode::CONFLICT,
                "username_taken",
                self.to_string(),
                None,
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
                None,
            ),
            Self::InvalidCoupon(_) => (
                StatusCode::NOT_FOUND,
                "invalid_coupon",
                self.to_string(),
                None,
            ),
            Self::AlreadyRedeemed(_) => (
                StatusCode::CONFLICT,
                "already_redeemed",
                self.to_string(),
                None,
            ),
            Self::InsufficientFunds { balance, required } => (
                StatusCode::PAYMENT_REQUIRED,
                "insufficient_funds",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "required": required
                })),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<flagmart_store::StoreError> for ApiError {
    fn from(err: flagmart_store::StoreError) -> Self {
        match err {
            flagmart_store::StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            flagmart_store::StoreError::InsufficientFunds { balance, required } => {
                Self::InsufficientFunds { balance, required }
            }
            flagmart_store::StoreError::AlreadyRedeemed { code } => Self::AlreadyRedeemed(code),
            flagmart_store::StoreError::InvalidCoupon { code } => Self::InvalidCoupon(code),
            flagmart_store::StoreError::UsernameTaken { username } => Self::UsernameTaken(username),
            flagmart_store::StoreError::Database(msg) => Self::Internal(msg),
        }
    }
}
