//! Error types for flagmart storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage and transaction-engine operations.
///
/// All variants except `Database` are domain errors and are surfaced
/// verbatim to the caller; `Database` is an underlying storage failure and
/// is reported generically by the API layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record ("account", "item", "coupon").
        entity: &'static str,
        /// The id or name that was looked up.
        id: String,
    },

    /// Balance cannot cover the purchase.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance in store credits.
        balance: i64,
        /// Price of the item.
        required: i64,
    },

    /// The coupon was already redeemed by this account.
    #[error("coupon already redeemed: {code}")]
    AlreadyRedeemed {
        /// The coupon code.
        code: String,
    },

    /// No coupon exists with the given code.
    #[error("invalid coupon code: {code}")]
    InvalidCoupon {
        /// The code that failed to resolve.
        code: String,
    },

    /// An account with this username already exists.
    #[error("username taken: {username}")]
    UsernameTaken {
        /// The contested username.
        username: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
