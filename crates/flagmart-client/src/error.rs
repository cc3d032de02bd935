//! Client error types.

/// Errors returned by [`FlagmartClient`](crate::FlagmartClient) methods.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connection, timeout, decode).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The balance cannot cover the purchase.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// Price of the item.
        required: i64,
    },

    /// Login was rejected.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The username is already taken.
    #[error("username already taken")]
    UsernameTaken,

    /// The coupon was already redeemed by this account.
    #[error("coupon already redeemed")]
    AlreadyRedeemed,

    /// No coupon exists with the given code.
    #[error("invalid coupon code")]
    InvalidCoupon,

    /// The referenced account or item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other API error.
    #[error("API error {status}: {code}: {message}")]
    Api {
        /// Machine-readable error code.
        code: String,
        /// Human-readable message.
        message: String,
        /// HTTP status code.
        status: u16,
    },
}
