//! Coupon redemption handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use flagmart_store::Store;

use crate::auth::AuthAccount;
use crate::error::ApiError;
use crate::state::AppState;

/// Redemption request.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    /// The coupon code.
    pub code: String,
}

/// Redemption response.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    /// The redeemed code.
    pub code: String,
    /// Balance after the credit.
    pub balance: i64,
}

/// Redeem a coupon code for its discount. Each coupon works at most once
/// per account.
pub async fn redeem(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<RedeemRequest>,
) -> Result<Json<RedeemResponse>, ApiError> {
    let code = body.code.trim();
    if code.is_empty() {
        return Err(ApiError::BadRequest("coupon code must not be empty".into()));
    }

    let balance = state.store.redeem_coupon(auth.account_id, code).await?;

    tracing::info!(account_id = %auth.account_id, code, balance, "Coupon redeemed");

    Ok(Json(RedeemResponse {
        code: code.to_string(),
        balance,
    }))
}
