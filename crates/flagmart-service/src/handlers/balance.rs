//! Administrative balance handlers.
//!
//! New accounts start at zero and coupons are the only self-serve funding,
//! so deployments grant balance through this admin-gated endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use flagmart_core::AccountId;
use flagmart_store::Store;

use crate::auth::AdminAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Balance grant request.
#[derive(Debug, Deserialize)]
pub struct AddBalanceRequest {
    /// The account to credit.
    pub account_id: AccountId,
    /// Credits to add; must be positive.
    pub amount: i64,
}

/// Balance response.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// The credited account.
    pub account_id: AccountId,
    /// Balance after the grant.
    pub balance: i64,
}

/// Grant balance to an account (admin only).
pub async fn add_balance(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Json(body): Json<AddBalanceRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    if body.amount <= 0 {
        return Err(ApiError::BadRequest("amount must be positive".into()));
    }

    let balance = state.store.credit_balance(body.account_id, body.amount).await?;

    tracing::info!(
        admin_id = %admin.admin_id,
        account_id = %body.account_id,
        amount = body.amount,
        "Balance granted"
    );

    Ok(Json(BalanceResponse {
        account_id: body.account_id,
        balance,
    }))
}
