//! Purchase and purchase-history handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use flagmart_core::{flag_revealed, ItemId, PurchaseId, PurchaseRecord, FLAG_ITEM_NAME};
use flagmart_store::Store;

use crate::auth::AuthAccount;
use crate::error::ApiError;
use crate::state::AppState;

/// Purchase request.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    /// The catalog item to buy.
    pub item_id: ItemId,
}

/// Purchase response.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    /// The new ledger row id.
    pub purchase_id: PurchaseId,
    /// The purchased item.
    pub item_id: ItemId,
    /// Balance after the debit.
    pub balance: i64,
    /// When the purchase was made.
    pub purchased_at: String,
}

/// Buy an item, debiting its price from the caller's balance.
pub async fn purchase(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let outcome = state.store.purchase(auth.account_id, body.item_id).await?;

    tracing::info!(
        account_id = %auth.account_id,
        item_id = %body.item_id,
        balance = outcome.new_balance,
        "Item purchased"
    );

    Ok(Json(PurchaseResponse {
        purchase_id: outcome.purchase.id,
        item_id: outcome.purchase.item_id,
        balance: outcome.new_balance,
        purchased_at: outcome.purchase.purchased_at.to_rfc3339(),
    }))
}

/// A row of the purchase-history view.
#[derive(Debug, Serialize)]
pub struct PurchaseRow {
    /// Ledger row id.
    pub id: PurchaseId,
    /// Name of the purchased item.
    pub item_name: String,
    /// Price paid.
    pub price: i64,
    /// When the purchase was made.
    pub purchased_at: String,
}

impl From<&PurchaseRecord> for PurchaseRow {
    fn from(record: &PurchaseRecord) -> Self {
        Self {
            id: record.id,
            item_name: record.item_name.clone(),
            price: record.price,
            purchased_at: record.purchased_at.to_rfc3339(),
        }
    }
}

/// Purchase-history response. When the flag item appears in the history,
/// the secret value is surfaced instead of the ledger.
#[derive(Debug, Serialize)]
pub struct PurchaseHistoryResponse {
    /// Whether the secret value is disclosed.
    pub revealed: bool,
    /// The flag item's secret value, present only when revealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// The ledger; empty when revealed.
    pub purchases: Vec<PurchaseRow>,
}

/// List the caller's purchases, or disclose the flag secret if the flag
/// item has been bought.
pub async fn list_purchases(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
) -> Result<Json<PurchaseHistoryResponse>, ApiError> {
    state
        .store
        .get_account(auth.account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    let records = state.store.list_purchases(auth.account_id).await?;

    if flag_revealed(&records) {
        let flag = state
            .store
            .get_item_by_name(FLAG_ITEM_NAME)
            .await?
            .ok_or_else(|| ApiError::Internal("flag item missing from catalog".into()))?;

        tracing::info!(account_id = %auth.account_id, "Flag disclosed");

        return Ok(Json(PurchaseHistoryResponse {
            revealed: true,
            secret: Some(flag.value),
            purchases: Vec::new(),
        }));
    }

    Ok(Json(PurchaseHistoryResponse {
        revealed: false,
        secret: None,
        purchases: records.iter().map(PurchaseRow::from).collect(),
    }))
}
