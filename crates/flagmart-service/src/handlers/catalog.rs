//! Catalog handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use flagmart_core::{Item, ItemId};
use flagmart_store::Store;

use crate::auth::AuthAccount;
use crate::error::ApiError;
use crate::state::AppState;

/// A catalog item as listed to buyers. The secret value is deliberately
/// absent; it is only released through the purchase-history view.
#[derive(Debug, Serialize)]
pub struct CatalogItem {
    /// The item id, used to purchase.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Price in store credits.
    pub price: i64,
}

impl From<&Item> for CatalogItem {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
        }
    }
}

/// Catalog response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// All purchasable items.
    pub items: Vec<CatalogItem>,
    /// The caller's current balance.
    pub balance: i64,
}

/// List the catalog together with the caller's balance.
pub async fn list_catalog(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
) -> Result<Json<CatalogResponse>, ApiError> {
    let account = state
        .store
        .get_account(auth.account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    let items = state.store.list_items().await?;

    Ok(Json(CatalogResponse {
        items: items.iter().map(CatalogItem::from).collect(),
        balance: account.balance,
    }))
}
