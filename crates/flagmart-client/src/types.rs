//! Request and response types for the flagmart client.

use serde::{Deserialize, Serialize};

use flagmart_core::{AccountId, ItemId, PurchaseId};

/// Signup request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SignupRequest<'a> {
    /// Desired unique username.
    pub username: &'a str,
    /// Raw password.
    pub password: &'a str,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    /// The username.
    pub username: &'a str,
    /// The raw password.
    pub password: &'a str,
}

/// Purchase request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PurchaseRequest {
    /// The catalog item to buy.
    pub item_id: ItemId,
}

/// Redemption request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RedeemRequest<'a> {
    /// The coupon code.
    pub code: &'a str,
}

/// A newly created account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSummary {
    /// The account id.
    pub account_id: AccountId,
    /// The username.
    pub username: String,
    /// Current balance in store credits.
    pub balance: i64,
}

/// An authenticated session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated account id.
    pub account_id: AccountId,
    /// Current balance in store credits.
    pub balance: i64,
}

/// A catalog item as listed to buyers.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    /// The item id, used to purchase.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Price in store credits.
    pub price: i64,
}

/// The catalog together with the caller's balance.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// All purchasable items.
    pub items: Vec<CatalogItem>,
    /// The caller's current balance.
    pub balance: i64,
}

/// Outcome of a purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseReceipt {
    /// The new ledger row id.
    pub purchase_id: PurchaseId,
    /// The purchased item.
    pub item_id: ItemId,
    /// Balance after the debit.
    pub balance: i64,
    /// When the purchase was made (RFC 3339).
    pub purchased_at: String,
}

/// A row of the purchase-history view.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRow {
    /// Ledger row id.
    pub id: PurchaseId,
    /// Name of the purchased item.
    pub item_name: String,
    /// Price paid.
    pub price: i64,
    /// When the purchase was made (RFC 3339).
    pub purchased_at: String,
}

/// The purchase-history view. When the flag item has been bought, `secret`
/// carries its value and `purchases` is empty.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseHistory {
    /// Whether the secret value is disclosed.
    pub revealed: bool,
    /// The flag item's secret value, present only when revealed.
    #[serde(default)]
    pub secret: Option<String>,
    /// The ledger; empty when revealed.
    pub purchases: Vec<PurchaseRow>,
}

/// Outcome of a coupon redemption.
#[derive(Debug, Clone, Deserialize)]
pub struct Redemption {
    /// The redeemed code.
    pub code: String,
    /// Balance after the credit.
    pub balance: i64,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
