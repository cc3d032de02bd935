//! Purchase ledger types and flag disclosure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, ItemId, PurchaseId, FLAG_ITEM_NAME};

/// An append-only purchase ledger row. One row per successful purchase; an
/// account may buy the same item any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Ledger row id.
    pub id: PurchaseId,

    /// The purchasing account.
    pub account_id: AccountId,

    /// The purchased item.
    pub item_id: ItemId,

    /// When the purchase was made.
    pub purchased_at: DateTime<Utc>,
}

/// A purchase joined with its item, as shown in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Ledger row id.
    pub id: PurchaseId,

    /// Name of the purchased item.
    pub item_name: String,

    /// Price paid, in store credits.
    pub price: i64,

    /// When the purchase was made.
    pub purchased_at: DateTime<Utc>,
}

/// Whether an account's history unlocks the flag item's secret value.
///
/// This is a pure computation over the ledger query result: true iff some
/// record names the flag item exactly. The history view calls this on every
/// request instead of keeping any disclosure state.
#[must_use]
pub fn flag_revealed(records: &[PurchaseRecord]) -> bool {
    records.iter().any(|r| r.item_name == FLAG_ITEM_NAME)
}
