//! SQLite storage layer and transaction engine for flagmart.
//!
//! This crate persists accounts, the item catalog, coupons and the two
//! append-only ledgers (purchases, coupon redemptions), and implements the
//! transactional operations against them.
//!
//! # Atomicity
//!
//! The store is shared by many concurrent request handlers with no
//! in-process serialization, so every balance mutation is a single
//! conditional statement and every multi-write operation runs inside one
//! database transaction:
//!
//! - a purchase debits with `UPDATE ... WHERE balance >= price` and appends
//!   the ledger row in the same transaction, so two concurrent purchases can
//!   never overdraw a balance;
//! - a redemption inserts the ledger row first and lets the
//!   `UNIQUE(account_id, coupon_id)` constraint reject a racing duplicate,
//!   then credits the balance in the same transaction.
//!
//! # Example
//!
//! ```no_run
//! use flagmart_store::{SqliteStore, Store};
//!
//! # async fn example() -> flagmart_store::Result<()> {
//! let store = SqliteStore::connect("/tmp/flagmart.db").await?;
//! store.seed_defaults().await?;
//!
//! let account = store.create_account("alice", "$argon2id$...").await?;
//! let history = store.list_purchases(account.id).await?;
//! assert!(history.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use flagmart_core::{
    default_catalog, default_coupons, Account, AccountId, Coupon, Item, ItemId, Purchase,
    PurchaseRecord, SeedCoupon, SeedItem,
};

/// Result of a successful purchase: the new ledger row and the balance
/// after the debit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    /// The appended purchase ledger row.
    pub purchase: Purchase,

    /// Account balance after the debit.
    pub new_balance: i64,
}

/// The storage trait defining all database operations.
///
/// This abstracts the storage layer so handlers and tests depend on the
/// operation set rather than on the SQLite backend.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Create an account with zero balance.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UsernameTaken` if the username is already in
    /// use, or a database error.
    async fn create_account(&self, username: &str, credential_hash: &str) -> Result<Account>;

    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_account(&self, account_id: AccountId) -> Result<Option<Account>>;

    /// Get an account by username (for login).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Atomically add `amount` credits to an account's balance and return
    /// the new balance. Used for administrative grants.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    async fn credit_balance(&self, account_id: AccountId, amount: i64) -> Result<i64>;

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// List all catalog items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Get a catalog item by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_item(&self, item_id: ItemId) -> Result<Option<Item>>;

    /// Get a catalog item by its unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_item_by_name(&self, name: &str) -> Result<Option<Item>>;

    /// Get a coupon by its unique code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>>;

    // =========================================================================
    // Transaction Engine
    // =========================================================================

    /// Purchase an item: debit the price and append a purchase row, both in
    /// one transaction. The debit is conditional on sufficient funds, so the
    /// balance can never go negative.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown account or item, and
    /// `StoreError::InsufficientFunds` (with no mutation) if the balance
    /// can't cover the price.
    async fn purchase(&self, account_id: AccountId, item_id: ItemId) -> Result<PurchaseOutcome>;

    /// Redeem a coupon: append a redemption row and credit the discount,
    /// both in one transaction. At most one redemption per (account, coupon)
    /// pair ever succeeds, even under concurrent attempts.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidCoupon` for an unknown code,
    /// `StoreError::AlreadyRedeemed` for a repeated redemption and
    /// `StoreError::NotFound` for an unknown account.
    async fn redeem_coupon(&self, account_id: AccountId, code: &str) -> Result<i64>;

    /// List an account's purchases joined with their items, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_purchases(&self, account_id: AccountId) -> Result<Vec<PurchaseRecord>>;

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Insert a catalog item unless one with the same name exists. Returns
    /// whether a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn seed_item(&self, item: &SeedItem) -> Result<bool>;

    /// Insert a coupon unless one with the same code exists. Returns whether
    /// a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn seed_coupon(&self, coupon: &SeedCoupon) -> Result<bool>;

    /// Seed the default catalog and coupons. Safe to run on every startup:
    /// existing rows, and any ledgers referencing them, are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn seed_defaults(&self) -> Result<()> {
        let mut inserted = 0usize;
        for item in default_catalog() {
            if self.seed_item(&item).await? {
                inserted += 1;
            }
        }
        for coupon in default_coupons() {
            if self.seed_coupon(&coupon).await? {
                inserted += 1;
            }
        }
        tracing::info!(inserted, "Seed pass complete");
        Ok(())
    }
}
