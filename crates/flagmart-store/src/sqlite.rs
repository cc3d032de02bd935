//! SQLite storage implementation.
//!
//! This module provides the `SqliteStore` implementation of the `Store`
//! trait over an sqlx connection pool.
//!
//! Connections are opened in WAL mode with a busy timeout and foreign keys
//! enabled. Write transactions issue their write as the first statement, so
//! the database write lock is taken before any read snapshot exists and
//! concurrent writers queue on the busy timeout instead of failing.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use flagmart_core::{
    Account, AccountId, Coupon, CouponId, Item, ItemId, Purchase, PurchaseId, PurchaseRecord,
    SeedCoupon, SeedItem,
};

use crate::error::{Result, StoreError};
use crate::schema::all_tables;
use crate::{PurchaseOutcome, Store};

/// How long a connection waits for the database write lock before giving up.
/// Contended operations fail with a database error after this bound rather
/// than hanging.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool size. The service is single-instance; a handful of connections is
/// plenty for the request concurrency SQLite can serve.
const MAX_CONNECTIONS: u32 = 5;

/// SQLite-backed storage implementation.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open or create the database at the given path and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be applied.
    pub async fn connect<P: AsRef<Path>>(path: P) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.apply_schema().await?;
        Ok(store)
    }

    /// Apply the table definitions. Every statement is IF NOT EXISTS, so
    /// this is safe on every startup.
    async fn apply_schema(&self) -> Result<()> {
        for ddl in all_tables() {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }
}

/// Classify a database error by the constraint it violated, if any.
fn constraint_kind(err: &sqlx::Error) -> Option<ErrorKind> {
    match err {
        sqlx::Error::Database(db) => Some(db.kind()),
        _ => None,
    }
}

fn account_from_row(row: &SqliteRow) -> Result<Account> {
    Ok(Account {
        id: AccountId::new(row.try_get("id")?),
        username: row.try_get("username")?,
        credential_hash: row.try_get("credential_hash")?,
        balance: row.try_get("balance")?,
    })
}

fn item_from_row(row: &SqliteRow) -> Result<Item> {
    Ok(Item {
        id: ItemId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        value: row.try_get("value")?,
    })
}

fn coupon_from_row(row: &SqliteRow) -> Result<Coupon> {
    Ok(Coupon {
        id: CouponId::new(row.try_get("id")?),
        code: row.try_get("code")?,
        discount: row.try_get("discount")?,
    })
}

fn purchase_record_from_row(row: &SqliteRow) -> Result<PurchaseRecord> {
    Ok(PurchaseRecord {
        id: PurchaseId::new(row.try_get("id")?),
        item_name: row.try_get("item_name")?,
        price: row.try_get("price")?,
        purchased_at: row.try_get("purchased_at")?,
    })
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    // =========================================================================
    // Account Operations
    // =========================================================================

    async fn create_account(&self, username: &str, credential_hash: &str) -> Result<Account> {
        let result = sqlx::query("INSERT INTO accounts (username, credential_hash) VALUES (?, ?)")
            .bind(username)
            .bind(credential_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(Account {
                id: AccountId::new(done.last_insert_rowid()),
                username: username.to_string(),
                credential_hash: credential_hash.to_string(),
                balance: 0,
            }),
            Err(err) if matches!(constraint_kind(&err), Some(ErrorKind::UniqueViolation)) => {
                Err(StoreError::UsernameTaken {
                    username: username.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_account(&self, account_id: AccountId) -> Result<Option<Account>> {
        sqlx::query("SELECT id, username, credential_hash, balance FROM accounts WHERE id = ?")
            .bind(account_id.get())
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(account_from_row)
            .transpose()
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        sqlx::query(
            "SELECT id, username, credential_hash, balance FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .as_ref()
        .map(account_from_row)
        .transpose()
    }

    async fn credit_balance(&self, account_id: AccountId, amount: i64) -> Result<i64> {
        // Single-statement read-modify-write; RETURNING gives the balance
        // after exactly this update.
        let new_balance: Option<i64> =
            sqlx::query_scalar("UPDATE accounts SET balance = balance + ? WHERE id = ? RETURNING balance")
                .bind(amount)
                .bind(account_id.get())
                .fetch_optional(&self.pool)
                .await?;

        new_balance.ok_or_else(|| StoreError::NotFound {
            entity: "account",
            id: account_id.to_string(),
        })
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    async fn list_items(&self) -> Result<Vec<Item>> {
        sqlx::query("SELECT id, name, price, value FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(item_from_row)
            .collect()
    }

    async fn get_item(&self, item_id: ItemId) -> Result<Option<Item>> {
        sqlx::query("SELECT id, name, price, value FROM items WHERE id = ?")
            .bind(item_id.get())
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(item_from_row)
            .transpose()
    }

    async fn get_item_by_name(&self, name: &str) -> Result<Option<Item>> {
        sqlx::query("SELECT id, name, price, value FROM items WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(item_from_row)
            .transpose()
    }

    async fn get_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>> {
        sqlx::query("SELECT id, code, discount FROM coupons WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(coupon_from_row)
            .transpose()
    }

    // =========================================================================
    // Transaction Engine
    // =========================================================================

    async fn purchase(&self, account_id: AccountId, item_id: ItemId) -> Result<PurchaseOutcome> {
        // The catalog is immutable after seeding, so the item can be
        // resolved outside the transaction.
        let item = self.get_item(item_id).await?.ok_or_else(|| StoreError::NotFound {
            entity: "item",
            id: item_id.to_string(),
        })?;

        let mut tx = self.pool.begin().await?;

        // Conditional debit as the first (write) statement of the
        // transaction. Zero rows updated means either the account is missing
        // or the balance can't cover the price; either way nothing was
        // mutated and the transaction rolls back on drop.
        let debited: Option<i64> = sqlx::query_scalar(
            "UPDATE accounts SET balance = balance - ?1 \
             WHERE id = ?2 AND balance >= ?1 RETURNING balance",
        )
        .bind(item.price)
        .bind(account_id.get())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(new_balance) = debited else {
            let balance: Option<i64> =
                sqlx::query_scalar("SELECT balance FROM accounts WHERE id = ?")
                    .bind(account_id.get())
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match balance {
                Some(balance) => StoreError::InsufficientFunds {
                    balance,
                    required: item.price,
                },
                None => StoreError::NotFound {
                    entity: "account",
                    id: account_id.to_string(),
                },
            });
        };

        let purchased_at = Utc::now();
        let done =
            sqlx::query("INSERT INTO purchases (account_id, item_id, purchased_at) VALUES (?, ?, ?)")
                .bind(account_id.get())
                .bind(item_id.get())
                .bind(purchased_at)
                .execute(&mut *tx)
                .await?;

        tx.commit().await?;

        tracing::debug!(
            account_id = %account_id,
            item = %item.name,
            price = item.price,
            new_balance,
            "Purchase recorded"
        );

        Ok(PurchaseOutcome {
            purchase: Purchase {
                id: PurchaseId::new(done.last_insert_rowid()),
                account_id,
                item_id,
                purchased_at,
            },
            new_balance,
        })
    }

    async fn redeem_coupon(&self, account_id: AccountId, code: &str) -> Result<i64> {
        // Coupons are immutable after seeding; resolve the code outside the
        // transaction. An unknown code fails before any redemption check.
        let coupon = self
            .get_coupon_by_code(code)
            .await?
            .ok_or_else(|| StoreError::InvalidCoupon {
                code: code.to_string(),
            })?;

        let mut tx = self.pool.begin().await?;

        // The ledger insert comes first: the UNIQUE(account_id, coupon_id)
        // constraint is what rejects a racing duplicate, not the absence of
        // a row at some earlier read.
        let inserted = sqlx::query(
            "INSERT INTO coupon_redemptions (account_id, coupon_id, redeemed_at) VALUES (?, ?, ?)",
        )
        .bind(account_id.get())
        .bind(coupon.id.get())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            return Err(match constraint_kind(&err) {
                Some(ErrorKind::UniqueViolation) => StoreError::AlreadyRedeemed {
                    code: code.to_string(),
                },
                Some(ErrorKind::ForeignKeyViolation) => StoreError::NotFound {
                    entity: "account",
                    id: account_id.to_string(),
                },
                _ => err.into(),
            });
        }

        let new_balance: i64 =
            sqlx::query_scalar("UPDATE accounts SET balance = balance + ? WHERE id = ? RETURNING balance")
                .bind(coupon.discount)
                .bind(account_id.get())
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        tracing::debug!(
            account_id = %account_id,
            code,
            discount = coupon.discount,
            new_balance,
            "Coupon redeemed"
        );

        Ok(new_balance)
    }

    async fn list_purchases(&self, account_id: AccountId) -> Result<Vec<PurchaseRecord>> {
        sqlx::query(
            "SELECT p.id, i.name AS item_name, i.price, p.purchased_at \
             FROM purchases p JOIN items i ON p.item_id = i.id \
             WHERE p.account_id = ? ORDER BY p.id",
        )
        .bind(account_id.get())
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(purchase_record_from_row)
        .collect()
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    async fn seed_item(&self, item: &SeedItem) -> Result<bool> {
        let done = sqlx::query(
            "INSERT INTO items (name, price, value) \
             SELECT ?1, ?2, ?3 WHERE NOT EXISTS (SELECT 1 FROM items WHERE name = ?1)",
        )
        .bind(item.name)
        .bind(item.price)
        .bind(item.value)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected() > 0)
    }

    async fn seed_coupon(&self, coupon: &SeedCoupon) -> Result<bool> {
        let done = sqlx::query(
            "INSERT INTO coupons (code, discount) \
             SELECT ?1, ?2 WHERE NOT EXISTS (SELECT 1 FROM coupons WHERE code = ?1)",
        )
        .bind(coupon.code)
        .bind(coupon.discount)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected() > 0)
    }
}
