//! Database schema definitions.
//!
//! All statements are `CREATE TABLE IF NOT EXISTS` so that applying the
//! schema on every startup is safe; existing rows, including ledger history,
//! are never touched.

/// DDL statements, one per table.
pub mod ddl {
    /// Accounts: identity, credential hash and spendable balance. The
    /// non-negative balance invariant is enforced by the transaction engine,
    /// not here.
    pub const ACCOUNTS: &str = "\
        CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            credential_hash TEXT NOT NULL,
            balance INTEGER NOT NULL DEFAULT 0
        )";

    /// Catalog items, unique by name; immutable after seeding.
    pub const ITEMS: &str = "\
        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            price INTEGER NOT NULL,
            value TEXT NOT NULL
        )";

    /// Coupons, unique by code; immutable after seeding.
    pub const COUPONS: &str = "\
        CREATE TABLE IF NOT EXISTS coupons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            discount INTEGER NOT NULL
        )";

    /// Append-only purchase ledger. No uniqueness: repeat purchases of the
    /// same item are separate rows.
    pub const PURCHASES: &str = "\
        CREATE TABLE IF NOT EXISTS purchases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL REFERENCES accounts(id),
            item_id INTEGER NOT NULL REFERENCES items(id),
            purchased_at TEXT NOT NULL
        )";

    /// Append-only redemption ledger. The UNIQUE(account_id, coupon_id)
    /// constraint is the authority for at-most-once redemption; a racing
    /// duplicate insert fails here regardless of any earlier check.
    pub const COUPON_REDEMPTIONS: &str = "\
        CREATE TABLE IF NOT EXISTS coupon_redemptions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL REFERENCES accounts(id),
            coupon_id INTEGER NOT NULL REFERENCES coupons(id),
            redeemed_at TEXT NOT NULL,
            UNIQUE(account_id, coupon_id)
        )";
}

/// Returns all DDL statements in creation order (referenced tables first).
#[must_use]
pub fn all_tables() -> Vec<&'static str> {
    vec![
        ddl::ACCOUNTS,
        ddl::ITEMS,
        ddl::COUPONS,
        ddl::PURCHASES,
        ddl::COUPON_REDEMPTIONS,
    ]
}
