//! Client SDK for the flagmart service.
//!
//! Wraps the HTTP API in typed methods: account signup and login, catalog
//! browsing, purchases, purchase history, and coupon redemption. API errors
//! are surfaced as [`ClientError`] variants so callers can match on them
//! instead of inspecting status codes.
//!
//! # Example
//!
//! ```no_run
//! use flagmart_client::FlagmartClient;
//!
//! # async fn example() -> Result<(), flagmart_client::ClientError> {
//! let client = FlagmartClient::new("http://localhost:8080");
//! let session = client.login("alice", "hunter2").await?;
//! let catalog = client.catalog(&session.token).await?;
//! println!("{} items, balance {}", catalog.items.len(), catalog.balance);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientOptions, FlagmartClient};
pub use error::ClientError;
pub use types::{
    AccountSummary, Catalog, CatalogItem, PurchaseHistory, PurchaseReceipt, PurchaseRow,
    Redemption, Session,
};
