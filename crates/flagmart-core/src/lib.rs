//! Core types for the flagmart storefront.
//!
//! This crate provides the foundational types shared by the storage and
//! service layers:
//!
//! - **Identifiers**: `AccountId`, `ItemId`, `CouponId`, `PurchaseId`
//! - **Accounts**: `Account` (identity, credential hash, balance)
//! - **Catalog**: `Item`, `Coupon` and the default seed data
//! - **Ledger**: `Purchase`, `PurchaseRecord` and flag disclosure
//!
//! # Balance unit
//!
//! Balances, prices and discounts are plain integers in store credits.
//! There is no fractional unit; everything is stored as `i64`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod catalog;
pub mod ids;
pub mod ledger;

pub use account::Account;
pub use catalog::{
    default_catalog, default_coupons, Coupon, Item, SeedCoupon, SeedItem, FLAG_ITEM_NAME,
};
pub use ids::{AccountId, CouponId, IdError, ItemId, PurchaseId};
pub use ledger::{flag_revealed, Purchase, PurchaseRecord};
