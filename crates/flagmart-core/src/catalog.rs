//! Catalog and coupon types, plus the default seed data.
//!
//! The catalog is seeded once at startup and immutable afterwards. Item
//! names and coupon codes are the natural identifiers used in requests and
//! during seeding; the integer ids are internal.

use serde::{Deserialize, Serialize};

use crate::{CouponId, ItemId};

/// Name of the catalog item whose purchase unlocks the secret value in the
/// purchase-history view. Matched exactly; "Fake Flag" does not count.
pub const FLAG_ITEM_NAME: &str = "Flag";

/// A purchasable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Row id assigned at seeding.
    pub id: ItemId,

    /// Unique display name; the external identifier for seeding.
    pub name: String,

    /// Price in store credits, non-negative.
    pub price: i64,

    /// Secret payload released only through the purchase-history view once
    /// the flag item has been bought. Never listed in the catalog.
    pub value: String,
}

/// A discount coupon, redeemable at most once per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Row id assigned at seeding.
    pub id: CouponId,

    /// Unique redemption code.
    pub code: String,

    /// Credit granted on redemption.
    pub discount: i64,
}

/// A catalog entry to seed, before it has a row id.
#[derive(Debug, Clone)]
pub struct SeedItem {
    /// Unique display name.
    pub name: &'static str,
    /// Price in store credits.
    pub price: i64,
    /// Secret payload.
    pub value: &'static str,
}

/// A coupon to seed, before it has a row id.
#[derive(Debug, Clone)]
pub struct SeedCoupon {
    /// Unique redemption code.
    pub code: &'static str,
    /// Credit granted on redemption.
    pub discount: i64,
}

/// The fixed catalog seeded at startup.
///
/// The flag item is deliberately priced above the single coupon's discount;
/// an account funded only by the coupon cannot afford it directly.
#[must_use]
pub fn default_catalog() -> Vec<SeedItem> {
    vec![
        SeedItem {
            name: FLAG_ITEM_NAME,
            price: 20,
            value: "FLAG{you-bought-the-real-flag}",
        },
        SeedItem {
            name: "T-shirt",
            price: 15,
            value: "FLAG{buy-the-flag-for-the-flag}",
        },
        SeedItem {
            name: "Mug",
            price: 10,
            value: "FLAG{buy-the-flag-for-the-flag}",
        },
        SeedItem {
            name: "Notebook",
            price: 5,
            value: "FLAG{buy-the-flag-for-the-flag}",
        },
        SeedItem {
            name: "Pen",
            price: 2,
            value: "FLAG{buy-the-flag-for-the-flag}",
        },
        SeedItem {
            name: "Fake Flag",
            price: 0,
            value: "FLAG{f4k3-flag}",
        },
    ]
}

/// The fixed coupons seeded at startup.
#[must_use]
pub fn default_coupons() -> Vec<SeedCoupon> {
    vec![SeedCoupon {
        code: "FREE10DOLLARS",
        discount: 10,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_contains_exactly_one_flag() {
        let flags: Vec<_> = default_catalog()
            .into_iter()
            .filter(|i| i.name == FLAG_ITEM_NAME)
            .collect();
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn seed_names_are_unique() {
        let catalog = default_catalog();
        for (i, a) in catalog.iter().enumerate() {
            for b in &catalog[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn prices_are_non_negative() {
        assert!(default_catalog().iter().all(|i| i.price >= 0));
    }
}
