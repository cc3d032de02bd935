//! Identifier types for flagmart.
//!
//! Every stored entity is keyed by a surrogate integer id assigned by the
//! database. The `row_id_type!` macro generates a newtype wrapper per entity
//! so that an `AccountId` can never be passed where an `ItemId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an identifier from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The string was not a valid integer id.
    #[error("invalid integer identifier")]
    InvalidInteger,
}

/// Macro to define an integer-backed identifier type with standard trait
/// implementations.
///
/// Generates a newtype wrapper around `i64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (as a plain integer)
/// - `FromStr`, `Display`, `Debug`
macro_rules! row_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database row id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Return the underlying row id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdError::InvalidInteger)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

row_id_type!(AccountId, "Identifier of an account row.");
row_id_type!(ItemId, "Identifier of a catalog item row.");
row_id_type!(CouponId, "Identifier of a coupon row.");
row_id_type!(PurchaseId, "Identifier of a purchase ledger row.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_through_string() {
        let id = AccountId::new(42);
        let parsed: AccountId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_non_integer() {
        assert_eq!(
            "not-a-number".parse::<ItemId>(),
            Err(IdError::InvalidInteger)
        );
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&CouponId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
