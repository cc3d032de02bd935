//! Account types for flagmart.

use serde::{Deserialize, Serialize};

use crate::AccountId;

/// A storefront account.
///
/// The account holds the login identity, the argon2 credential hash and the
/// spendable balance. The balance is only ever mutated by the transaction
/// engine in the store crate; nothing at the storage level prevents a
/// negative value, so every debit must be conditional on sufficient funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Row id assigned at signup.
    pub id: AccountId,

    /// Unique, non-empty login name.
    pub username: String,

    /// Argon2id hash of the account password. Never serialized into API
    /// responses; response types carry their own fields.
    pub credential_hash: String,

    /// Current spendable balance in store credits.
    pub balance: i64,
}

impl Account {
    /// Check whether the account can cover a debit of `amount`.
    #[must_use]
    pub const fn has_sufficient_funds(&self, amount: i64) -> bool {
        self.balance >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(balance: i64) -> Account {
        Account {
            id: AccountId::new(1),
            username: "alice".into(),
            credential_hash: "$argon2id$stub".into(),
            balance,
        }
    }

    #[test]
    fn sufficient_funds_boundary() {
        let acct = account(10);
        assert!(acct.has_sufficient_funds(9));
        assert!(acct.has_sufficient_funds(10));
        assert!(!acct.has_sufficient_funds(11));
    }

    #[test]
    fn zero_price_always_affordable() {
        assert!(account(0).has_sufficient_funds(0));
    }
}
