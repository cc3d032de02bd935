//! API handlers.

pub mod accounts;
pub mod balance;
pub mod catalog;
pub mod coupons;
pub mod health;
pub mod purchases;
