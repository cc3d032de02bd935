//! Flagmart HTTP API service.
//!
//! This crate provides the HTTP surface for the flagmart storefront:
//!
//! - Signup and login (argon2id password hashing, JWT session tokens)
//! - Catalog listing with the current balance
//! - Purchases and the purchase-history view with flag disclosure
//! - Coupon redemption
//! - Admin balance grants
//!
//! # Authentication
//!
//! Login issues an HS256 session token; authenticated routes resolve the
//! bearer token to an account id via the `AuthAccount` extractor. The admin
//! grant endpoint is gated by a shared `X-Admin-Key` header instead.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for consistency

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
