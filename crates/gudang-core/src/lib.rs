//! Core types and trait definitions for the gudang inventory store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod category;
pub mod error;
pub mod item;
pub mod ledger;
pub mod location;
pub mod store;
pub mod transaction;
pub mod validate;

pub use error::{Error, Result};
