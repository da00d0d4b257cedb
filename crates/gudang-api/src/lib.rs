//! JSON REST API for gudang.
//!
//! Exposes an axum [`Router`] backed by any
//! [`gudang_core::store::InventoryStore`]. Transport concerns (TLS, tracing
//! layers, bind address) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", gudang_api::api_router(store.clone()))
//! ```

pub mod categories;
pub mod dashboard;
pub mod error;
pub mod items;
pub mod locations;
pub mod transactions;

use std::sync::Arc;

use axum::{Router, routing::get};
use gudang_core::store::InventoryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: InventoryStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Categories
    .route(
      "/categories",
      get(categories::list::<S>).post(categories::create::<S>),
    )
    .route(
      "/categories/{id}",
      get(categories::get_one::<S>)
        .put(categories::update::<S>)
        .delete(categories::delete_one::<S>),
    )
    // Locations
    .route(
      "/locations",
      get(locations::list::<S>).post(locations::create::<S>),
    )
    .route(
      "/locations/{id}",
      get(locations::get_one::<S>)
        .put(locations::update::<S>)
        .delete(locations::delete_one::<S>),
    )
    // Items
    .route("/items", get(items::list::<S>).post(items::create::<S>))
    .route(
      "/items/{id}",
      get(items::get_one::<S>)
        .put(items::update::<S>)
        .delete(items::delete_one::<S>),
    )
    .route("/items/{id}/stock", get(items::stock::<S>))
    // Transactions
    .route(
      "/transactions",
      get(transactions::list::<S>).post(transactions::create::<S>),
    )
    .route(
      "/transactions/{id}",
      get(transactions::get_one::<S>)
        .put(transactions::update::<S>)
        .delete(transactions::delete_one::<S>),
    )
    // Dashboard
    .route("/dashboard/stats", get(dashboard::stats::<S>))
    .route(
      "/dashboard/recent-transactions",
      get(dashboard::recent_transactions::<S>),
    )
    .route(
      "/dashboard/monthly-transactions",
      get(dashboard::monthly_transactions::<S>),
    )
    .route(
      "/dashboard/category-distribution",
      get(dashboard::category_distribution::<S>),
    )
    .with_state(store)
}
