//! The `InventoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `gudang-store-sqlite`).
//! Higher layers (`gudang-api`, the server binary) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  category::{Category, NewCategory},
  item::{Item, NewItem},
  ledger::{CategorySlice, DashboardStats, MonthlyFlow, RecentTransaction},
  location::{Location, NewLocation},
  transaction::{NewTransaction, Transaction},
};

/// Abstraction over a gudang inventory store backend.
///
/// Inputs arrive pre-validated (`New*` types); the store is still responsible
/// for checking that foreign keys reference live rows, failing with
/// [`crate::Error::ReferenceNotFound`] before anything is written. Deletes
/// refuse to orphan referencing rows and fail with the matching `*InUse`
/// variant.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait InventoryStore: Send + Sync {
  // ── Categories ────────────────────────────────────────────────────────

  fn create_category(
    &self,
    input: NewCategory,
  ) -> impl Future<Output = Result<Category>> + Send + '_;

  /// Retrieve a category by id. Returns `None` if not found.
  fn get_category(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Category>>> + Send + '_;

  /// List every category, unfiltered and unpaginated.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>>> + Send + '_;

  /// Full-record replace. Fails with `CategoryNotFound` if `id` is absent.
  fn update_category(
    &self,
    id: Uuid,
    input: NewCategory,
  ) -> impl Future<Output = Result<Category>> + Send + '_;

  /// Hard delete. Fails with `CategoryInUse` while items reference `id`.
  fn delete_category(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Locations ─────────────────────────────────────────────────────────

  fn create_location(
    &self,
    input: NewLocation,
  ) -> impl Future<Output = Result<Location>> + Send + '_;

  fn get_location(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Location>>> + Send + '_;

  fn list_locations(
    &self,
  ) -> impl Future<Output = Result<Vec<Location>>> + Send + '_;

  fn update_location(
    &self,
    id: Uuid,
    input: NewLocation,
  ) -> impl Future<Output = Result<Location>> + Send + '_;

  fn delete_location(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Items ─────────────────────────────────────────────────────────────

  /// Create an item. `category_id` and `location_id` must reference live
  /// rows or the write fails with `ReferenceNotFound`.
  fn create_item(
    &self,
    input: NewItem,
  ) -> impl Future<Output = Result<Item>> + Send + '_;

  fn get_item(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Item>>> + Send + '_;

  fn list_items(&self) -> impl Future<Output = Result<Vec<Item>>> + Send + '_;

  fn update_item(
    &self,
    id: Uuid,
    input: NewItem,
  ) -> impl Future<Output = Result<Item>> + Send + '_;

  /// Hard delete. Fails with `ItemInUse` while the ledger references `id`;
  /// cascading would silently rewrite stock history.
  fn delete_item(&self, id: Uuid) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Transactions ──────────────────────────────────────────────────────

  /// Append a ledger row. `item_id` must reference a live item.
  fn create_transaction(
    &self,
    input: NewTransaction,
  ) -> impl Future<Output = Result<Transaction>> + Send + '_;

  fn get_transaction(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Transaction>>> + Send + '_;

  fn list_transactions(
    &self,
  ) -> impl Future<Output = Result<Vec<Transaction>>> + Send + '_;

  fn update_transaction(
    &self,
    id: Uuid,
    input: NewTransaction,
  ) -> impl Future<Output = Result<Transaction>> + Send + '_;

  fn delete_transaction(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Ledger reads ──────────────────────────────────────────────────────
  //
  // Aggregations run as single queries with explicit joins; none of them
  // walk entity relations row by row.

  /// Signed ledger sum for one item. Fails with `ItemNotFound` for an
  /// unknown item; an item with no transactions has stock 0.
  fn stock_on_hand(
    &self,
    item_id: Uuid,
  ) -> impl Future<Output = Result<i64>> + Send + '_;

  /// Entity counts plus the number of items under the low-stock threshold.
  fn dashboard_stats(
    &self,
  ) -> impl Future<Output = Result<DashboardStats>> + Send + '_;

  /// The most recently dated ledger rows, newest first, at most `limit`.
  fn recent_transactions(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<RecentTransaction>>> + Send + '_;

  /// In/out totals per calendar month of `year`, ordered by month number.
  /// Months without transactions are omitted.
  fn monthly_flows(
    &self,
    year: i32,
  ) -> impl Future<Output = Result<Vec<MonthlyFlow>>> + Send + '_;

  /// Item count per category, descending, at most `limit` rows.
  fn category_distribution(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<CategorySlice>>> + Send + '_;
}
