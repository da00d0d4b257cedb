//! Derived views over the transaction ledger.
//!
//! Nothing in this module is stored at rest. Stock levels and every dashboard
//! figure are recomputed from the append-only transaction history on demand,
//! so there is no cached balance to drift out of sync.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::transaction::{Transaction, TransactionType};

/// An item is low-stock when its ledger sum falls below this many units.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

// ─── Arithmetic ──────────────────────────────────────────────────────────────

/// Net quantity-on-hand over a set of ledger rows: `in` adds, `out`
/// subtracts.
///
/// The caller restricts `transactions` to a single item. The sum may go
/// negative; concurrent writers are not checked against available stock and
/// the result is reported as-is.
pub fn quantity_on_hand<'a>(
  transactions: impl IntoIterator<Item = &'a Transaction>,
) -> i64 {
  transactions
    .into_iter()
    .map(|t| t.transaction_type.sign() * t.quantity)
    .sum()
}

pub fn is_low_stock(stock: i64) -> bool {
  stock < LOW_STOCK_THRESHOLD
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
  const NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
  ];
  month
    .checked_sub(1)
    .and_then(|i| NAMES.get(i as usize))
    .copied()
}

// ─── Report rows ─────────────────────────────────────────────────────────────

/// Derived stock for a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLevel {
  pub item_id:   Uuid,
  pub stock:     i64,
  pub low_stock: bool,
}

/// Counters for the dashboard header. Serialised in the camelCase shape the
/// dashboard front-end consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
  pub total_items:      i64,
  pub total_categories: i64,
  pub total_locations:  i64,
  pub low_stock_items:  i64,
}

/// One row of the recent-activity feed. `item_name` is resolved through the
/// item reference and falls back to a placeholder if the row is gone;
/// `notes` is the empty string when the ledger row has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentTransaction {
  pub id:               Uuid,
  pub item_name:        String,
  pub quantity:         i64,
  pub transaction_date: NaiveDate,
  pub transaction_type: TransactionType,
  pub notes:            String,
}

/// Monthly in/out totals for the flow chart. `masuk` sums the `in` rows,
/// `keluar` the `out` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyFlow {
  pub name:   String,
  pub masuk:  i64,
  pub keluar: i64,
}

/// One slice of the category-distribution chart. `jumlah` is the item count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
  pub name:   String,
  pub jumlah: i64,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
