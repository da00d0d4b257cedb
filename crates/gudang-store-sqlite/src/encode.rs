//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! UUIDs as hyphenated lowercase strings, transaction types as their
//! lowercase discriminant.

use chrono::{DateTime, NaiveDate, Utc};
use gudang_core::{
  Error, Result,
  category::Category,
  item::Item,
  ledger::RecentTransaction,
  location::Location,
  transaction::{Transaction, TransactionType},
};
use uuid::Uuid;

/// A stored column that no longer decodes. Only reachable when the database
/// file was edited out-of-band, so it surfaces as a store failure.
fn corrupt(what: &str, detail: impl std::fmt::Display) -> Error {
  Error::Unavailable(format!("corrupt {what} column: {detail}"))
}

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Uuid::parse_str(s).map_err(|e| corrupt("uuid", e))
}

// ─── Timestamps and dates ────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| corrupt("timestamp", e))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| corrupt("date", e))
}

// ─── TransactionType ─────────────────────────────────────────────────────────

pub fn decode_tx_type(s: &str) -> Result<TransactionType> {
  TransactionType::parse(s)
    .ok_or_else(|| corrupt("transaction_type", format!("{s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `categories` row.
pub struct RawCategory {
  pub id:          String,
  pub name:        String,
  pub description: String,
  pub created_at:  String,
}

impl RawCategory {
  pub fn into_category(self) -> Result<Category> {
    Ok(Category {
      id:          decode_uuid(&self.id)?,
      name:        self.name,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `locations` row.
pub struct RawLocation {
  pub id:          String,
  pub name:        String,
  pub description: String,
  pub created_at:  String,
}

impl RawLocation {
  pub fn into_location(self) -> Result<Location> {
    Ok(Location {
      id:          decode_uuid(&self.id)?,
      name:        self.name,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `items` row.
pub struct RawItem {
  pub id:          String,
  pub name:        String,
  pub description: String,
  pub category_id: String,
  pub location_id: String,
  pub created_at:  String,
}

impl RawItem {
  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      id:          decode_uuid(&self.id)?,
      name:        self.name,
      description: self.description,
      category_id: decode_uuid(&self.category_id)?,
      location_id: decode_uuid(&self.location_id)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `transactions` row.
pub struct RawTransaction {
  pub id:               String,
  pub item_id:          String,
  pub quantity:         i64,
  pub transaction_type: String,
  pub transaction_date: String,
  pub notes:            Option<String>,
  pub user_id:          String,
  pub created_at:       String,
}

impl RawTransaction {
  pub fn into_transaction(self) -> Result<Transaction> {
    Ok(Transaction {
      id:               decode_uuid(&self.id)?,
      item_id:          decode_uuid(&self.item_id)?,
      quantity:         self.quantity,
      transaction_type: decode_tx_type(&self.transaction_type)?,
      transaction_date: decode_date(&self.transaction_date)?,
      notes:            self.notes,
      user_id:          decode_uuid(&self.user_id)?,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings from the recent-activity join; `item_name` and `notes` are
/// already coalesced by the query.
pub struct RawRecentTransaction {
  pub id:               String,
  pub item_name:        String,
  pub quantity:         i64,
  pub transaction_date: String,
  pub transaction_type: String,
  pub notes:            String,
}

impl RawRecentTransaction {
  pub fn into_recent(self) -> Result<RecentTransaction> {
    Ok(RecentTransaction {
      id:               decode_uuid(&self.id)?,
      item_name:        self.item_name,
      quantity:         self.quantity,
      transaction_date: decode_date(&self.transaction_date)?,
      transaction_type: decode_tx_type(&self.transaction_type)?,
      notes:            self.notes,
    })
  }
}
