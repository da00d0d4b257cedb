//! Transaction - one stock movement in the append-only ledger.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, ValidationErrors};

// ─── TransactionType ─────────────────────────────────────────────────────────

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
  In,
  Out,
}

impl TransactionType {
  /// The string stored in the `transaction_type` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::In => "in",
      Self::Out => "out",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "in" => Some(Self::In),
      "out" => Some(Self::Out),
      _ => None,
    }
  }

  /// Sign applied to the quantity when summing the ledger.
  pub fn sign(self) -> i64 {
    match self {
      Self::In => 1,
      Self::Out => -1,
    }
  }
}

// ─── Transaction ─────────────────────────────────────────────────────────────

/// A persisted ledger row. `quantity` is always positive; the direction
/// lives in `transaction_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
  pub id:               Uuid,
  pub item_id:          Uuid,
  pub quantity:         i64,
  pub transaction_type: TransactionType,
  /// The calendar date the movement happened on, not the insert time.
  pub transaction_date: NaiveDate,
  pub notes:            Option<String>,
  /// The actor who recorded the movement. Passed in explicitly; there is no
  /// ambient user context.
  pub user_id:          Uuid,
  pub created_at:       DateTime<Utc>,
}

/// Validated input for creating or fully replacing a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
  pub item_id:          Uuid,
  pub quantity:         i64,
  pub transaction_type: TransactionType,
  pub transaction_date: NaiveDate,
  pub notes:            Option<String>,
  pub user_id:          Uuid,
}

/// Raw request payload. Unknown fields are rejected at deserialisation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionDraft {
  pub item_id:          Option<String>,
  pub quantity:         Option<i64>,
  pub transaction_type: Option<String>,
  pub transaction_date: Option<String>,
  pub notes:            Option<String>,
  pub user_id:          Option<String>,
}

impl TransactionDraft {
  /// Rules: `item_id` required|exists:items; `quantity`
  /// required|integer|min:1; `transaction_type` required|in:in,out;
  /// `transaction_date` required|date; `notes` nullable|max:255;
  /// `user_id` required. The `exists` half runs in the store.
  pub fn validate(self) -> Result<NewTransaction, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let item_id = validate::required_uuid(&mut errors, "item_id", self.item_id);

    let quantity = validate::required_int(&mut errors, "quantity", self.quantity);
    if let Some(quantity) = quantity {
      validate::min_int(&mut errors, "quantity", quantity, 1);
    }

    let transaction_type = validate::required_string(
      &mut errors,
      "transaction_type",
      self.transaction_type,
    )
    .and_then(|raw| {
      if validate::one_of(&mut errors, "transaction_type", &raw, &["in", "out"]) {
        TransactionType::parse(&raw)
      } else {
        None
      }
    });

    let transaction_date = validate::required_date(
      &mut errors,
      "transaction_date",
      self.transaction_date,
    );

    // `nullable`: an absent or empty notes field is simply no notes.
    let notes = self.notes.filter(|n| !n.is_empty());
    if let Some(notes) = &notes {
      validate::max_len(&mut errors, "notes", notes, 255);
    }

    let user_id = validate::required_uuid(&mut errors, "user_id", self.user_id);

    match (
      item_id,
      quantity,
      transaction_type,
      transaction_date,
      user_id,
      errors.is_empty(),
    ) {
      (
        Some(item_id),
        Some(quantity),
        Some(transaction_type),
        Some(transaction_date),
        Some(user_id),
        true,
      ) => Ok(NewTransaction {
        item_id,
        quantity,
        transaction_type,
        transaction_date,
        notes,
        user_id,
      }),
      _ => Err(errors),
    }
  }
}
