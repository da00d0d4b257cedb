//! Item - a tracked article, filed under one category and one location.
//!
//! An item carries no stock figure. Quantity-on-hand is always derived from
//! the transaction ledger (see [`crate::ledger`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, ValidationErrors};

/// A persisted item row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
  pub id:          Uuid,
  pub name:        String,
  pub description: String,
  pub category_id: Uuid,
  pub location_id: Uuid,
  pub created_at:  DateTime<Utc>,
}

/// Validated input for creating or fully replacing an item.
///
/// The foreign keys are well-formed UUIDs at this point; whether they
/// reference live rows is checked by the store on write.
#[derive(Debug, Clone)]
pub struct NewItem {
  pub name:        String,
  pub description: String,
  pub category_id: Uuid,
  pub location_id: Uuid,
}

/// Raw request payload. Unknown fields are rejected at deserialisation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDraft {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub category_id: Option<String>,
  pub location_id: Option<String>,
}

impl ItemDraft {
  /// Rules: `name` required|string|max:100; `description` required|string;
  /// `category_id` required|exists:categories; `location_id`
  /// required|exists:locations. The `exists` half runs in the store.
  pub fn validate(self) -> Result<NewItem, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = validate::required_string(&mut errors, "name", self.name);
    if let Some(name) = &name {
      validate::max_len(&mut errors, "name", name, 100);
    }
    let description =
      validate::required_string(&mut errors, "description", self.description);
    let category_id =
      validate::required_uuid(&mut errors, "category_id", self.category_id);
    let location_id =
      validate::required_uuid(&mut errors, "location_id", self.location_id);

    match (name, description, category_id, location_id, errors.is_empty()) {
      (Some(name), Some(description), Some(category_id), Some(location_id), true) => {
        Ok(NewItem { name, description, category_id, location_id })
      }
      _ => Err(errors),
    }
  }
}
