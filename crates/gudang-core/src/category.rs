//! Category - a named grouping of inventory items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, ValidationErrors};

/// A persisted category row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
  pub id:          Uuid,
  pub name:        String,
  pub description: String,
  /// Server-assigned; never accepted from callers.
  pub created_at:  DateTime<Utc>,
}

/// Validated input for creating or fully replacing a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
  pub name:        String,
  pub description: String,
}

/// Raw request payload. Unknown fields are rejected at deserialisation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDraft {
  pub name:        Option<String>,
  pub description: Option<String>,
}

impl CategoryDraft {
  /// Rules: `name` required|string|max:100; `description` required|string.
  pub fn validate(self) -> Result<NewCategory, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = validate::required_string(&mut errors, "name", self.name);
    if let Some(name) = &name {
      validate::max_len(&mut errors, "name", name, 100);
    }
    let description =
      validate::required_string(&mut errors, "description", self.description);

    match (name, description, errors.is_empty()) {
      (Some(name), Some(description), true) => {
        Ok(NewCategory { name, description })
      }
      _ => Err(errors),
    }
  }
}
