//! Location - a physical place items are stored at.
//!
//! Structurally identical to [`crate::category`]; the two are kept separate
//! because they are distinct reference tables with distinct referents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, ValidationErrors};

/// A persisted location row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
  pub id:          Uuid,
  pub name:        String,
  pub description: String,
  pub created_at:  DateTime<Utc>,
}

/// Validated input for creating or fully replacing a location.
#[derive(Debug, Clone)]
pub struct NewLocation {
  pub name:        String,
  pub description: String,
}

/// Raw request payload. Unknown fields are rejected at deserialisation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationDraft {
  pub name:        Option<String>,
  pub description: Option<String>,
}

impl LocationDraft {
  /// Rules: `name` required|string|max:100; `description` required|string.
  pub fn validate(self) -> Result<NewLocation, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = validate::required_string(&mut errors, "name", self.name);
    if let Some(name) = &name {
      validate::max_len(&mut errors, "name", name, 100);
    }
    let description =
      validate::required_string(&mut errors, "description", self.description);

    match (name, description, errors.is_empty()) {
      (Some(name), Some(description), true) => {
        Ok(NewLocation { name, description })
      }
      _ => Err(errors),
    }
  }
}
