//! Field-rule validation shared by the entity draft types.
//!
//! Every draft validates all of its fields in one pass and either yields a
//! typed `New*` record or the full map of violations. There is no partial
//! application: a draft with any failing field writes nothing.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

// ─── ValidationErrors ────────────────────────────────────────────────────────

/// Map from field name to the list of rule strings it violated.
///
/// Rule strings follow the declarative form the rule sets are written in:
/// `"required"`, `"max:100"`, `"min:1"`, `"in:in,out"`, `"date"`, `"uuid"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
  pub fn add(&mut self, field: &'static str, rule: impl Into<String>) {
    self.0.entry(field).or_default().push(rule.into());
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Violated rules for one field, if any.
  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, rules) in &self.0 {
      if !first {
        write!(f, "; ")?;
      }
      write!(f, "{field}: {}", rules.join(", "))?;
      first = false;
    }
    Ok(())
  }
}

// ─── Rule helpers ────────────────────────────────────────────────────────────

/// `required` for string fields. Absent and empty both fail.
pub(crate) fn required_string(
  errors: &mut ValidationErrors,
  field:  &'static str,
  value:  Option<String>,
) -> Option<String> {
  match value {
    Some(v) if !v.is_empty() => Some(v),
    _ => {
      errors.add(field, "required");
      None
    }
  }
}

/// `required` followed by a UUID parse of the raw string.
pub(crate) fn required_uuid(
  errors: &mut ValidationErrors,
  field:  &'static str,
  value:  Option<String>,
) -> Option<Uuid> {
  let raw = required_string(errors, field, value)?;
  match Uuid::parse_str(&raw) {
    Ok(id) => Some(id),
    Err(_) => {
      errors.add(field, "uuid");
      None
    }
  }
}

/// `required` for integer fields. The `integer` rule itself is enforced by
/// the typed draft field.
pub(crate) fn required_int(
  errors: &mut ValidationErrors,
  field:  &'static str,
  value:  Option<i64>,
) -> Option<i64> {
  match value {
    Some(v) => Some(v),
    None => {
      errors.add(field, "required");
      None
    }
  }
}

/// `required` followed by the `date` rule: strict `%Y-%m-%d`.
pub(crate) fn required_date(
  errors: &mut ValidationErrors,
  field:  &'static str,
  value:  Option<String>,
) -> Option<NaiveDate> {
  let raw = required_string(errors, field, value)?;
  match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
    Ok(d) => Some(d),
    Err(_) => {
      errors.add(field, "date");
      None
    }
  }
}

/// `max:N`, counted in characters.
pub(crate) fn max_len(
  errors: &mut ValidationErrors,
  field:  &'static str,
  value:  &str,
  max:    usize,
) {
  if value.chars().count() > max {
    errors.add(field, format!("max:{max}"));
  }
}

/// `min:N` for integers.
pub(crate) fn min_int(
  errors: &mut ValidationErrors,
  field:  &'static str,
  value:  i64,
  min:    i64,
) {
  if value < min {
    errors.add(field, format!("min:{min}"));
  }
}

/// `in:<values>`. Returns whether the value was allowed.
pub(crate) fn one_of(
  errors:  &mut ValidationErrors,
  field:   &'static str,
  value:   &str,
  allowed: &[&str],
) -> bool {
  if allowed.contains(&value) {
    true
  } else {
    errors.add(field, format!("in:{}", allowed.join(",")));
    false
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
