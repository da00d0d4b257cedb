//! Error types for `gudang-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::validate::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more field constraints failed; nothing was written.
  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  #[error("category not found: {0}")]
  CategoryNotFound(Uuid),

  #[error("location not found: {0}")]
  LocationNotFound(Uuid),

  #[error("item not found: {0}")]
  ItemNotFound(Uuid),

  #[error("transaction not found: {0}")]
  TransactionNotFound(Uuid),

  /// A foreign-key field points at a row that does not exist.
  #[error("{field}: no row {id} in {table}")]
  ReferenceNotFound {
    field: &'static str,
    table: &'static str,
    id:    Uuid,
  },

  #[error("category {0} is still referenced by items")]
  CategoryInUse(Uuid),

  #[error("location {0} is still referenced by items")]
  LocationInUse(Uuid),

  #[error("item {0} is still referenced by transactions")]
  ItemInUse(Uuid),

  /// The backing store could not be reached or failed mid-operation.
  #[error("store unavailable: {0}")]
  Unavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
