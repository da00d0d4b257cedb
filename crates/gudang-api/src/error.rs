//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use gudang_core::{Error as CoreError, validate::ValidationErrors};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Field-level failures; rendered as a 422 with the field-to-rules map.
  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  #[error("not found: {0}")]
  NotFound(String),

  /// Delete refused because other rows still reference the target.
  #[error("conflict: {0}")]
  Conflict(String),

  /// The store failed; the payload is the generic message shown to callers.
  #[error("{0}")]
  Unavailable(String),
}

impl From<CoreError> for ApiError {
  fn from(err: CoreError) -> Self {
    match err {
      CoreError::Validation(errors) => ApiError::Validation(errors),

      // A dangling foreign key reads as a failed `exists` rule on the field
      // that carried it.
      CoreError::ReferenceNotFound { field, table, .. } => {
        let mut errors = ValidationErrors::default();
        errors.add(field, format!("exists:{table}"));
        ApiError::Validation(errors)
      }

      e @ (CoreError::CategoryNotFound(_)
      | CoreError::LocationNotFound(_)
      | CoreError::ItemNotFound(_)
      | CoreError::TransactionNotFound(_)) => ApiError::NotFound(e.to_string()),

      e @ (CoreError::CategoryInUse(_)
      | CoreError::LocationInUse(_)
      | CoreError::ItemInUse(_)) => ApiError::Conflict(e.to_string()),

      CoreError::Unavailable(msg) => ApiError::Unavailable(msg),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(errors) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": errors })),
      )
        .into_response(),
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Conflict(m) => {
        (StatusCode::CONFLICT, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Unavailable(m) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": m })),
      )
        .into_response(),
    }
  }
}
