//! Handlers for `/transactions` endpoints.
//!
//! The draft carries the acting user's id explicitly; there is no ambient
//! authentication context to stamp it from.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gudang_core::{
  store::InventoryStore,
  transaction::{Transaction, TransactionDraft},
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /transactions`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Transaction>>, ApiError>
where
  S: InventoryStore,
{
  Ok(Json(store.list_transactions().await?))
}

/// `POST /transactions`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(draft): Json<TransactionDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
{
  let input = draft.validate().map_err(ApiError::Validation)?;
  let transaction = store.create_transaction(input).await?;
  Ok((StatusCode::CREATED, Json(transaction)))
}

/// `GET /transactions/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Transaction>, ApiError>
where
  S: InventoryStore,
{
  store
    .get_transaction(id)
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("transaction {id} not found")))
}

/// `PUT /transactions/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(draft): Json<TransactionDraft>,
) -> Result<Json<Transaction>, ApiError>
where
  S: InventoryStore,
{
  let input = draft.validate().map_err(ApiError::Validation)?;
  Ok(Json(store.update_transaction(id, input).await?))
}

/// `DELETE /transactions/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InventoryStore,
{
  store.delete_transaction(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
