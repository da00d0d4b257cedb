//! Handlers for `/items` endpoints.
//!
//! On top of the usual resource surface, `GET /items/:id/stock` exposes the
//! ledger-derived quantity-on-hand and the low-stock flag.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gudang_core::{
  item::{Item, ItemDraft},
  ledger::{self, StockLevel},
  store::InventoryStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /items`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Item>>, ApiError>
where
  S: InventoryStore,
{
  Ok(Json(store.list_items().await?))
}

/// `POST /items`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(draft): Json<ItemDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
{
  let input = draft.validate().map_err(ApiError::Validation)?;
  let item = store.create_item(input).await?;
  Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /items/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Item>, ApiError>
where
  S: InventoryStore,
{
  store
    .get_item(id)
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("item {id} not found")))
}

/// `PUT /items/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(draft): Json<ItemDraft>,
) -> Result<Json<Item>, ApiError>
where
  S: InventoryStore,
{
  let input = draft.validate().map_err(ApiError::Validation)?;
  Ok(Json(store.update_item(id, input).await?))
}

/// `DELETE /items/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InventoryStore,
{
  store.delete_item(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /items/:id/stock`
pub async fn stock<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StockLevel>, ApiError>
where
  S: InventoryStore,
{
  let stock = store.stock_on_hand(id).await?;
  Ok(Json(StockLevel {
    item_id:   id,
    stock,
    low_stock: ledger::is_low_stock(stock),
  }))
}
