//! Handlers for `/locations` endpoints. Same surface as `/categories`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gudang_core::{
  location::{Location, LocationDraft},
  store::InventoryStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /locations`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Location>>, ApiError>
where
  S: InventoryStore,
{
  Ok(Json(store.list_locations().await?))
}

/// `POST /locations`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(draft): Json<LocationDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
{
  let input = draft.validate().map_err(ApiError::Validation)?;
  let location = store.create_location(input).await?;
  Ok((StatusCode::CREATED, Json(location)))
}

/// `GET /locations/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Location>, ApiError>
where
  S: InventoryStore,
{
  store
    .get_location(id)
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("location {id} not found")))
}

/// `PUT /locations/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(draft): Json<LocationDraft>,
) -> Result<Json<Location>, ApiError>
where
  S: InventoryStore,
{
  let input = draft.validate().map_err(ApiError::Validation)?;
  Ok(Json(store.update_location(id, input).await?))
}

/// `DELETE /locations/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InventoryStore,
{
  store.delete_location(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
