//! Handlers for `/categories` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/categories` | every row, unpaginated |
//! | `POST`   | `/categories` | 201 on success |
//! | `GET`    | `/categories/:id` | 404 if not found |
//! | `PUT`    | `/categories/:id` | full-record replace |
//! | `DELETE` | `/categories/:id` | 409 while items reference it |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gudang_core::{
  category::{Category, CategoryDraft},
  store::InventoryStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /categories`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Category>>, ApiError>
where
  S: InventoryStore,
{
  Ok(Json(store.list_categories().await?))
}

/// `POST /categories`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(draft): Json<CategoryDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
{
  let input = draft.validate().map_err(ApiError::Validation)?;
  let category = store.create_category(input).await?;
  Ok((StatusCode::CREATED, Json(category)))
}

/// `GET /categories/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Category>, ApiError>
where
  S: InventoryStore,
{
  store
    .get_category(id)
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("category {id} not found")))
}

/// `PUT /categories/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(draft): Json<CategoryDraft>,
) -> Result<Json<Category>, ApiError>
where
  S: InventoryStore,
{
  let input = draft.validate().map_err(ApiError::Validation)?;
  Ok(Json(store.update_category(id, input).await?))
}

/// `DELETE /categories/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InventoryStore,
{
  store.delete_category(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
