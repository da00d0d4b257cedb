//! Handlers for the `/dashboard` aggregate endpoints.
//!
//! Each endpoint degrades any store failure to a generic message rather than
//! leaking partial data or internals; the strings match what the dashboard
//! front-end already expects.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{Datelike as _, Utc};
use gudang_core::{
  ledger::{CategorySlice, DashboardStats, MonthlyFlow, RecentTransaction},
  store::InventoryStore,
};

use crate::error::ApiError;

/// How many rows the recent-activity and category charts show.
const CHART_LIMIT: usize = 5;

/// `GET /dashboard/stats`
pub async fn stats<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<DashboardStats>, ApiError>
where
  S: InventoryStore,
{
  let stats = store
    .dashboard_stats()
    .await
    .map_err(|_| ApiError::Unavailable("Failed to fetch statistics".into()))?;
  Ok(Json(stats))
}

/// `GET /dashboard/recent-transactions`
pub async fn recent_transactions<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<RecentTransaction>>, ApiError>
where
  S: InventoryStore,
{
  let recent = store.recent_transactions(CHART_LIMIT).await.map_err(|_| {
    ApiError::Unavailable("Failed to fetch recent transactions".into())
  })?;
  Ok(Json(recent))
}

/// `GET /dashboard/monthly-transactions`
pub async fn monthly_transactions<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<MonthlyFlow>>, ApiError>
where
  S: InventoryStore,
{
  let year = Utc::now().year();
  let flows = store.monthly_flows(year).await.map_err(|_| {
    ApiError::Unavailable("Failed to fetch monthly transactions".into())
  })?;
  Ok(Json(flows))
}

/// `GET /dashboard/category-distribution`
pub async fn category_distribution<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CategorySlice>>, ApiError>
where
  S: InventoryStore,
{
  let slices = store.category_distribution(CHART_LIMIT).await.map_err(|_| {
    ApiError::Unavailable("Failed to fetch category distribution".into())
  })?;
  Ok(Json(slices))
}
