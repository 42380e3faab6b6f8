//! Inventory endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use emporium_core::validation::{validate_low_stock_threshold, validate_stock_level};
use emporium_core::{InventoryAdjustment, InventoryHistoryEntry, InventoryItem, DEFAULT_LOW_STOCK_THRESHOLD};

use super::resolve_page;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub category_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i64>,
    pub category_id: Option<String>,
}

/// `GET /inventory`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<InventoryQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<InventoryItem>>> {
    let Query(query) = query?;
    let page = resolve_page(query.limit, query.offset)?;

    let items = state.db.inventory().list(query.category_id.as_deref(), page).await?;
    Ok(Json(items))
}

/// `GET /inventory/low-stock`
pub async fn low_stock(
    State(state): State<AppState>,
    query: Result<Query<LowStockQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<InventoryItem>>> {
    let Query(query) = query?;
    let threshold = query.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    validate_low_stock_threshold(threshold)?;

    let items = state
        .db
        .inventory()
        .low_stock(threshold, query.category_id.as_deref())
        .await?;
    Ok(Json(items))
}

/// `PUT /inventory/{product_id}`
pub async fn set_quantity(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    body: Result<Json<InventoryAdjustment>, JsonRejection>,
) -> ApiResult<Json<InventoryItem>> {
    let Json(adjustment) = body?;
    validate_stock_level(adjustment.quantity)?;

    let item = state.db.inventory().set_quantity(&product_id, &adjustment).await?;
    tracing::info!(product_id = %product_id, quantity = item.quantity, "Stock level set");
    Ok(Json(item))
}

/// `GET /inventory/{product_id}/history`
pub async fn history(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ApiResult<Json<Vec<InventoryHistoryEntry>>> {
    let entries = state.db.inventory().history(&product_id).await?;
    Ok(Json(entries))
}
