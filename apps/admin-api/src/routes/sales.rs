//! Sale endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use emporium_core::validation::validate_new_sale;
use emporium_core::{CoreError, NewSale, SaleDetail, SaleFilter};

use super::resolve_page;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SaleQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub product_id: Option<String>,
    pub category_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /sales`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<SaleQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SaleDetail>>> {
    let Query(query) = query?;
    let page = resolve_page(query.limit, query.offset)?;

    let filter = SaleFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        product_id: query.product_id,
        category_id: query.category_id,
    };

    let sales = state.db.sales().list(&filter, page).await?;
    Ok(Json(sales))
}

/// `GET /sales/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<SaleDetail>> {
    let sale = state
        .db
        .sales()
        .get_detail(&id)
        .await?
        .ok_or(CoreError::SaleNotFound(id))?;
    Ok(Json(sale))
}

/// `POST /sales`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewSale>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SaleDetail>)> {
    let Json(new) = body?;
    validate_new_sale(&new)?;

    let sale = state.db.sales().create(&new).await?;
    tracing::info!(id = %sale.id, total_cents = sale.total_cents, lines = sale.items.len(), "Sale recorded");
    Ok((StatusCode::CREATED, Json(sale)))
}
