//! Product endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use emporium_core::validation::{validate_new_product, validate_product_patch};
use emporium_core::{CoreError, NewProduct, ProductDetail, ProductPatch};
use emporium_db::ProductFilter;

use super::resolve_page;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /products`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ProductDetail>>> {
    let Query(query) = query?;
    let page = resolve_page(query.limit, query.offset)?;

    let filter = ProductFilter {
        category_id: query.category_id,
        name: query.name.filter(|name| !name.trim().is_empty()),
    };

    let products = state.db.products().list(&filter, page).await?;
    Ok(Json(products))
}

/// `POST /products`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductDetail>)> {
    let Json(new) = body?;
    validate_new_product(&new)?;

    let product = state.db.products().create(&new).await?;
    tracing::info!(id = %product.id, sku = %product.sku, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /products/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<ProductDetail>> {
    let product = state
        .db
        .products()
        .get_detail(&id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;
    Ok(Json(product))
}

/// `PUT /products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Json<ProductDetail>> {
    let Json(patch) = body?;
    validate_product_patch(&patch)?;

    let product = state.db.products().update(&id, &patch).await?;
    Ok(Json(product))
}

/// `DELETE /products/{id}`
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.products().delete(&id).await?;
    tracing::info!(id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
