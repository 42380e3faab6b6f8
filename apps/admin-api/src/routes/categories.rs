//! Category endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use emporium_core::validation::validate_new_category;
use emporium_core::{Category, NewCategory};

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /categories`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.db.categories().list().await?;
    Ok(Json(categories))
}

/// `POST /categories`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(new) = body?;
    validate_new_category(&new)?;

    let category = state.db.categories().insert(&new).await?;
    tracing::info!(id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}
