//! Route tables.
//!
//! Handlers are thin: extract, validate with `emporium_core::validation`,
//! call a repository or the revenue engine, map errors through [`ApiError`].
//!
//! [`ApiError`]: crate::error::ApiError

pub mod categories;
pub mod health;
pub mod inventory;
pub mod products;
pub mod revenue;
pub mod sales;

use axum::routing::{get, put};
use axum::Router;

use emporium_core::validation::validate_page;
use emporium_core::{Page, ValidationError, DEFAULT_PAGE_LIMIT};

use crate::state::AppState;

/// Routes nested under the configured prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/inventory", get(inventory::list))
        .route("/inventory/low-stock", get(inventory::low_stock))
        .route("/inventory/{product_id}", put(inventory::set_quantity))
        .route("/inventory/{product_id}/history", get(inventory::history))
        .route("/sales", get(sales::list).post(sales::create))
        .route("/sales/{id}", get(sales::get))
        .route("/revenue/compare", get(revenue::compare))
        .route("/revenue/{period}", get(revenue::by_period))
}

/// Routes served at the root regardless of prefix.
pub fn root_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::welcome))
        .route("/health", get(health::health))
}

/// Applies `limit` / `offset` defaults and range checks.
pub fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> Result<Page, ValidationError> {
    let page = Page {
        limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        offset: offset.unwrap_or(0),
    };
    validate_page(&page)?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_page() {
        assert_eq!(resolve_page(None, None).unwrap(), Page::default());
        assert_eq!(resolve_page(Some(5), Some(10)).unwrap(), Page { limit: 5, offset: 10 });
        assert!(resolve_page(Some(0), None).is_err());
        assert!(resolve_page(Some(1001), None).is_err());
        assert!(resolve_page(None, Some(-1)).is_err());
    }
}
