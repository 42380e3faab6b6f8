//! Revenue endpoints.
//!
//! ## Request Flow
//! ```text
//! GET /revenue/monthly?start_date=2024-01-01&category_id=...
//!      │
//!      ▼
//! Granularity::from_str("monthly")      unknown tag → 400
//!      │
//!      ▼
//! RevenueEngine::new(&SaleRepository)   borrows the repository for this request
//!      │
//!      ├── resolve range (defaults per granularity)
//!      ├── generate buckets
//!      ├── SalesSource::fetch_sales      one query for the whole range
//!      └── aggregate + finalize
//!      │
//!      ▼
//! [RevenuePeriodRecord]                 one per bucket, empty buckets included
//! ```

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use emporium_core::revenue::{ComparisonResult, DateRange, Granularity, RevenueEngine, RevenuePeriodRecord};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RevenueQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub period: Option<String>,
    pub period1_start: NaiveDate,
    pub period1_end: NaiveDate,
    pub period2_start: NaiveDate,
    pub period2_end: NaiveDate,
    pub category_id: Option<String>,
}

/// `GET /revenue/{daily|weekly|monthly|annual}`
pub async fn by_period(
    State(state): State<AppState>,
    Path(period): Path<String>,
    query: Result<Query<RevenueQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<RevenuePeriodRecord>>> {
    let granularity: Granularity = period.parse()?;
    let Query(query) = query?;

    let sales = state.db.sales();
    let records = RevenueEngine::new(&sales)
        .revenue_by_period(
            granularity,
            query.start_date,
            query.end_date,
            query.category_id.as_deref(),
        )
        .await?;

    tracing::debug!(period = %granularity, buckets = records.len(), "Revenue computed");
    Ok(Json(records))
}

/// `GET /revenue/compare`
pub async fn compare(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> ApiResult<Json<ComparisonResult>> {
    let Query(query) = query?;
    let granularity = match query.period.as_deref() {
        Some(period) => period.parse()?,
        None => Granularity::Monthly,
    };

    let period1 = DateRange::new(query.period1_start, query.period1_end);
    let period2 = DateRange::new(query.period2_start, query.period2_end);

    let sales = state.db.sales();
    let comparison = RevenueEngine::new(&sales)
        .compare(granularity, period1, period2, query.category_id.as_deref())
        .await?;

    Ok(Json(comparison))
}
