//! # Revenue Aggregation Engine
//!
//! Buckets sales into calendar periods, computes per-period metrics and
//! compares two date ranges.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  (granularity, start?, end?, category?)                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  DateRange::resolve ──── fills missing bounds from the granularity     │
//! │        │                                                                │
//! │        ├──────────────► SalesSource::fetch_sales (async, one call)     │
//! │        ▼                          │                                     │
//! │  generate_buckets ── skeleton     │                                     │
//! │        │                          │                                     │
//! │        ▼                          ▼                                     │
//! │  aggregate ◄────────────── Vec<SaleSnapshot>                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  finalize ──► Vec<RevenuePeriodRecord>                                  │
//! │                                                                         │
//! │  compare = the pipeline twice (explicit bounds) + ComparisonResult     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything except the source call is pure and synchronous. The engine
//! has no error type of its own; degenerate input yields empty or zero
//! output and only source failures propagate.

mod aggregate;
mod bucket;
mod compare;
mod format;

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

pub use aggregate::aggregate;
pub use bucket::{generate_buckets, Bucket, DateRange, Granularity};
pub use compare::ComparisonResult;
pub use format::{finalize, RevenuePeriodData, RevenuePeriodRecord};

// =============================================================================
// Sales Source
// =============================================================================

/// Read-only view of one sale, as much as the engine needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSnapshot {
    pub id: String,
    pub total: Money,
    pub occurred_at: DateTime<Utc>,
    /// Quantity of every line of the sale.
    pub line_quantities: Vec<i64>,
}

impl SaleSnapshot {
    /// Calendar date used for bucket assignment.
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }

    /// Units sold in this sale.
    pub fn units(&self) -> i64 {
        self.line_quantities.iter().sum()
    }
}

/// Supplier of sales for a date range.
///
/// ## Contract
/// - `fetch_sales` returns every sale whose date lies in the inclusive range
///   and, when `category_id` is given, that has at least one line in that
///   category. Order is irrelevant.
/// - `category_name` returns `None` for unknown ids.
pub trait SalesSource {
    type Error;

    fn fetch_sales(
        &self,
        range: DateRange,
        category_id: Option<&str>,
    ) -> impl Future<Output = Result<Vec<SaleSnapshot>, Self::Error>> + Send;

    fn category_name(
        &self,
        category_id: &str,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;
}

// =============================================================================
// Engine
// =============================================================================

/// Request-scoped revenue engine borrowing its sales source.
pub struct RevenueEngine<'a, S> {
    source: &'a S,
    today: NaiveDate,
}

impl<'a, S: SalesSource> RevenueEngine<'a, S> {
    pub fn new(source: &'a S) -> Self {
        RevenueEngine {
            source,
            today: Utc::now().date_naive(),
        }
    }

    /// Overrides the date used as the default range end.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Revenue per calendar bucket.
    ///
    /// Missing bounds are resolved with [`DateRange::resolve`]. An inverted
    /// range returns an empty list without touching the source.
    pub async fn revenue_by_period(
        &self,
        granularity: Granularity,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        category_id: Option<&str>,
    ) -> Result<Vec<RevenuePeriodRecord>, S::Error> {
        let range = DateRange::resolve(granularity, start, end, self.today);
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let category_name = self.lookup_category(category_id).await?;
        self.records_for(granularity, range, category_id, category_name.as_deref())
            .await
    }

    /// Compares two explicit ranges with the same granularity and category.
    pub async fn compare(
        &self,
        granularity: Granularity,
        period1: DateRange,
        period2: DateRange,
        category_id: Option<&str>,
    ) -> Result<ComparisonResult, S::Error> {
        let category_name = self.lookup_category(category_id).await?;
        let category_name = category_name.as_deref();

        let first = self
            .records_for(granularity, period1, category_id, category_name)
            .await?;
        let second = self
            .records_for(granularity, period2, category_id, category_name)
            .await?;

        Ok(ComparisonResult::between(
            RevenuePeriodData::from_records(period1, first),
            RevenuePeriodData::from_records(period2, second),
        ))
    }

    async fn records_for(
        &self,
        granularity: Granularity,
        range: DateRange,
        category_id: Option<&str>,
        category_name: Option<&str>,
    ) -> Result<Vec<RevenuePeriodRecord>, S::Error> {
        let buckets = generate_buckets(granularity, range.start, range.end);
        if buckets.is_empty() {
            return Ok(Vec::new());
        }

        let sales = self.source.fetch_sales(range, category_id).await?;
        let buckets = aggregate(granularity, buckets, &sales);
        Ok(finalize(granularity, buckets, category_name))
    }

    async fn lookup_category(&self, category_id: Option<&str>) -> Result<Option<String>, S::Error> {
        match category_id {
            Some(id) => self.source.category_name(id).await,
            None => Ok(None),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
