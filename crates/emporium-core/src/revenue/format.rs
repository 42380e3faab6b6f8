//! # Metric Formatter
//!
//! Turns aggregated buckets into the immutable records returned to callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

use super::bucket::{Bucket, DateRange, Granularity};

// =============================================================================
// Per-Bucket Record
// =============================================================================

/// Revenue metrics for one calendar bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenuePeriodRecord {
    #[ts(as = "String")]
    pub period_start: NaiveDate,
    #[ts(as = "String")]
    pub period_end: NaiveDate,
    /// Revenue in cents.
    pub total_revenue: Money,
    /// Units sold (sum of line quantities).
    pub total_sales: i64,
    /// Number of sales in the bucket.
    pub order_count: i64,
    /// `total_revenue / order_count`, zero for an empty bucket.
    pub average_order_value: Money,
    pub period_label: String,
    pub category_name: Option<String>,
}

impl RevenuePeriodRecord {
    /// Finalizes a bucket.
    pub fn from_bucket(granularity: Granularity, bucket: Bucket, category_name: Option<&str>) -> Self {
        let average_order_value = bucket
            .total_revenue
            .average_over(bucket.transaction_count)
            .unwrap_or_default();

        RevenuePeriodRecord {
            period_label: granularity.label(bucket.period_start),
            period_start: bucket.period_start,
            period_end: bucket.period_end,
            total_revenue: bucket.total_revenue,
            total_sales: bucket.unit_count,
            order_count: bucket.transaction_count,
            average_order_value,
            category_name: category_name.map(str::to_string),
        }
    }
}

/// Finalizes every bucket, preserving order.
pub fn finalize(
    granularity: Granularity,
    buckets: Vec<Bucket>,
    category_name: Option<&str>,
) -> Vec<RevenuePeriodRecord> {
    buckets
        .into_iter()
        .map(|bucket| RevenuePeriodRecord::from_bucket(granularity, bucket, category_name))
        .collect()
}

// =============================================================================
// Range Aggregate
// =============================================================================

/// One side of a comparison: the per-bucket records plus range totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenuePeriodData {
    /// `"{start} to {end}"` using the requested bounds.
    pub period_name: String,
    pub data: Vec<RevenuePeriodRecord>,
    pub total_revenue: Money,
    pub total_sales: i64,
    pub total_orders: i64,
    /// Range revenue divided by range orders, zero without orders.
    pub average_order_value: Money,
}

impl RevenuePeriodData {
    pub fn from_records(range: DateRange, data: Vec<RevenuePeriodRecord>) -> Self {
        let total_revenue: Money = data.iter().map(|r| r.total_revenue).sum();
        let total_sales = data.iter().map(|r| r.total_sales).sum();
        let total_orders = data.iter().map(|r| r.order_count).sum();

        RevenuePeriodData {
            period_name: range.to_string(),
            average_order_value: total_revenue.average_over(total_orders).unwrap_or_default(),
            data,
            total_revenue,
            total_sales,
            total_orders,
        }
    }
}
