//! # Comparator
//!
//! Diffs two independently aggregated ranges.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  change      = period2 - period1                                        │
//! │  change_pct  = change / period1 * 100     when period1 > 0             │
//! │              = 0                          otherwise                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A zero percentage therefore means either "no change" or "no baseline";
//! the absolute change tells them apart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

use super::format::RevenuePeriodData;

/// Two ranges side by side plus their deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComparisonResult {
    pub period1: RevenuePeriodData,
    pub period2: RevenuePeriodData,
    pub revenue_change: Money,
    pub revenue_change_percentage: f64,
    pub sales_change: i64,
    pub sales_change_percentage: f64,
}

impl ComparisonResult {
    pub fn between(period1: RevenuePeriodData, period2: RevenuePeriodData) -> Self {
        let revenue_change = period2.total_revenue - period1.total_revenue;
        let revenue_change_percentage = revenue_change.percentage_of(period1.total_revenue);

        let sales_change = period2.total_sales - period1.total_sales;
        let sales_change_percentage = percentage_change(sales_change, period1.total_sales);

        ComparisonResult {
            period1,
            period2,
            revenue_change,
            revenue_change_percentage,
            sales_change,
            sales_change_percentage,
        }
    }
}

fn percentage_change(change: i64, base: i64) -> f64 {
    if base > 0 {
        change as f64 / base as f64 * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revenue::DateRange;
    use chrono::NaiveDate;

    fn period(cents: i64, units: i64, orders: i64) -> RevenuePeriodData {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        RevenuePeriodData {
            total_revenue: Money::from_cents(cents),
            total_sales: units,
            total_orders: orders,
            ..RevenuePeriodData::from_records(DateRange::new(day, day), Vec::new())
        }
    }

    #[test]
    fn test_growth() {
        let result = ComparisonResult::between(period(20000, 10, 5), period(25000, 15, 6));
        assert_eq!(result.revenue_change, Money::from_cents(5000));
        assert_eq!(result.revenue_change_percentage, 25.0);
        assert_eq!(result.sales_change, 5);
        assert_eq!(result.sales_change_percentage, 50.0);
    }

    #[test]
    fn test_decline() {
        let result = ComparisonResult::between(period(40000, 8, 4), period(10000, 2, 1));
        assert_eq!(result.revenue_change, Money::from_cents(-30000));
        assert_eq!(result.revenue_change_percentage, -75.0);
        assert_eq!(result.sales_change_percentage, -75.0);
    }

    #[test]
    fn test_zero_baseline_is_guarded() {
        let result = ComparisonResult::between(period(0, 0, 0), period(50000, 3, 2));
        assert_eq!(result.revenue_change, Money::from_cents(50000));
        assert_eq!(result.revenue_change_percentage, 0.0);
        assert_eq!(result.sales_change, 3);
        assert_eq!(result.sales_change_percentage, 0.0);
    }
}
