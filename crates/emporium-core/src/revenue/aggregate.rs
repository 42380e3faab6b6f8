//! # Bucket Aggregator
//!
//! Folds sales into a pre-generated bucket skeleton.
//!
//! ```text
//!   buckets: [ Jan ][ Feb ][ Mar ]        index: { 01-01 → 0, 02-01 → 1, 03-01 → 2 }
//!                                                      ▲
//!   sale 2024-02-17 ── period_start_of ── 2024-02-01 ──┘ ──► buckets[1].record(sale)
//!   sale 2023-12-31 ── period_start_of ── 2023-12-01 ──► no key, dropped
//! ```
//!
//! The index is only used for lookups; output order is the skeleton's order.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::bucket::{Bucket, Granularity};
use super::SaleSnapshot;

/// Assigns every sale to its bucket and accumulates revenue, units and
/// transaction counts.
///
/// Sales whose period key has no bucket are dropped silently.
pub fn aggregate(granularity: Granularity, mut buckets: Vec<Bucket>, sales: &[SaleSnapshot]) -> Vec<Bucket> {
    let index: HashMap<NaiveDate, usize> = buckets
        .iter()
        .enumerate()
        .map(|(position, bucket)| (bucket.period_start, position))
        .collect();

    for sale in sales {
        let key = granularity.period_start_of(sale.occurred_on());
        if let Some(&position) = index.get(&key) {
            buckets[position].record(sale);
        }
    }

    buckets
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::revenue::generate_buckets;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(y: i32, m: u32, d: u32, cents: i64, quantities: &[i64]) -> SaleSnapshot {
        SaleSnapshot {
            id: format!("sale-{y}-{m}-{d}-{cents}"),
            total: Money::from_cents(cents),
            occurred_at: Utc.with_ymd_and_hms(y, m, d, 14, 30, 0).unwrap(),
            line_quantities: quantities.to_vec(),
        }
    }

    #[test]
    fn test_daily_fold() {
        let buckets = generate_buckets(Granularity::Daily, date(2024, 1, 1), date(2024, 1, 3));
        let sales = vec![sale(2024, 1, 1, 10000, &[2]), sale(2024, 1, 3, 5000, &[1])];

        let buckets = aggregate(Granularity::Daily, buckets, &sales);

        assert_eq!(buckets[0].total_revenue, Money::from_cents(10000));
        assert_eq!(buckets[0].unit_count, 2);
        assert_eq!(buckets[0].transaction_count, 1);
        assert_eq!(buckets[1], Bucket::empty(date(2024, 1, 2), date(2024, 1, 2)));
        assert_eq!(buckets[2].total_revenue, Money::from_cents(5000));
    }

    #[test]
    fn test_weekly_fold_keys_by_monday() {
        let buckets = generate_buckets(Granularity::Weekly, date(2024, 1, 3), date(2024, 1, 14));
        // Monday before the query start still belongs to the first bucket
        let sales = vec![
            sale(2024, 1, 1, 100, &[1]),
            sale(2024, 1, 7, 200, &[1, 2]),
            sale(2024, 1, 8, 300, &[]),
        ];

        let buckets = aggregate(Granularity::Weekly, buckets, &sales);

        assert_eq!(buckets[0].total_revenue, Money::from_cents(300));
        assert_eq!(buckets[0].unit_count, 4);
        assert_eq!(buckets[0].transaction_count, 2);
        assert_eq!(buckets[1].transaction_count, 1);
        assert_eq!(buckets[1].unit_count, 0);
    }

    #[test]
    fn test_sales_outside_buckets_are_dropped() {
        let buckets = generate_buckets(Granularity::Monthly, date(2024, 1, 1), date(2024, 2, 29));
        let sales = vec![
            sale(2023, 12, 31, 999, &[1]),
            sale(2024, 2, 17, 500, &[1]),
            sale(2024, 3, 1, 999, &[1]),
        ];

        let buckets = aggregate(Granularity::Monthly, buckets, &sales);

        let total: Money = buckets.iter().map(|b| b.total_revenue).sum();
        assert_eq!(total, Money::from_cents(500));
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn test_conservation_and_order_independence() {
        let buckets = generate_buckets(Granularity::Annual, date(2022, 1, 1), date(2024, 12, 31));
        let mut sales = vec![
            sale(2022, 3, 1, 1234, &[1]),
            sale(2023, 7, 4, 4321, &[3]),
            sale(2024, 12, 31, 1, &[1]),
            sale(2023, 1, 1, 99, &[2]),
        ];

        let forward = aggregate(Granularity::Annual, buckets.clone(), &sales);
        sales.reverse();
        let backward = aggregate(Granularity::Annual, buckets, &sales);

        assert_eq!(forward, backward);
        let total: Money = forward.iter().map(|b| b.total_revenue).sum();
        assert_eq!(total, Money::from_cents(1234 + 4321 + 1 + 99));
    }

    #[test]
    fn test_zero_buckets_stay_zero() {
        let buckets = generate_buckets(Granularity::Daily, date(2024, 1, 1), date(2024, 1, 5));
        let buckets = aggregate(Granularity::Daily, buckets, &[sale(2024, 1, 3, 700, &[1])]);

        for bucket in buckets.iter().filter(|b| b.transaction_count == 0) {
            assert!(bucket.total_revenue.is_zero());
            assert_eq!(bucket.unit_count, 0);
        }
    }
}
