//! # Period Bucketer
//!
//! Builds the ordered, gapless skeleton of calendar-aligned buckets that a
//! revenue query is folded into.
//!
//! ## Alignment Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Granularity   Bucket start             Bucket end                      │
//! │  ───────────   ─────────────────────    ──────────────────────────      │
//! │  daily         the date itself          same date                      │
//! │  weekly        Monday on/before date    start + 6 days (never clipped) │
//! │  monthly       1st of the month         last day (28/29/30/31)         │
//! │  annual        Jan 1                    Dec 31                         │
//! │                                                                         │
//! │  range: 2024-01-03 (Wed) .. 2024-01-20 (Sat), weekly                   │
//! │                                                                         │
//! │     Mon 01-01 ──── Sun 01-07                                            │
//! │     Mon 01-08 ──── Sun 01-14                                            │
//! │     Mon 01-15 ──── Sun 01-21   ◄── overruns the range end, kept whole  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same `period_start_of` rule is used to generate buckets and to key a
//! sale into one, so a sale lands in a bucket iff its key was generated.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

use super::SaleSnapshot;

// =============================================================================
// Granularity
// =============================================================================

/// Bucketing unit of a revenue query.
///
/// Wire tags are lowercase and case-sensitive: `daily`, `weekly`, `monthly`,
/// `annual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Annual,
}

impl Granularity {
    /// All granularities, in ascending span order.
    pub const ALL: [Granularity; 4] = [
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
        Granularity::Annual,
    ];

    /// Wire tag for this granularity.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Annual => "annual",
        }
    }

    /// Start of the calendar period containing `date`.
    ///
    /// This is the bucket key: generation and assignment both go through it.
    pub fn period_start_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Weekly => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN)
            }
            Granularity::Monthly => date.with_day(1).unwrap_or(date),
            Granularity::Annual => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }

    /// Last day of the period that begins at `period_start`.
    ///
    /// `None` only at the edge of chrono's representable calendar.
    pub fn period_end_from(&self, period_start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Daily => Some(period_start),
            Granularity::Weekly => period_start.checked_add_days(Days::new(6)),
            Granularity::Monthly => period_start
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt()),
            Granularity::Annual => NaiveDate::from_ymd_opt(period_start.year(), 12, 31),
        }
    }

    /// Start of the default window ending at `end`.
    ///
    /// ## Windows
    /// - daily: 30 days back
    /// - weekly: 12 weeks back
    /// - monthly: rolling 12 months, the 1st of the month 11 months before
    ///   `end`'s month
    /// - annual: Jan 1 five years before `end`'s year
    pub fn default_start(&self, end: NaiveDate) -> NaiveDate {
        let start = match self {
            Granularity::Daily => end.checked_sub_days(Days::new(30)),
            Granularity::Weekly => end.checked_sub_days(Days::new(12 * 7)),
            Granularity::Monthly => end
                .with_day(1)
                .and_then(|first| first.checked_sub_months(Months::new(11))),
            Granularity::Annual => NaiveDate::from_ymd_opt(end.year() - 5, 1, 1),
        };
        start.unwrap_or(end)
    }

    /// Human-readable label for the bucket starting at `period_start`.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use emporium_core::revenue::Granularity;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    /// assert_eq!(Granularity::Monthly.label(date), "February 2024");
    /// assert_eq!(Granularity::Weekly.label(date), "Week of 2024-02-01");
    /// ```
    pub fn label(&self, period_start: NaiveDate) -> String {
        match self {
            Granularity::Daily => period_start.format("%Y-%m-%d").to_string(),
            Granularity::Weekly => format!("Week of {}", period_start.format("%Y-%m-%d")),
            Granularity::Monthly => period_start.format("%B %Y").to_string(),
            Granularity::Annual => period_start.year().to_string(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "period".to_string(),
                reason: "must be one of daily, weekly, monthly, annual".to_string(),
            })
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// Inclusive calendar date range `[start, end]`.
///
/// An inverted range (`start > end`) is legal and simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Fills in missing bounds.
    ///
    /// `end` defaults to `today`; `start` defaults to the granularity's
    /// window ending at `end`.
    pub fn resolve(
        granularity: Granularity,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let end = end.unwrap_or(today);
        let start = start.unwrap_or_else(|| granularity.default_start(end));
        DateRange { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The range as UTC instants `[start 00:00, end + 1 day 00:00)`.
    ///
    /// The upper bound is `None` when `end` is the last representable date.
    pub fn utc_bounds(&self) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        let lower = self.start.and_time(NaiveTime::MIN).and_utc();
        let upper = self
            .end
            .checked_add_days(Days::new(1))
            .map(|next| next.and_time(NaiveTime::MIN).and_utc());
        (lower, upper)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// =============================================================================
// Bucket
// =============================================================================

/// A calendar span `[period_start, period_end]` with running aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_revenue: Money,
    /// Sum of line quantities.
    pub unit_count: i64,
    /// Number of sales folded in.
    pub transaction_count: i64,
}

impl Bucket {
    /// An empty bucket with all aggregates at zero.
    pub fn empty(period_start: NaiveDate, period_end: NaiveDate) -> Self {
        Bucket {
            period_start,
            period_end,
            total_revenue: Money::zero(),
            unit_count: 0,
            transaction_count: 0,
        }
    }

    /// Folds one sale into the running aggregates.
    pub fn record(&mut self, sale: &SaleSnapshot) {
        self.total_revenue += sale.total;
        self.unit_count += sale.units();
        self.transaction_count += 1;
    }
}

/// Generates the bucket skeleton covering `[start, end]`.
///
/// Returns an empty vector when `start > end`. The first bucket starts on or
/// before `start`, the last ends on or after `end`, and every next bucket
/// starts the day after the previous one ends.
///
/// ```rust
/// use chrono::NaiveDate;
/// use emporium_core::revenue::{generate_buckets, Granularity};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// let buckets = generate_buckets(Granularity::Weekly, start, end);
///
/// assert_eq!(buckets.len(), 1);
/// assert_eq!(buckets[0].period_start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// ```
pub fn generate_buckets(granularity: Granularity, start: NaiveDate, end: NaiveDate) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    if start > end {
        return buckets;
    }

    let mut cursor = granularity.period_start_of(start);
    while cursor <= end {
        let Some(period_end) = granularity.period_end_from(cursor) else {
            break;
        };
        buckets.push(Bucket::empty(cursor, period_end));

        match period_end.succ_opt() {
            Some(next) => cursor = next,
            None => break,
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_covers(buckets: &[Bucket], start: NaiveDate, end: NaiveDate) {
        assert!(!buckets.is_empty());
        assert!(buckets[0].period_start <= start);
        assert!(buckets[buckets.len() - 1].period_end >= end);
        for bucket in buckets {
            assert!(bucket.period_start <= bucket.period_end);
        }
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].period_end.succ_opt(), Some(pair[1].period_start));
        }
    }

    #[test]
    fn test_daily_buckets() {
        let buckets = generate_buckets(Granularity::Daily, date(2024, 1, 1), date(2024, 1, 3));
        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|b| b.period_start == b.period_end));
        assert_eq!(buckets[1].period_start, date(2024, 1, 2));
    }

    #[test]
    fn test_weekly_aligns_to_monday() {
        // 2024-01-03 is a Wednesday
        let buckets = generate_buckets(Granularity::Weekly, date(2024, 1, 3), date(2024, 1, 20));
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].period_start, date(2024, 1, 1));
        assert_eq!(buckets[0].period_end, date(2024, 1, 7));
        // last bucket is not clipped to the range end
        assert_eq!(buckets[2].period_end, date(2024, 1, 21));
    }

    #[test]
    fn test_monthly_uses_true_month_lengths() {
        let buckets = generate_buckets(Granularity::Monthly, date(2024, 1, 15), date(2024, 3, 10));
        let spans: Vec<_> = buckets
            .iter()
            .map(|b| (b.period_start, b.period_end))
            .collect();
        assert_eq!(
            spans,
            vec![
                (date(2024, 1, 1), date(2024, 1, 31)),
                (date(2024, 2, 1), date(2024, 2, 29)),
                (date(2024, 3, 1), date(2024, 3, 31)),
            ]
        );

        let non_leap = generate_buckets(Granularity::Monthly, date(2023, 2, 10), date(2023, 2, 10));
        assert_eq!(non_leap[0].period_end, date(2023, 2, 28));
    }

    #[test]
    fn test_monthly_crosses_year_boundary() {
        let buckets = generate_buckets(Granularity::Monthly, date(2023, 11, 20), date(2024, 2, 2));
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[1].period_end, date(2023, 12, 31));
        assert_eq!(buckets[2].period_start, date(2024, 1, 1));
    }

    #[test]
    fn test_annual_buckets() {
        let buckets = generate_buckets(Granularity::Annual, date(2021, 6, 1), date(2024, 2, 1));
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].period_start, date(2021, 1, 1));
        assert_eq!(buckets[3].period_end, date(2024, 12, 31));
    }

    #[test]
    fn test_coverage_for_every_granularity() {
        let ranges = [
            (date(2024, 1, 3), date(2024, 1, 3)),
            (date(2023, 12, 30), date(2024, 3, 1)),
            (date(2020, 2, 29), date(2024, 7, 14)),
        ];
        for granularity in Granularity::ALL {
            for (start, end) in ranges {
                let buckets = generate_buckets(granularity, start, end);
                assert_covers(&buckets, start, end);
            }
        }
    }

    #[test]
    fn test_inverted_range_is_empty() {
        for granularity in Granularity::ALL {
            assert!(generate_buckets(granularity, date(2024, 3, 1), date(2024, 2, 1)).is_empty());
        }
    }

    #[test]
    fn test_default_windows() {
        let end = date(2024, 3, 15);
        assert_eq!(Granularity::Daily.default_start(end), date(2024, 2, 14));
        assert_eq!(Granularity::Weekly.default_start(end), date(2023, 12, 22));
        assert_eq!(Granularity::Monthly.default_start(end), date(2023, 4, 1));
        assert_eq!(Granularity::Annual.default_start(end), date(2019, 1, 1));

        // rolling window yields twelve monthly buckets including the end month
        let start = Granularity::Monthly.default_start(end);
        assert_eq!(generate_buckets(Granularity::Monthly, start, end).len(), 12);
    }

    #[test]
    fn test_resolve_range_defaults() {
        let today = date(2024, 5, 31);
        let range = DateRange::resolve(Granularity::Daily, None, None, today);
        assert_eq!(range, DateRange::new(date(2024, 5, 1), today));

        let explicit = DateRange::resolve(Granularity::Annual, Some(date(2024, 1, 1)), None, today);
        assert_eq!(explicit.start, date(2024, 1, 1));
        assert_eq!(explicit.end, today);
    }

    #[test]
    fn test_utc_bounds_are_half_open_days() {
        let (lower, upper) = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).utc_bounds();
        assert_eq!(lower.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(upper.map(|u| u.to_rfc3339()).as_deref(), Some("2024-04-01T00:00:00+00:00"));

        let (_, open) = DateRange::new(date(2024, 3, 1), NaiveDate::MAX).utc_bounds();
        assert_eq!(open, None);
    }

    #[test]
    fn test_labels() {
        let d = date(2024, 1, 1);
        assert_eq!(Granularity::Daily.label(d), "2024-01-01");
        assert_eq!(Granularity::Weekly.label(d), "Week of 2024-01-01");
        assert_eq!(Granularity::Monthly.label(d), "January 2024");
        assert_eq!(Granularity::Annual.label(d), "2024");
    }

    #[test]
    fn test_granularity_wire_tags() {
        assert_eq!("weekly".parse::<Granularity>().unwrap(), Granularity::Weekly);
        assert!("Weekly".parse::<Granularity>().is_err());
        assert!("yearly".parse::<Granularity>().is_err());
        assert_eq!(
            serde_json::to_string(&Granularity::Annual).unwrap(),
            "\"annual\""
        );
    }
}
