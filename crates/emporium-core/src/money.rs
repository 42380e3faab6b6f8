//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Floating point cannot represent most decimal fractions exactly:       │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                     │
//! │                                                                         │
//! │  Summing thousands of sale totals into a revenue bucket amplifies      │
//! │  that drift. Storing cents in an i64 keeps every sum exact; only       │
//! │  averages and percentages round, and they round in one place.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use emporium_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//!
//! let doubled = price * 2;                    // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//! assert_eq!(total.cents(), 1599);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences between periods can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as an integer**: the wire always carries cents
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price_cents ──► SaleItem.unit_price ──► SaleItem.subtotal      │
/// │                                                     │                   │
/// │                                                     ▼                   │
/// │                                             Sale.total_cents            │
/// │                                                     │                   │
/// │                                                     ▼                   │
/// │                   Bucket.total_revenue ──► average_order_value         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use emporium_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use emporium_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use emporium_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies by a quantity, returning `None` if the result leaves the
    /// `i64` cent range.
    ///
    /// ## Example
    /// ```rust
    /// use emporium_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(299).checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Divides the amount evenly across `count` parts, rounding half away
    /// from zero to the nearest cent.
    ///
    /// Returns `None` when `count` is zero or negative; callers decide what
    /// an undefined average means for them.
    ///
    /// ## Example
    /// ```rust
    /// use emporium_core::money::Money;
    ///
    /// // $10.00 over 3 orders = $3.33
    /// assert_eq!(Money::from_cents(1000).average_over(3), Some(Money::from_cents(333)));
    /// // $0.05 over 2 orders = $0.03 (half rounds up)
    /// assert_eq!(Money::from_cents(5).average_over(2), Some(Money::from_cents(3)));
    /// assert_eq!(Money::from_cents(1000).average_over(0), None);
    /// ```
    pub fn average_over(&self, count: i64) -> Option<Money> {
        if count <= 0 {
            return None;
        }

        // i128 keeps the doubled numerator from overflowing on huge sums
        let numerator = self.0 as i128 * 2;
        let denominator = count as i128 * 2;
        let half = count as i128;
        let rounded = if numerator >= 0 {
            (numerator + half) / denominator
        } else {
            (numerator - half) / denominator
        };

        Some(Money(rounded as i64))
    }

    /// Expresses `self` as a percentage of `base`.
    ///
    /// Returns `0.0` when `base` is not positive. A zero baseline therefore
    /// reads as "no change", which is the reporting policy for comparisons.
    ///
    /// ## Example
    /// ```rust
    /// use emporium_core::money::Money;
    ///
    /// let change = Money::from_cents(2500);
    /// assert_eq!(change.percentage_of(Money::from_cents(10000)), 25.0);
    /// assert_eq!(change.percentage_of(Money::zero()), 0.0);
    /// ```
    pub fn percentage_of(&self, base: Money) -> f64 {
        if !base.is_positive() {
            return 0.0;
        }
        self.0 as f64 / base.0 as f64 * 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs. The dashboard formats cents itself for localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money (range totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(100), Money::from_cents(250), Money::from_cents(1)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 351);

        let empty: Vec<Money> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_average_over_rounds_half_up() {
        assert_eq!(Money::from_cents(10000).average_over(1), Some(Money::from_cents(10000)));
        assert_eq!(Money::from_cents(1000).average_over(3), Some(Money::from_cents(333)));
        assert_eq!(Money::from_cents(2000).average_over(3), Some(Money::from_cents(667)));
        assert_eq!(Money::from_cents(-5).average_over(2), Some(Money::from_cents(-3)));
    }

    #[test]
    fn test_average_over_zero_count() {
        assert_eq!(Money::from_cents(1000).average_over(0), None);
        assert_eq!(Money::zero().average_over(-1), None);
    }

    #[test]
    fn test_percentage_of() {
        let base = Money::from_cents(20000);
        assert_eq!(Money::from_cents(5000).percentage_of(base), 25.0);
        assert_eq!(Money::from_cents(-10000).percentage_of(base), -50.0);
        assert_eq!(Money::from_cents(50000).percentage_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
    }
}
