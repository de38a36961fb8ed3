//! # Money Module
//!
//! Provides the `Money` type for CHF amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float line totals:                                             │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A cart at exactly the CHF threshold could then miss it by 1e-14.       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centimes                                         │
//! │    Host amounts are rounded to the centime ONCE, at the adapter.        │
//! │    Totals and threshold comparisons are exact from there on.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use franco_core::money::Money;
//!
//! let line = Money::from_cents(16000); // CHF 160.00
//! let total = line + Money::from_decimal(90.0);
//! assert_eq!(total.to_decimal_string(), "250.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A CHF amount in centimes (1/100 franc).
///
/// ## Where Money is Used
/// ```text
/// host line_total (f64 / "12.50") ──► CartItem.line_total ──► CartAnalysis.total
///                                                                   │
/// Thresholds.chf ──────────────────────────────► chf_met / remaining_chf
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centimes.
    ///
    /// ## Example
    /// ```rust
    /// use franco_core::money::Money;
    ///
    /// let price = Money::from_cents(1250); // CHF 12.50
    /// assert_eq!(price.cents(), 1250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a host-supplied decimal amount, rounding to the nearest
    /// centime (half away from zero). NaN and infinities become zero.
    ///
    /// This is the ONLY float entry point and is meant for the host adapter
    /// boundary, where the platform hands over `line_total` as a float.
    ///
    /// ## Example
    /// ```rust
    /// use franco_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(33.333).cents(), 3333);
    /// assert_eq!(Money::from_decimal(0.005).cents(), 1);
    /// assert_eq!(Money::from_decimal(f64::NAN).cents(), 0);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        if !value.is_finite() {
            return Money::zero();
        }
        Money((value * 100.0).round() as i64)
    }

    /// Parses a decimal string such as `"120"`, `"120.5"` or `" 80.00 "`.
    ///
    /// ## Example
    /// ```rust
    /// use franco_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("120.5").unwrap().cents(), 12050);
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        let value: f64 = trimmed.parse().map_err(|_| CoreError::InvalidAmount {
            input: input.to_string(),
            reason: "not a decimal number".to_string(),
        })?;

        if !value.is_finite() {
            return Err(CoreError::InvalidAmount {
                input: input.to_string(),
                reason: "not a finite number".to_string(),
            });
        }

        Ok(Money::from_decimal(value))
    }

    /// Returns the value in centimes.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-franc portion.
    #[inline]
    pub const fn francs(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centime portion (always 0-99).
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

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// How much is still missing to reach `target`; never negative.
    ///
    /// ## Example
    /// ```rust
    /// use franco_core::money::Money;
    ///
    /// let total = Money::from_cents(9000);
    /// assert_eq!(total.shortfall_to(Money::from_cents(12000)).cents(), 3000);
    /// assert_eq!(total.shortfall_to(Money::from_cents(8000)).cents(), 0);
    /// ```
    #[inline]
    pub fn shortfall_to(&self, target: Money) -> Money {
        Money(target.0.saturating_sub(self.0).max(0))
    }

    /// Plain decimal rendering with `.` separator and two decimals, no
    /// currency code and no thousands separator: `1234.50`.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.francs().abs(), self.cents_part())
    }

    /// Returns the value as a float, for display arithmetic only.
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates at the i64 bounds: host amounts are unbounded floats.

/// `CHF 12.50`. For logs; customer-facing text goes through
/// [`Money::to_decimal_string`] and the localized templates.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CHF {}", self.to_decimal_string())
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

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
        assert_eq!(money.francs(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_centime() {
        assert_eq!(Money::from_decimal(160.0).cents(), 16000);
        assert_eq!(Money::from_decimal(19.999).cents(), 2000);
        assert_eq!(Money::from_decimal(-2.5).cents(), -250);
        assert_eq!(Money::from_decimal(f64::INFINITY).cents(), 0);
    }

    #[test]
    fn test_float_sum_lands_exactly_on_threshold() {
        // 0.1 + 0.2 style drift disappears once each line is in centimes
        let total: Money = [0.1, 0.2].iter().map(|v| Money::from_decimal(*v)).sum();
        assert_eq!(total, Money::from_cents(30));
        assert!(total >= Money::parse_decimal("0.30").unwrap());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("80").unwrap().cents(), 8000);
        assert_eq!(Money::parse_decimal(" 120.00 ").unwrap().cents(), 12000);
        assert_eq!(Money::parse_decimal("0.5").unwrap().cents(), 50);
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal("12,50").is_err());
        assert!(Money::parse_decimal("inf").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(25000)), "CHF 250.00");
        assert_eq!(format!("{}", Money::from_cents(5)), "CHF 0.05");
        assert_eq!(format!("{}", Money::from_cents(-550)), "CHF -5.50");
    }

    #[test]
    fn test_decimal_string_has_no_thousands_separator() {
        assert_eq!(Money::from_cents(123456789).to_decimal_string(), "1234567.89");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_cents(100);
        assert_eq!(c.cents(), 1400);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);

        let mut c = max;
        c += max;
        assert_eq!(c, max);
        c = min;
        c -= max;
        assert_eq!(c, min);

        assert_eq!(min.shortfall_to(max), max);
    }

    #[test]
    fn test_shortfall_never_negative() {
        let total = Money::from_cents(25000);
        assert_eq!(total.shortfall_to(Money::from_cents(40000)).cents(), 15000);
        assert!(total.shortfall_to(Money::from_cents(10000)).is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }
}
