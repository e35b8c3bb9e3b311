//! Fixed-point monetary values and share quantities.
//!
//! Prices and cash are stored as scaled i64 to keep book-keeping exact;
//! floats appear only at model and reporting boundaries.

use derive_more::{Add, AddAssign, From, Into, Neg, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Fixed-point scale for Price and Cash types.
/// 10,000 = $1.00, 15,000 = $1.50, 100 = $0.01
pub const PRICE_SCALE: i64 = 10_000;

// =============================================================================
// Quantity
// =============================================================================

/// Number of shares (newtype for type safety).
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Quantity(pub u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    /// Get raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Check if zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Minimum of two quantities.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Quantity(self.0.min(other.0))
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qty({})", self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Allow `quantity == 50` comparisons
impl PartialEq<u64> for Quantity {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Price
// =============================================================================

/// Fixed-point price with 4 decimal places.
///
/// # Examples
/// - `Price(10000)` = $1.00
/// - `Price(100)` = $0.01
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    From,
    Into,
)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Smallest quotable increment ($0.01), also the price floor for
    /// trader-generated limit prices.
    pub const TICK: Price = Price(100);

    /// Create a Price from a floating-point value.
    #[inline]
    pub fn from_float(v: f64) -> Self {
        Self((v * PRICE_SCALE as f64).round() as i64)
    }

    /// Create a Price from a float, rounded to the nearest cent.
    #[inline]
    pub fn from_float_cents(v: f64) -> Self {
        Self((v * 100.0).round() as i64 * 100)
    }

    /// Round to the nearest cent (half away from zero).
    #[inline]
    pub fn round_to_cents(self) -> Self {
        let cents = if self.0 >= 0 {
            (self.0 + 50) / 100
        } else {
            -((-self.0 + 50) / 100)
        };
        Price(cents * 100)
    }

    /// Convert to floating-point for display/calculations.
    #[inline]
    pub fn to_float(self) -> f64 {
        self.0 as f64 / PRICE_SCALE as f64
    }

    /// Raw internal value.
    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Check if price is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price(${:.4})", self.to_float())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_float())
    }
}

// =============================================================================
// Cash
// =============================================================================

/// Fixed-point cash with 4 decimal places.
///
/// Semantically identical to Price but represents account balances.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Cash(pub i64);

impl Cash {
    pub const ZERO: Cash = Cash(0);

    /// Create Cash from a floating-point value.
    #[inline]
    pub fn from_float(v: f64) -> Self {
        Self((v * PRICE_SCALE as f64).round() as i64)
    }

    /// Convert to floating-point for display/calculations.
    #[inline]
    pub fn to_float(self) -> f64 {
        self.0 as f64 / PRICE_SCALE as f64
    }

    /// Raw internal value.
    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Check if cash is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Check if cash is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// How many whole shares this balance affords at the given price.
    /// Zero when the price is not positive.
    #[inline]
    pub fn affordable_at(self, price: Price) -> Quantity {
        if price.is_positive() && self.0 > 0 {
            Quantity((self.0 / price.0) as u64)
        } else {
            Quantity::ZERO
        }
    }
}

impl fmt::Debug for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cash(${:.4})", self.to_float())
    }
}

impl fmt::Display for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_float())
    }
}

// =============================================================================
// Price-Quantity Operations
// =============================================================================

impl Mul<Quantity> for Price {
    type Output = Cash;

    /// Multiply price by quantity to get total cash value.
    fn mul(self, qty: Quantity) -> Cash {
        Cash(self.0 * qty.0 as i64)
    }
}

impl Mul<Price> for Quantity {
    type Output = Cash;

    fn mul(self, price: Price) -> Cash {
        Cash(price.0 * self.0 as i64)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_from_float() {
        assert_eq!(Price::from_float(1.0), Price(10_000));
        assert_eq!(Price::from_float(0.01), Price(100));
        assert_eq!(Price::from_float(100.0), Price(1_000_000));
    }

    #[test]
    fn price_rounds_to_cents() {
        assert_eq!(Price::from_float(99.994).round_to_cents(), Price::from_float(99.99));
        assert_eq!(Price::from_float(99.996).round_to_cents(), Price::from_float(100.0));
        assert_eq!(Price::from_float_cents(100.0049), Price::from_float(100.0));
        assert_eq!(Price::from_float_cents(100.005), Price::from_float(100.01));
    }

    #[test]
    fn price_tick_is_one_cent() {
        assert_eq!(Price::TICK.to_float(), 0.01);
    }

    #[test]
    fn price_quantity_multiplication() {
        let total = Price::from_float(50.0) * Quantity(100);
        assert_eq!(total.to_float(), 5000.0);
    }

    #[test]
    fn cash_affordable_at() {
        let cash = Cash::from_float(1000.0);
        assert_eq!(cash.affordable_at(Price::from_float(99.5)), Quantity(10));
        assert_eq!(cash.affordable_at(Price::ZERO), Quantity::ZERO);
        assert_eq!(Cash::from_float(-5.0).affordable_at(Price::TICK), Quantity::ZERO);
    }

    #[test]
    fn cash_arithmetic() {
        let c1 = Cash::from_float(1000.0);
        let c2 = Cash::from_float(250.0);
        assert_eq!((c1 - c2).to_float(), 750.0);
        assert!(c1.is_positive());
        assert!(!c1.is_negative());
    }
}
