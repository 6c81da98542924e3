//! # Money Module
//!
//! The `Money` type: rupee amounts held as integer paise.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: integer paise                                        │
//! │    ₹10.00 is 1000 paise; every sum and product is exact.            │
//! │    Tax is the only place rounding happens, and it happens once      │
//! │    per line at the half-paise, never inside a running total.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kirana_core::money::Money;
//!
//! let price = Money::from_paise(1099); // ₹10.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.paise(), 3297);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::TaxRate;

/// A monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: change-due math subtracts before clamping
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **Serde transparent via derive**: serializes as a bare integer
///
/// Every amount in the system - catalog price, line total, tender,
/// change - flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps a negative value to zero.
    ///
    /// Change due is `tendered - total` floored at zero; the shortfall
    /// case is decided by [`crate::payment::TenderPolicy`], not here.
    #[inline]
    pub const fn clamp_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Calculates tax on this amount.
    ///
    /// Integer math with rounding at the half-paise:
    /// `(amount * bps + 5000) / 10000`, computed in i128 so large line
    /// totals cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    /// use kirana_core::types::TaxRate;
    ///
    /// // ₹200.00 at 18% GST = ₹36.00
    /// let line = Money::from_paise(20000);
    /// assert_eq!(line.tax(TaxRate::from_bps(1800)).paise(), 3600);
    /// ```
    pub fn tax(&self, rate: TaxRate) -> Money {
        let tax_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax_paise as i64)
    }

    /// Multiplies a unit price by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Debug-friendly rupee formatting (`₹10.99`).
///
/// Receipts use this directly; there is no localization layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(300).paise(), 30000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!(a.multiply_quantity(3).paise(), 3000);
    }

    #[test]
    fn test_tax_basic() {
        // ₹10.00 at 10% = ₹1.00
        let amount = Money::from_paise(1000);
        assert_eq!(amount.tax(TaxRate::from_bps(1000)).paise(), 100);
    }

    #[test]
    fn test_tax_zero_rate() {
        let amount = Money::from_paise(12345);
        assert_eq!(amount.tax(TaxRate::zero()).paise(), 0);
    }

    #[test]
    fn test_tax_with_rounding() {
        // ₹10.00 at 8.25% = ₹0.825 → ₹0.83
        let amount = Money::from_paise(1000);
        assert_eq!(amount.tax(TaxRate::from_bps(825)).paise(), 83);
    }

    /// The reference line from the checkout flow: ₹100.00 × 2 at 18% GST
    /// must come to exactly ₹236.00.
    #[test]
    fn test_reference_line_total() {
        let unit = Money::from_paise(10000);
        let subtotal = unit.multiply_quantity(2);
        let tax = subtotal.tax(TaxRate::from_bps(1800));
        assert_eq!(subtotal.paise(), 20000);
        assert_eq!(tax.paise(), 3600);
        assert_eq!((subtotal + tax).paise(), 23600);
    }

    #[test]
    fn test_clamp_zero() {
        assert_eq!(Money::from_paise(-6400).clamp_zero().paise(), 0);
        assert_eq!(Money::from_paise(6400).clamp_zero().paise(), 6400);
    }
}
