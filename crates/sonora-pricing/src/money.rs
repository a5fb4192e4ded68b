//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a quoting system that means:                                        │
//! │    labor + materials + fees ≠ subtotal by a stray fraction of a cent,  │
//! │    and the invoice no longer matches the quote it came from             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every stored amount is i64 cents. Measured quantities (hours, sqft) │
//! │    are the ONLY floats, they enter through ONE audited boundary         │
//! │    (price_quantity), and they are rounded exactly once                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sonora_pricing::money::Money;
//!
//! // Create from cents (preferred)
//! let fee = Money::from_cents(5000); // $50.00
//!
//! // Arithmetic operations
//! let doubled = fee * 2;                      // $100.00
//! let total = fee + Money::from_cents(2500);  // $75.00
//! assert_eq!(total.cents(), 7500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::rates::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credits and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  RateCard.hourly_rate ──► labor ──┐                                    │
/// │  RateCard.material_rate ──► materials ──┼──► subtotal                  │
/// │  RateBook.additional_visit_fee ──► visit fees ──┘                      │
/// │                                                                         │
/// │  subtotal ──► quote band (min/max) ──► Quote record                    │
/// │  subtotal ──► sales tax ──► invoice total ──► payments                 │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
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
    /// use sonora_pricing::money::Money;
    ///
    /// let fee = Money::from_cents(5000); // Represents $50.00
    /// assert_eq!(fee.cents(), 5000);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Storage, calculations, and the API all use cents.
    /// Only the UI converts to dollars for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use sonora_pricing::money::Money;
    ///
    /// let hourly = Money::from_major_minor(45, 0); // $45.00
    /// assert_eq!(hourly.cents(), 4500);
    ///
    /// let credit = Money::from_major_minor(-5, 50); // -$5.50 (correction)
    /// assert_eq!(credit.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use sonora_pricing::money::Money;
    ///
    /// let subtotal = Money::from_cents(209_000);
    /// assert_eq!(subtotal.dollars(), 2090);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use sonora_pricing::money::Money;
    ///
    /// let amount = Money::from_cents(17_974);
    /// assert_eq!(amount.cents_part(), 74);
    ///
    /// let negative = Money::from_cents(-550);
    /// assert_eq!(negative.cents_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use sonora_pricing::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.cents(), 0);
    /// assert!(zero.is_zero());
    /// ```
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

    /// Scales this amount by a basis-point rate, rounding half away from zero.
    ///
    /// This is the single scaling primitive for every rate application in the
    /// system: the quote band (×0.85 / ×1.15) and the invoice sales tax both
    /// go through here.
    ///
    /// ## Implementation
    /// We use integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5), so half-cent results
    /// round up - standard currency rounding for the non-negative amounts
    /// this engine produces.
    ///
    /// ## Example
    /// ```rust
    /// use sonora_pricing::money::Money;
    /// use sonora_pricing::rates::Rate;
    ///
    /// let subtotal = Money::from_cents(209_000); // $2090.00
    ///
    /// // Sales tax at 8.6%: $2090.00 × 0.086 = $179.74
    /// let tax = subtotal.scaled_by(Rate::from_bps(860));
    /// assert_eq!(tax.cents(), 17_974);
    ///
    /// // Low end of the quote band: $2090.00 × 0.85 = $1776.50
    /// let low = subtotal.scaled_by(Rate::from_bps(8_500));
    /// assert_eq!(low.cents(), 177_650);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Subtotal: $2090.00
    ///      │
    ///      ├──► scaled_by(8.6%)  ──► Tax: $179.74  ──► Invoice: $2269.74
    ///      │
    ///      └──► scaled_by(85%) / scaled_by(115%) ──► Quote: $1776.50-$2403.50
    /// ```
    pub fn scaled_by(&self, rate: Rate) -> Money {
        // Use i128 to prevent overflow on large amounts
        // rate.bps() is basis points: 860 = 8.6%
        // Formula: amount_cents * bps / 10000
        // With rounding: (amount_cents * bps + 5000) / 10000
        let scaled_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(scaled_cents as i64)
    }

    /// Prices a fractional measured quantity at this per-unit rate, adjusted
    /// by a zone multiplier, rounding to whole cents exactly once.
    ///
    /// This is the ONLY place floating point touches money. Hours and square
    /// footage come off the quote form as fractional numbers; the full
    /// product `rate × quantity × multiplier` is computed in f64 and rounded
    /// at the end. Rounding intermediate terms separately would drift the
    /// result by a cent on half-way products, so don't chain this with
    /// [`Money::scaled_by`].
    ///
    /// ## Example
    /// ```rust
    /// use sonora_pricing::money::Money;
    /// use sonora_pricing::rates::Rate;
    ///
    /// let hourly = Money::from_cents(4500); // $45.00/h
    ///
    /// // 2 hours in a commercial zone (×1.3): 45 × 2 × 1.3 = $117.00
    /// let labor = hourly.price_quantity(2.0, Rate::from_bps(13_000));
    /// assert_eq!(labor.cents(), 11_700);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Form input: hours = 2, zone = commercial
    ///      │
    ///      ▼
    /// hourly_rate.price_quantity(2.0, ×1.3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Labor: $117.00
    /// ```
    pub fn price_quantity(&self, quantity: f64, multiplier: Rate) -> Money {
        // One rounding at the end - f64::round is half away from zero,
        // matching standard currency rounding
        let raw_cents = self.0 as f64 * quantity * multiplier.factor();
        Money(raw_cents.round() as i64)
    }

    /// Multiplies money by a whole-number quantity.
    ///
    /// ## Example
    /// ```rust
    /// use sonora_pricing::money::Money;
    ///
    /// let visit_fee = Money::from_cents(5000); // $50.00 per extra visit
    /// let fees = visit_fee.multiply_quantity(2);
    /// assert_eq!(fees.cents(), 10_000); // $100.00
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Visits: 3 (first visit carries no fee)
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Visit fees: $100.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log output. Use frontend formatting for actual
/// UI display to handle localization properly.
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

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for small fixed counts).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64 (for visit counts).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
