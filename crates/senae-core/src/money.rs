//! # Money Module
//!
//! Provides the `Money` type used at the edges of the engine.
//!
//! ## Floats Inside, Cents Outside
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The tariff formulas work on f64 amounts, exactly as declared:         │
//! │    tariff  = value × 0.10                                               │
//! │    iva     = (value + tariff) × 0.12                                    │
//! │                                                                         │
//! │  Rounding every intermediate step would compound error across items,   │
//! │  so per-item components keep full precision.                           │
//! │                                                                         │
//! │  Order totals are snapped to whole cents ONCE, at the end:             │
//! │    Money::from_amount(101.90000000000001) → 10190 cents → $101.90      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use senae_core::money::{round2, Money};
//!
//! let total = Money::from_amount(1236.999_999_999);
//! assert_eq!(total.cents(), 123700);
//! assert_eq!(total.to_string(), "$1237.00");
//!
//! // Weights are not money but share the 2-decimal policy
//! assert_eq!(round2(3.14159), 3.14);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: same representation the document store keeps
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Only built from rounded amounts**: `from_amount` is the one door in
///   from the float world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a currency amount to the nearest cent (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use senae_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(42.0).cents(), 4200);
    /// assert_eq!(Money::from_amount(0.125).cents(), 13);
    /// assert_eq!(Money::from_amount(-5.5).cents(), -550);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a currency amount (cents / 100).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
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
}

// =============================================================================
// Rounding Helpers
// =============================================================================

/// Rounds to two decimal places (half away from zero).
///
/// Used for totals that are not money (weights) and for money totals that
/// stay f64 on the wire.
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and the CLI summary line. The frontend formats amounts
/// itself.
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

// =============================================================================
// Unit Tests
// =============================================================================
