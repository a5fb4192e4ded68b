//! # Rate Tables
//!
//! Billing rates and multipliers for the pricing engine.
//!
//! ## The Business Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Standard Rate Book                               │
//! │                                                                         │
//! │  Project type     Hourly labor      Materials per sqft                  │
//! │  ─────────────    ────────────      ─────────────────                   │
//! │  maintenance         $45                  $2                            │
//! │  installation        $60                  $5                            │
//! │  repair              $75                  $8                            │
//! │                                                                         │
//! │  Zone             Multiplier                                            │
//! │  ─────────────    ──────────                                            │
//! │  residential         ×1.0                                               │
//! │  commercial          ×1.3                                               │
//! │                                                                         │
//! │  Additional visit fee: $50 flat per visit beyond the first              │
//! │  (never zone-scaled - see RateBook::additional_visit_fee)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups match exhaustively on the closed [`ProjectType`]/[`Zone`] enums,
//! so every key has an entry by construction - there is no missing-key path
//! and no fallback rate.
//!
//! The calculators take a `&RateBook` parameter instead of reaching for a
//! global, so tests can run against fixture rates and a future settings
//! screen can supply tenant-specific tables.
//!
//! ## Usage
//! ```rust
//! use sonora_pricing::rates::RateBook;
//! use sonora_pricing::types::{ProjectType, Zone};
//!
//! let rates = RateBook::default();
//! let card = rates.rate_card(ProjectType::Repair);
//! assert_eq!(card.hourly_rate.cents(), 7500); // $75/h
//!
//! let multiplier = rates.zone_multiplier(Zone::Commercial);
//! assert_eq!(multiplier.bps(), 13_000); // ×1.3
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{ProjectType, Zone};
use crate::ADDITIONAL_VISIT_FEE_CENTS;

// =============================================================================
// Rate
// =============================================================================

/// A rate or multiplier represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 860 bps = 8.6% (Phoenix, AZ sales tax)
/// 13000 bps = ×1.3 (commercial zone multiplier)
///
/// One representation covers both "percent of" rates (tax, quote band) and
/// "scale by" multipliers (zones), and keeps [`Money::scaled_by`] in pure
/// integer math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    ///
    /// ## Example
    /// ```rust
    /// use sonora_pricing::rates::Rate;
    ///
    /// assert_eq!(Rate::from_percentage(8.6).bps(), 860);
    /// ```
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// The identity multiplier (×1.0, 10000 bps).
    #[inline]
    pub const fn unity() -> Self {
        Rate(10_000)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the rate as a plain scale factor (13000 bps → 1.3).
    ///
    /// Used for measured-quantity math in [`Money::price_quantity`], where
    /// the quantity is already fractional. Integer-cent amounts should use
    /// [`Money::scaled_by`] instead.
    #[inline]
    pub fn factor(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Rate Card
// =============================================================================

/// Billing rates for a single project type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateCard {
    /// Labor rate per hour.
    pub hourly_rate: Money,

    /// Material rate per square foot of service area.
    pub material_rate: Money,
}

// =============================================================================
// Rate Book
// =============================================================================

/// The full set of rates the pricing engine works from: one card per project
/// type, one multiplier per zone, and the flat additional-visit fee.
///
/// `Default` yields the standard business tables shown in the module docs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateBook {
    pub maintenance: RateCard,
    pub installation: RateCard,
    pub repair: RateCard,

    /// Residential zone multiplier (×1.0).
    pub residential_multiplier: Rate,

    /// Commercial zone multiplier (×1.3).
    pub commercial_multiplier: Rate,

    /// Flat fee per visit beyond the first. Deliberately NOT scaled by the
    /// zone multiplier - it is a trip surcharge, not priced work.
    pub additional_visit_fee: Money,
}

impl RateBook {
    /// Looks up the rate card for a project type.
    ///
    /// Total by construction: the match is exhaustive over the closed enum.
    #[inline]
    pub const fn rate_card(&self, project_type: ProjectType) -> RateCard {
        match project_type {
            ProjectType::Maintenance => self.maintenance,
            ProjectType::Installation => self.installation,
            ProjectType::Repair => self.repair,
        }
    }

    /// Looks up the price multiplier for a service zone.
    #[inline]
    pub const fn zone_multiplier(&self, zone: Zone) -> Rate {
        match zone {
            Zone::Residential => self.residential_multiplier,
            Zone::Commercial => self.commercial_multiplier,
        }
    }
}

impl Default for RateBook {
    /// Returns the standard business rate tables.
    fn default() -> Self {
        RateBook {
            maintenance: RateCard {
                hourly_rate: Money::from_cents(4500),
                material_rate: Money::from_cents(200),
            },
            installation: RateCard {
                hourly_rate: Money::from_cents(6000),
                material_rate: Money::from_cents(500),
            },
            repair: RateCard {
                hourly_rate: Money::from_cents(7500),
                material_rate: Money::from_cents(800),
            },
            residential_multiplier: Rate::unity(),
            commercial_multiplier: Rate::from_bps(13_000),
            additional_visit_fee: Money::from_cents(ADDITIONAL_VISIT_FEE_CENTS),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(860);
        assert_eq!(rate.bps(), 860);
        assert!((rate.percentage() - 8.6).abs() < 0.001);
    }

    #[test]
    fn test_rate_from_percentage() {
        assert_eq!(Rate::from_percentage(8.6).bps(), 860);
        assert_eq!(Rate::from_percentage(0.0).bps(), 0);
    }

    #[test]
    fn test_rate_factor() {
        assert!((Rate::from_bps(13_000).factor() - 1.3).abs() < 1e-12);
        assert_eq!(Rate::unity().factor(), 1.0);
    }

    #[test]
    fn test_rate_zero() {
        assert!(Rate::zero().is_zero());
        assert!(!Rate::unity().is_zero());
    }

    #[test]
    fn test_default_rate_book_tables() {
        let rates = RateBook::default();

        assert_eq!(rates.maintenance.hourly_rate.cents(), 4500);
        assert_eq!(rates.maintenance.material_rate.cents(), 200);
        assert_eq!(rates.installation.hourly_rate.cents(), 6000);
        assert_eq!(rates.installation.material_rate.cents(), 500);
        assert_eq!(rates.repair.hourly_rate.cents(), 7500);
        assert_eq!(rates.repair.material_rate.cents(), 800);

        assert_eq!(rates.residential_multiplier.bps(), 10_000);
        assert_eq!(rates.commercial_multiplier.bps(), 13_000);
        assert_eq!(rates.additional_visit_fee.cents(), 5000);
    }

    #[test]
    fn test_rate_card_lookup_matches_table() {
        let rates = RateBook::default();

        assert_eq!(
            rates.rate_card(ProjectType::Maintenance).hourly_rate.cents(),
            4500
        );
        assert_eq!(
            rates.rate_card(ProjectType::Installation).material_rate.cents(),
            500
        );
        assert_eq!(rates.rate_card(ProjectType::Repair).hourly_rate.cents(), 7500);
    }

    #[test]
    fn test_zone_multiplier_lookup() {
        let rates = RateBook::default();

        assert_eq!(rates.zone_multiplier(Zone::Residential), Rate::unity());
        assert_eq!(
            rates.zone_multiplier(Zone::Commercial),
            Rate::from_bps(13_000)
        );
    }
}
