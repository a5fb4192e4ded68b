//! # Breakdown Calculator
//!
//! Computes the labor / materials / visit-fee breakdown for a job.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Breakdown Calculation                               │
//! │                                                                         │
//! │  hours ──× hourly rate ──× zone multiplier ──► labor     (rounded once) │
//! │  sqft ───× sqft rate ────× zone multiplier ──► materials (rounded once) │
//! │  visits ─► (visits − 1) × $50 flat ──────────► visit fees (exact)       │
//! │                                                 │                       │
//! │  subtotal = labor + materials + visit fees ◄────┘                       │
//! │                                                                         │
//! │  The subtotal is the EXACT integer sum of the three terms - no          │
//! │  re-rounding, so quote and invoice always agree with the breakdown      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The visit fee is a flat trip surcharge: the zone multiplier applies to
//! labor and materials only. That asymmetry is intentional current behavior
//! (see [`crate::rates::RateBook::additional_visit_fee`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::rates::RateBook;
use crate::types::PricingInputs;

// =============================================================================
// Pricing Breakdown
// =============================================================================

/// The priced components of a job.
///
/// Invariant: `subtotal` is always the exact cent sum of the other three
/// fields. Identical inputs produce bit-identical breakdowns - everything
/// here is integer cents, so results can be compared with `==`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingBreakdown {
    /// Zone-adjusted labor charge.
    pub labor: Money,

    /// Zone-adjusted materials charge.
    pub materials: Money,

    /// Flat surcharge for visits beyond the first.
    pub visit_fees: Money,

    /// labor + materials + visit_fees, exactly.
    pub subtotal: Money,
}

/// Zeroed breakdown - what an invalid quote request reports.
impl Default for PricingBreakdown {
    fn default() -> Self {
        PricingBreakdown {
            labor: Money::zero(),
            materials: Money::zero(),
            visit_fees: Money::zero(),
            subtotal: Money::zero(),
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes the price breakdown for one set of job inputs.
///
/// Assumes the inputs already passed
/// [`crate::validation::validate_pricing_inputs`] - this function does not
/// re-validate (the caller owns that, exactly once, before pricing).
///
/// Labor and materials each take one terminal rounding of the full
/// `quantity × rate × multiplier` product; visit fees are exact integer
/// math; the subtotal is the exact sum of the three.
///
/// ## Example
/// ```rust
/// use sonora_pricing::breakdown::compute_breakdown;
/// use sonora_pricing::rates::RateBook;
/// use sonora_pricing::types::{PricingInputs, ProjectType, Zone};
///
/// let inputs = PricingInputs {
///     hours: 2.0,
///     sqft: 1000.0,
///     visits: 2,
///     zone: Zone::Commercial,
///     project_type: ProjectType::Installation,
/// };
///
/// let b = compute_breakdown(&inputs, &RateBook::default());
/// assert_eq!(b.labor.cents(), 15_600);      // 2h × $60 × 1.3
/// assert_eq!(b.materials.cents(), 650_000); // 1000 sqft × $5 × 1.3
/// assert_eq!(b.visit_fees.cents(), 5_000);  // 1 extra visit, flat $50
/// assert_eq!(b.subtotal.cents(), 670_600);
/// ```
pub fn compute_breakdown(inputs: &PricingInputs, rates: &RateBook) -> PricingBreakdown {
    let multiplier = rates.zone_multiplier(inputs.zone);
    let card = rates.rate_card(inputs.project_type);

    let labor = card.hourly_rate.price_quantity(inputs.hours, multiplier);
    let materials = card.material_rate.price_quantity(inputs.sqft, multiplier);

    // Flat trip surcharge: first visit carries no fee, zone multiplier
    // does not apply
    let extra_visits = (inputs.visits - 1).max(0);
    let visit_fees = rates.additional_visit_fee.multiply_quantity(extra_visits);

    let subtotal = labor + materials + visit_fees;

    PricingBreakdown {
        labor,
        materials,
        visit_fees,
        subtotal,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
