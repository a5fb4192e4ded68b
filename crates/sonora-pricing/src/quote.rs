//! # Quote Range Estimator
//!
//! Turns a job breakdown into a min/max estimate band for a prospective
//! client, and defines the stored quote record with its lifecycle.
//!
//! ## The Estimate Band
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quote Range                                        │
//! │                                                                         │
//! │  subtotal ──×0.85──► minTotal ┐                                         │
//! │           ──×1.15──► maxTotal ┼──► "Estimated: $1776.50 - $2403.50"    │
//! │                               ┘                                         │
//! │                                                                         │
//! │  The ±15% band communicates estimate uncertainty before a supervisor   │
//! │  walks the site. Quotes are informal and PRE-TAX - tax appears only    │
//! │  on the invoice ([`crate::invoice`]).                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quote Lifecycle
//! ```text
//! Pending ──► Sent ──► Accepted ──► (invoiced)
//!    │          ├────► Declined
//!    └──────────┴────► Expired
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::breakdown::{compute_breakdown, PricingBreakdown};
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::rates::{Rate, RateBook};
use crate::types::{PricingInputs, ProjectType, Zone};
use crate::validation::validate_pricing_inputs;
use crate::{QUOTE_BAND_HIGH_BPS, QUOTE_BAND_LOW_BPS};

// =============================================================================
// Quote Range
// =============================================================================

/// A min/max estimate band with the breakdown it was derived from.
///
/// When `valid` is false the numbers are all zero and `errors` carries the
/// user-facing messages - the quote form renders those inline and the caller
/// must not treat the zeros as a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteRange {
    /// Low end of the estimate (subtotal × 0.85).
    pub min_total: Money,

    /// High end of the estimate (subtotal × 1.15).
    pub max_total: Money,

    /// The breakdown the band was computed from (zeroed when invalid).
    pub breakdown: PricingBreakdown,

    /// True exactly when `errors` is empty.
    pub valid: bool,

    /// User-facing validation messages, field order.
    pub errors: Vec<String>,
}

/// Validates the inputs and computes the estimate band.
///
/// Out-of-range numbers are not an error here: they come back as a
/// `valid: false` result with messages, because the quote form recomputes
/// on every field change and needs something renderable either way.
/// (Unknown project type / zone strings never reach this function - they
/// fail fast at parse time in the engine facade.)
///
/// ## Example
/// ```rust
/// use sonora_pricing::quote::calculate_quote_range;
/// use sonora_pricing::rates::RateBook;
/// use sonora_pricing::types::{PricingInputs, ProjectType, Zone};
///
/// let inputs = PricingInputs {
///     hours: 2.0,
///     sqft: 1000.0,
///     visits: 1,
///     zone: Zone::Residential,
///     project_type: ProjectType::Maintenance,
/// };
///
/// // Subtotal $2090.00 → band $1776.50 - $2403.50
/// let range = calculate_quote_range(&inputs, &RateBook::default());
/// assert!(range.valid);
/// assert_eq!(range.min_total.cents(), 177_650);
/// assert_eq!(range.max_total.cents(), 240_350);
/// ```
pub fn calculate_quote_range(inputs: &PricingInputs, rates: &RateBook) -> QuoteRange {
    let report = validate_pricing_inputs(inputs.hours, inputs.sqft, inputs.visits);
    if !report.valid {
        return QuoteRange {
            min_total: Money::zero(),
            max_total: Money::zero(),
            breakdown: PricingBreakdown::default(),
            valid: false,
            errors: report.errors,
        };
    }

    let breakdown = compute_breakdown(inputs, rates);
    let min_total = breakdown
        .subtotal
        .scaled_by(Rate::from_bps(QUOTE_BAND_LOW_BPS));
    let max_total = breakdown
        .subtotal
        .scaled_by(Rate::from_bps(QUOTE_BAND_HIGH_BPS));

    QuoteRange {
        min_total,
        max_total,
        breakdown,
        valid: true,
        errors: Vec::new(),
    }
}

// =============================================================================
// Quote Status
// =============================================================================

/// Lifecycle state of a stored quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Created from the form, not yet sent to the client.
    Pending,
    /// Delivered to the client, awaiting a decision.
    Sent,
    /// Client accepted - ready to invoice.
    Accepted,
    /// Client declined.
    Declined,
    /// Validity window lapsed before a decision.
    Expired,
}

impl QuoteStatus {
    /// The wire/storage key for this status (matches the serde tag).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Declined => "declined",
            QuoteStatus::Expired => "expired",
        }
    }

    /// Terminal states allow no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            QuoteStatus::Accepted | QuoteStatus::Declined | QuoteStatus::Expired
        )
    }

    /// Whether a quote may move from this status to `next`.
    ///
    /// A decision (accept/decline) requires the quote to have been sent;
    /// expiry can strike any open quote.
    pub const fn can_transition_to(&self, next: QuoteStatus) -> bool {
        matches!(
            (*self, next),
            (QuoteStatus::Pending, QuoteStatus::Sent)
                | (QuoteStatus::Pending, QuoteStatus::Expired)
                | (QuoteStatus::Sent, QuoteStatus::Accepted)
                | (QuoteStatus::Sent, QuoteStatus::Declined)
                | (QuoteStatus::Sent, QuoteStatus::Expired)
        )
    }
}

impl Default for QuoteStatus {
    fn default() -> Self {
        QuoteStatus::Pending
    }
}

// =============================================================================
// Quote Record
// =============================================================================

/// A stored quote, built by the engine facade from a quote request.
///
/// Uses the snapshot pattern: inputs, breakdown, and band are frozen at
/// estimate time, so later rate changes never rewrite an outstanding quote.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quote {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable quote number (date-stamped, shown to the client).
    pub quote_number: String,

    /// Who requested the quote.
    pub customer_name: String,

    /// Optional display label from the quote form (passthrough).
    pub service_name: Option<String>,

    /// Free-form extra form fields as a JSON string (passthrough for the
    /// admin screen; this engine never interprets them).
    pub extras: Option<String>,

    pub project_type: ProjectType,
    pub zone: Zone,

    /// Input snapshot (frozen at estimate time).
    pub hours: f64,
    pub sqft: f64,
    pub visits: i64,

    pub status: QuoteStatus,

    /// Breakdown snapshot (frozen at estimate time).
    pub labor_cents: i64,
    pub materials_cents: i64,
    pub visit_fees_cents: i64,
    pub subtotal_cents: i64,

    /// Estimate band snapshot.
    pub min_total_cents: i64,
    pub max_total_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// After this instant the quote should be re-estimated, not accepted.
    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,
}

impl Quote {
    /// Returns the low end of the estimate band as Money.
    #[inline]
    pub fn min_total(&self) -> Money {
        Money::from_cents(self.min_total_cents)
    }

    /// Returns the high end of the estimate band as Money.
    #[inline]
    pub fn max_total(&self) -> Money {
        Money::from_cents(self.max_total_cents)
    }

    /// Returns the pre-tax subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Reconstructs the frozen breakdown snapshot.
    pub fn breakdown(&self) -> PricingBreakdown {
        PricingBreakdown {
            labor: Money::from_cents(self.labor_cents),
            materials: Money::from_cents(self.materials_cents),
            visit_fees: Money::from_cents(self.visit_fees_cents),
            subtotal: Money::from_cents(self.subtotal_cents),
        }
    }

    /// Whether the validity window has lapsed at `now`.
    ///
    /// Takes the clock reading as a parameter so the check stays pure.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Moves the quote to `next`, enforcing the lifecycle.
    ///
    /// ## Example
    /// ```text
    /// Pending ──mark sent──► Sent ──client accepts──► Accepted
    /// ```
    pub fn transition_to(&mut self, next: QuoteStatus) -> PricingResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(PricingError::InvalidQuoteStatus {
                quote_id: self.id.clone(),
                current_status: self.status.as_str().to_string(),
            });
        }

        self.status = next;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn inputs(hours: f64, sqft: f64, visits: i64) -> PricingInputs {
        PricingInputs {
            hours,
            sqft,
            visits,
            zone: Zone::Residential,
            project_type: ProjectType::Maintenance,
        }
    }

    fn fixture_quote(status: QuoteStatus) -> Quote {
        let now = Utc::now();
        Quote {
            id: "8e7f6a2c-0000-0000-0000-000000000001".to_string(),
            quote_number: "Q-250823-101500-0042".to_string(),
            customer_name: "Maria Lopez".to_string(),
            service_name: Some("Spring cleanup".to_string()),
            extras: None,
            project_type: ProjectType::Maintenance,
            zone: Zone::Residential,
            hours: 2.0,
            sqft: 1000.0,
            visits: 1,
            status,
            labor_cents: 9_000,
            materials_cents: 200_000,
            visit_fees_cents: 0,
            subtotal_cents: 209_000,
            min_total_cents: 177_650,
            max_total_cents: 240_350,
            created_at: now,
            expires_at: now + Duration::days(30),
        }
    }

    #[test]
    fn test_quote_range_residential_example() {
        let range = calculate_quote_range(&inputs(2.0, 1000.0, 1), &RateBook::default());

        assert!(range.valid);
        assert!(range.errors.is_empty());
        assert_eq!(range.breakdown.subtotal.cents(), 209_000);
        assert_eq!(range.min_total.cents(), 177_650); // $2090 × 0.85
        assert_eq!(range.max_total.cents(), 240_350); // $2090 × 1.15
    }

    #[test]
    fn test_quote_range_invalid_inputs_is_zeroed() {
        let range = calculate_quote_range(&inputs(201.0, 1000.0, 1), &RateBook::default());

        assert!(!range.valid);
        assert_eq!(
            range.errors,
            vec!["Hours must be between 0 and 200".to_string()]
        );
        assert_eq!(range.breakdown, PricingBreakdown::default());
        assert_eq!(range.min_total, Money::zero());
        assert_eq!(range.max_total, Money::zero());
    }

    #[test]
    fn test_min_never_exceeds_max() {
        let rates = RateBook::default();
        let cases = [
            inputs(0.0, 0.0, 1),
            inputs(0.5, 12.25, 3),
            inputs(200.0, 100_000.0, 50),
        ];

        for case in cases {
            let range = calculate_quote_range(&case, &rates);
            assert!(range.valid);
            assert!(range.min_total <= range.max_total);
        }
    }

    #[test]
    fn test_status_transition_matrix() {
        use QuoteStatus::*;

        assert!(Pending.can_transition_to(Sent));
        assert!(Pending.can_transition_to(Expired));
        assert!(Sent.can_transition_to(Accepted));
        assert!(Sent.can_transition_to(Declined));
        assert!(Sent.can_transition_to(Expired));

        // A decision requires the quote to have been sent
        assert!(!Pending.can_transition_to(Accepted));
        assert!(!Pending.can_transition_to(Declined));

        // Terminal states are final
        assert!(!Accepted.can_transition_to(Sent));
        assert!(!Declined.can_transition_to(Sent));
        assert!(!Expired.can_transition_to(Sent));
        assert!(Accepted.is_terminal());
        assert!(!Sent.is_terminal());
    }

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(QuoteStatus::default(), QuoteStatus::Pending);
    }

    #[test]
    fn test_transition_to_enforces_lifecycle() {
        let mut quote = fixture_quote(QuoteStatus::Pending);

        quote.transition_to(QuoteStatus::Sent).unwrap();
        quote.transition_to(QuoteStatus::Accepted).unwrap();
        assert_eq!(quote.status, QuoteStatus::Accepted);

        let err = quote.transition_to(QuoteStatus::Declined).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidQuoteStatus { ref current_status, .. }
                if current_status == "accepted"
        ));
    }

    #[test]
    fn test_is_expired() {
        let quote = fixture_quote(QuoteStatus::Sent);

        assert!(!quote.is_expired(quote.created_at));
        assert!(!quote.is_expired(quote.expires_at)); // inclusive last instant
        assert!(quote.is_expired(quote.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_breakdown_snapshot_round_trip() {
        let quote = fixture_quote(QuoteStatus::Pending);
        let b = quote.breakdown();

        assert_eq!(b.labor.cents(), 9_000);
        assert_eq!(b.materials.cents(), 200_000);
        assert_eq!(b.visit_fees.cents(), 0);
        assert_eq!(b.subtotal, b.labor + b.materials + b.visit_fees);
    }
}
