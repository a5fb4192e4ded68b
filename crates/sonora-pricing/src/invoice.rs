//! # Invoice Math
//!
//! Turns an accepted quote's breakdown into an invoice: line items, sales
//! tax, running payments, and the paid/void lifecycle.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Invoice Pipeline                                   │
//! │                                                                         │
//! │  breakdown ──► lines (zero rows omitted)                                │
//! │  subtotal  ──► + tax (8.6%) ──► total                                   │
//! │  payments  ──► amount_paid ──► balance_due (clamped at $0.00)          │
//! │                                   │                                     │
//! │                                   └── $0.00 ──► status = Paid          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax applies here and only here - quotes are informal pre-tax estimates.
//!
//! ## Invoice Lifecycle
//! ```text
//! Draft ──► Sent ──► Paid
//!   │         │
//!   └─────────┴────► Void
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::breakdown::PricingBreakdown;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::rates::Rate;
use crate::validation::validate_payment_amount;

// =============================================================================
// Totals
// =============================================================================

/// Subtotal, tax, and grand total for one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Computes tax on the subtotal and the grand total.
///
/// Tax rounds half-up on the half cent, so `total` can differ by one cent
/// from a float rendition - the cent value here is the authoritative one.
///
/// ## Example
/// ```rust
/// use sonora_pricing::invoice::calculate_invoice_totals;
/// use sonora_pricing::money::Money;
/// use sonora_pricing::rates::Rate;
///
/// // $2090.00 at 8.6% tax
/// let totals = calculate_invoice_totals(Money::from_cents(209_000), Rate::from_bps(860));
/// assert_eq!(totals.tax.cents(), 17_974);
/// assert_eq!(totals.total.cents(), 226_974);
/// ```
pub fn calculate_invoice_totals(subtotal: Money, tax_rate: Rate) -> InvoiceTotals {
    let tax = subtotal.scaled_by(tax_rate);
    InvoiceTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// One printed row on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLine {
    pub description: String,
    pub amount_cents: i64,
}

impl InvoiceLine {
    /// Returns the line amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Renders a breakdown as invoice lines, omitting zero rows.
///
/// A maintenance job with a single visit prints two lines (labor,
/// materials), not three - clients do not want to see "$0.00" rows.
/// The kept lines always sum to the breakdown subtotal.
pub fn lines_from_breakdown(breakdown: &PricingBreakdown) -> Vec<InvoiceLine> {
    let mut lines = Vec::with_capacity(3);

    if !breakdown.labor.is_zero() {
        lines.push(InvoiceLine {
            description: "Labor".to_string(),
            amount_cents: breakdown.labor.cents(),
        });
    }
    if !breakdown.materials.is_zero() {
        lines.push(InvoiceLine {
            description: "Materials".to_string(),
            amount_cents: breakdown.materials.cents(),
        });
    }
    if !breakdown.visit_fees.is_zero() {
        lines.push(InvoiceLine {
            description: "Additional visit fees".to_string(),
            amount_cents: breakdown.visit_fees.cents(),
        });
    }

    lines
}

// =============================================================================
// Invoice Status
// =============================================================================

/// Lifecycle state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Created from an accepted quote, still editable, not yet delivered.
    Draft,
    /// Delivered to the client; payments may be recorded.
    Sent,
    /// Balance reached zero.
    Paid,
    /// Cancelled; keeps its number, takes no payments.
    Void,
}

impl InvoiceStatus {
    /// The wire/storage key for this status (matches the serde tag).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Void => "void",
        }
    }

    /// Terminal states allow no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Void)
    }

    /// Whether an invoice may move from this status to `next`.
    ///
    /// `Sent → Paid` normally happens automatically when a recorded payment
    /// clears the balance; the direct edge also covers "client paid the
    /// whole thing by check and the office marks it paid".
    pub const fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        matches!(
            (*self, next),
            (InvoiceStatus::Draft, InvoiceStatus::Sent)
                | (InvoiceStatus::Draft, InvoiceStatus::Void)
                | (InvoiceStatus::Sent, InvoiceStatus::Paid)
                | (InvoiceStatus::Sent, InvoiceStatus::Void)
        )
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

// =============================================================================
// Payments
// =============================================================================

/// How a payment was tendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    Card,
}

impl PaymentMethod {
    /// The wire/storage key for this method (matches the serde tag).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::Card => "card",
        }
    }
}

/// One recorded payment against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub invoice_id: String,
    pub method: PaymentMethod,
    pub amount_cents: i64,

    /// Check number, card auth code, or similar (passthrough).
    pub reference: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Invoice Record
// =============================================================================

/// A stored invoice.
///
/// Totals are frozen at creation from the quote's breakdown snapshot;
/// only `amount_paid_cents`, `status`, and `paid_at` move afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable invoice number (date-stamped, shown to the client).
    pub invoice_number: String,

    /// The accepted quote this invoice was raised from, if any.
    pub quote_id: Option<String>,

    pub customer_name: String,
    pub status: InvoiceStatus,

    pub lines: Vec<InvoiceLine>,

    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,

    /// Running sum of recorded payments.
    pub amount_paid_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Set when the balance first reaches zero.
    #[ts(as = "Option<String>")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Returns the pre-tax subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the sales tax as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the running payment sum as Money.
    #[inline]
    pub fn amount_paid(&self) -> Money {
        Money::from_cents(self.amount_paid_cents)
    }

    /// Remaining balance, clamped at zero.
    ///
    /// Overpayment never shows as a negative balance - the overage is a
    /// cash-drawer concern, not an invoice one.
    #[inline]
    pub fn balance_due(&self) -> Money {
        Money::from_cents((self.total_cents - self.amount_paid_cents).max(0))
    }

    /// Whether recorded payments cover the total.
    #[inline]
    pub fn is_paid_in_full(&self) -> bool {
        self.amount_paid_cents >= self.total_cents
    }

    /// Applies a payment and flips the invoice to `Paid` when the balance
    /// clears.
    ///
    /// ## Rules
    /// - The amount must be positive ([`validate_payment_amount`]).
    /// - Only a `Sent` invoice takes payments: drafts have not been
    ///   delivered, and paid/void invoices are closed.
    /// - `now` becomes `paid_at` if this payment clears the balance.
    pub fn record_payment(&mut self, amount: Money, now: DateTime<Utc>) -> PricingResult<()> {
        validate_payment_amount(amount.cents())?;

        if self.status != InvoiceStatus::Sent {
            return Err(PricingError::InvalidInvoiceStatus {
                invoice_id: self.id.clone(),
                current_status: self.status.as_str().to_string(),
            });
        }

        self.amount_paid_cents += amount.cents();
        if self.is_paid_in_full() {
            self.status = InvoiceStatus::Paid;
            self.paid_at = Some(now);
        }

        Ok(())
    }

    /// Moves the invoice to `next`, enforcing the lifecycle.
    pub fn transition_to(&mut self, next: InvoiceStatus) -> PricingResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(PricingError::InvalidInvoiceStatus {
                invoice_id: self.id.clone(),
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
    use crate::error::ValidationError;

    fn fixture_breakdown(labor: i64, materials: i64, visit_fees: i64) -> PricingBreakdown {
        PricingBreakdown {
            labor: Money::from_cents(labor),
            materials: Money::from_cents(materials),
            visit_fees: Money::from_cents(visit_fees),
            subtotal: Money::from_cents(labor + materials + visit_fees),
        }
    }

    fn fixture_invoice(status: InvoiceStatus) -> Invoice {
        Invoice {
            id: "6b1d4e9f-0000-0000-0000-000000000002".to_string(),
            invoice_number: "INV-250823-110000-0007".to_string(),
            quote_id: Some("8e7f6a2c-0000-0000-0000-000000000001".to_string()),
            customer_name: "Maria Lopez".to_string(),
            status,
            lines: lines_from_breakdown(&fixture_breakdown(9_000, 200_000, 0)),
            subtotal_cents: 209_000,
            tax_cents: 17_974,
            total_cents: 226_974,
            amount_paid_cents: 0,
            created_at: Utc::now(),
            paid_at: None,
        }
    }

    #[test]
    fn test_invoice_totals_sales_tax() {
        // $2090.00 × 8.6% = $179.74, total $2269.74
        let totals = calculate_invoice_totals(Money::from_cents(209_000), Rate::from_bps(860));

        assert_eq!(totals.subtotal.cents(), 209_000);
        assert_eq!(totals.tax.cents(), 17_974);
        assert_eq!(totals.total.cents(), 226_974);
    }

    #[test]
    fn test_invoice_totals_zero_subtotal() {
        let totals = calculate_invoice_totals(Money::zero(), Rate::from_bps(860));

        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_lines_omit_zero_rows() {
        // Single visit → no visit-fee row
        let lines = lines_from_breakdown(&fixture_breakdown(9_000, 200_000, 0));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].description, "Labor");
        assert_eq!(lines[0].amount_cents, 9_000);
        assert_eq!(lines[1].description, "Materials");
        assert_eq!(lines[1].amount_cents, 200_000);
    }

    #[test]
    fn test_lines_sum_to_subtotal() {
        let breakdown = fixture_breakdown(15_600, 650_000, 5_000);
        let lines = lines_from_breakdown(&breakdown);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].description, "Additional visit fees");
        let sum: i64 = lines.iter().map(|l| l.amount_cents).sum();
        assert_eq!(sum, breakdown.subtotal.cents());
    }

    #[test]
    fn test_lines_all_zero_breakdown_is_empty() {
        assert!(lines_from_breakdown(&PricingBreakdown::default()).is_empty());
    }

    #[test]
    fn test_balance_due_clamps_at_zero() {
        let mut invoice = fixture_invoice(InvoiceStatus::Sent);
        invoice.amount_paid_cents = 300_000; // overpaid by $730.26

        assert_eq!(invoice.balance_due(), Money::zero());
        assert!(invoice.is_paid_in_full());
    }

    #[test]
    fn test_record_payment_partial_then_paid() {
        let mut invoice = fixture_invoice(InvoiceStatus::Sent);
        let now = Utc::now();

        invoice.record_payment(Money::from_cents(100_000), now).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Sent);
        assert_eq!(invoice.balance_due().cents(), 126_974);
        assert!(invoice.paid_at.is_none());

        invoice.record_payment(Money::from_cents(126_974), now).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.balance_due(), Money::zero());
        assert_eq!(invoice.paid_at, Some(now));
    }

    #[test]
    fn test_record_payment_overpayment_flips_to_paid() {
        let mut invoice = fixture_invoice(InvoiceStatus::Sent);

        invoice
            .record_payment(Money::from_cents(250_000), Utc::now())
            .unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.amount_paid_cents, 250_000); // recorded as tendered
        assert_eq!(invoice.balance_due(), Money::zero());
    }

    #[test]
    fn test_record_payment_rejects_nonpositive_amount() {
        let mut invoice = fixture_invoice(InvoiceStatus::Sent);

        for cents in [0, -500] {
            let err = invoice
                .record_payment(Money::from_cents(cents), Utc::now())
                .unwrap_err();
            assert!(matches!(
                err,
                PricingError::Validation(ValidationError::MustBePositive { .. })
            ));
        }
        assert_eq!(invoice.amount_paid_cents, 0);
    }

    #[test]
    fn test_record_payment_requires_sent_status() {
        for status in [InvoiceStatus::Draft, InvoiceStatus::Paid, InvoiceStatus::Void] {
            let mut invoice = fixture_invoice(status);
            let err = invoice
                .record_payment(Money::from_cents(1_000), Utc::now())
                .unwrap_err();
            assert!(matches!(
                err,
                PricingError::InvalidInvoiceStatus { ref current_status, .. }
                    if current_status == status.as_str()
            ));
        }
    }

    #[test]
    fn test_status_transition_matrix() {
        use InvoiceStatus::*;

        assert!(Draft.can_transition_to(Sent));
        assert!(Draft.can_transition_to(Void));
        assert!(Sent.can_transition_to(Paid));
        assert!(Sent.can_transition_to(Void));

        assert!(!Draft.can_transition_to(Paid)); // must be delivered first
        assert!(!Paid.can_transition_to(Void));
        assert!(!Void.can_transition_to(Sent));
        assert!(Paid.is_terminal());
        assert!(Void.is_terminal());
    }

    #[test]
    fn test_transition_to_rejects_terminal() {
        let mut invoice = fixture_invoice(InvoiceStatus::Void);

        let err = invoice.transition_to(InvoiceStatus::Sent).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidInvoiceStatus { ref current_status, .. }
                if current_status == "void"
        ));
    }
}
