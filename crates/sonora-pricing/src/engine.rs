//! # Pricing Engine Facade
//!
//! The one entry point the web layer calls. Owns the active
//! [`PricingConfig`], parses wire strings into typed inputs, runs the
//! pure math underneath, and stamps out quote / invoice / payment records.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Engine Facade                                      │
//! │                                                                         │
//! │  QuoteRequest (wire) ──► estimate ──────► EstimateResponse (wire)      │
//! │                      ──► create_quote ──► Quote (Pending)              │
//! │  Quote (Accepted) ───► create_invoice ──► Invoice (Draft)              │
//! │  Invoice (Sent) ─────► record_payment ──► PaymentRecord                │
//! │                                                                         │
//! │  Parse failures (unknown zone/type) fail fast with an error.           │
//! │  Out-of-range numbers are data, not errors - estimate reports them.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## User Workflow
//! 1. Client fills the quote form; every change calls [`PricingEngine::estimate`].
//! 2. Office clicks "Save quote" → [`PricingEngine::create_quote`].
//! 3. Quote is sent, client accepts → [`Quote::transition_to`].
//! 4. Office raises the bill → [`PricingEngine::create_invoice`].
//! 5. Payments arrive → [`PricingEngine::record_payment`] until the balance
//!    clears and the invoice flips to `Paid` on its own.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::breakdown::{compute_breakdown, PricingBreakdown};
use crate::config::PricingConfig;
use crate::error::{PricingError, PricingResult};
use crate::invoice::{
    calculate_invoice_totals, lines_from_breakdown, Invoice, InvoiceStatus, PaymentMethod,
    PaymentRecord,
};
use crate::money::Money;
use crate::quote::{calculate_quote_range, Quote, QuoteRange, QuoteStatus};
use crate::types::{PricingInputs, ProjectType, Zone};
use crate::validation::{
    validate_customer_name, validate_pricing_inputs, validate_service_name, ValidationReport,
};

// =============================================================================
// Wire DTOs
// =============================================================================

/// A quote request as the web form posts it.
///
/// Enums arrive as strings because they come straight out of `<select>`
/// elements; the engine parses them and rejects anything it has no rate
/// table for.
///
/// ```json
/// {
///   "customerName": "Maria Lopez",
///   "serviceName": "Spring cleanup",
///   "extras": { "gateCode": "4821" },
///   "projectType": "maintenance",
///   "zone": "residential",
///   "hours": 2.0,
///   "sqft": 1000.0,
///   "visits": 1
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub customer_name: String,
    pub service_name: Option<String>,

    /// Free-form extra form fields; stored on the quote as a JSON string,
    /// never interpreted.
    pub extras: Option<serde_json::Value>,

    pub project_type: String,
    pub zone: String,
    pub hours: f64,
    pub sqft: f64,
    pub visits: i64,
}

/// The estimate the form renders on every change.
///
/// Always deliverable: when `valid` is false the amounts are zero and
/// `errors` carries the inline messages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub min_total_cents: i64,
    pub max_total_cents: i64,
    pub labor_cents: i64,
    pub materials_cents: i64,
    pub visit_fees_cents: i64,
    pub subtotal_cents: i64,
    pub valid: bool,
    pub errors: Vec<String>,
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Stateless facade over the pricing math, parameterized by config.
///
/// ## Why a struct and not free functions?
/// The rate tables and tax rate travel with the engine, so the web layer
/// holds exactly one value and every call prices consistently. Swapping
/// the config swaps the whole pricing world - tests inject fixture rates
/// the same way.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Builds an engine around the given config.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Range-checks the numeric inputs without pricing anything.
    pub fn validate_inputs(&self, hours: f64, sqft: f64, visits: i64) -> ValidationReport {
        debug!(hours, sqft, visits, "validate_inputs request");
        validate_pricing_inputs(hours, sqft, visits)
    }

    /// Prices typed inputs against the active rate tables.
    pub fn compute_breakdown(&self, inputs: &PricingInputs) -> PricingBreakdown {
        compute_breakdown(inputs, &self.config.rates)
    }

    /// Estimate band for typed inputs, validation included.
    pub fn quote_range(&self, inputs: &PricingInputs) -> QuoteRange {
        calculate_quote_range(inputs, &self.config.rates)
    }

    /// Prices a wire request for the live quote form.
    ///
    /// Unknown `projectType` / `zone` strings are a fail-fast error - the
    /// form's dropdowns should never produce them, so reaching this path
    /// means a version-skewed or hand-crafted client. Out-of-range numbers
    /// come back as a `valid: false` response instead.
    pub fn estimate(&self, request: &QuoteRequest) -> PricingResult<EstimateResponse> {
        debug!(
            project_type = %request.project_type,
            zone = %request.zone,
            "estimate request"
        );

        let project_type: ProjectType = request.project_type.parse()?;
        let zone: Zone = request.zone.parse()?;
        let inputs = PricingInputs {
            hours: request.hours,
            sqft: request.sqft,
            visits: request.visits,
            zone,
            project_type,
        };

        let range = self.quote_range(&inputs);

        Ok(EstimateResponse {
            min_total_cents: range.min_total.cents(),
            max_total_cents: range.max_total.cents(),
            labor_cents: range.breakdown.labor.cents(),
            materials_cents: range.breakdown.materials.cents(),
            visit_fees_cents: range.breakdown.visit_fees.cents(),
            subtotal_cents: range.breakdown.subtotal.cents(),
            valid: range.valid,
            errors: range.errors,
        })
    }

    /// Creates a `Pending` quote from a wire request.
    ///
    /// Unlike [`PricingEngine::estimate`], out-of-range numbers are a hard
    /// error here - an invalid quote must never be saved.
    pub fn create_quote(&self, request: &QuoteRequest) -> PricingResult<Quote> {
        debug!(customer = %request.customer_name, "create_quote request");

        validate_customer_name(&request.customer_name)?;
        if let Some(service_name) = &request.service_name {
            validate_service_name(service_name)?;
        }
        let project_type: ProjectType = request.project_type.parse()?;
        let zone: Zone = request.zone.parse()?;

        let inputs = PricingInputs {
            hours: request.hours,
            sqft: request.sqft,
            visits: request.visits,
            zone,
            project_type,
        };
        let range = calculate_quote_range(&inputs, &self.config.rates);
        if !range.valid {
            return Err(PricingError::OutOfRangeInputs {
                errors: range.errors,
            });
        }

        let created_at = Utc::now();
        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            quote_number: generate_document_number("Q", created_at),
            customer_name: request.customer_name.trim().to_string(),
            service_name: request.service_name.clone(),
            extras: request
                .extras
                .as_ref()
                .map(|v| serde_json::to_string(v).unwrap_or_default()),
            project_type,
            zone,
            hours: request.hours,
            sqft: request.sqft,
            visits: request.visits,
            status: QuoteStatus::Pending,
            labor_cents: range.breakdown.labor.cents(),
            materials_cents: range.breakdown.materials.cents(),
            visit_fees_cents: range.breakdown.visit_fees.cents(),
            subtotal_cents: range.breakdown.subtotal.cents(),
            min_total_cents: range.min_total.cents(),
            max_total_cents: range.max_total.cents(),
            created_at,
            expires_at: created_at + Duration::days(self.config.quote_validity_days),
        };

        info!(
            quote_id = %quote.id,
            quote_number = %quote.quote_number,
            min = %quote.min_total(),
            max = %quote.max_total(),
            "Quote created"
        );

        Ok(quote)
    }

    /// Raises a `Draft` invoice from an accepted quote.
    ///
    /// Totals come from the quote's frozen breakdown snapshot plus the
    /// current tax rate; the quote's inputs are never re-priced.
    pub fn create_invoice(&self, quote: &Quote) -> PricingResult<Invoice> {
        debug!(quote_id = %quote.id, "create_invoice request");

        if quote.status != QuoteStatus::Accepted {
            return Err(PricingError::InvalidQuoteStatus {
                quote_id: quote.id.clone(),
                current_status: quote.status.as_str().to_string(),
            });
        }

        let breakdown = quote.breakdown();
        let totals = calculate_invoice_totals(breakdown.subtotal, self.config.tax_rate());
        let created_at = Utc::now();

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number: generate_document_number("INV", created_at),
            quote_id: Some(quote.id.clone()),
            customer_name: quote.customer_name.clone(),
            status: InvoiceStatus::Draft,
            lines: lines_from_breakdown(&breakdown),
            subtotal_cents: totals.subtotal.cents(),
            tax_cents: totals.tax.cents(),
            total_cents: totals.total.cents(),
            amount_paid_cents: 0,
            created_at,
            paid_at: None,
        };

        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            total = %invoice.total(),
            "Invoice created"
        );

        Ok(invoice)
    }

    /// Applies a payment to the invoice and returns the payment record.
    pub fn record_payment(
        &self,
        invoice: &mut Invoice,
        amount_cents: i64,
        method: PaymentMethod,
        reference: Option<String>,
    ) -> PricingResult<PaymentRecord> {
        debug!(
            invoice_id = %invoice.id,
            amount = %amount_cents,
            method = method.as_str(),
            "record_payment request"
        );

        let now = Utc::now();
        invoice.record_payment(Money::from_cents(amount_cents), now)?;

        let record = PaymentRecord {
            id: Uuid::new_v4().to_string(),
            invoice_id: invoice.id.clone(),
            method,
            amount_cents,
            reference,
            created_at: now,
        };

        info!(
            payment_id = %record.id,
            invoice_id = %invoice.id,
            amount = %record.amount(),
            balance = %invoice.balance_due(),
            "Payment recorded"
        );

        Ok(record)
    }

    /// Serializes a quote for the persistence outbox.
    pub fn quote_payload(&self, quote: &Quote) -> String {
        serde_json::to_string(quote).unwrap_or_default()
    }

    /// Serializes an invoice for the persistence outbox.
    pub fn invoice_payload(&self, invoice: &Invoice) -> String {
        serde_json::to_string(invoice).unwrap_or_default()
    }
}

/// Human-readable document number: prefix, timestamp, 4 random digits.
///
/// ## Example
/// ```text
/// Q-250823-101500-0042
/// INV-250823-110000-0007
/// ```
fn generate_document_number(prefix: &str, at: DateTime<Utc>) -> String {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos()
        % 10_000;
    format!("{}-{}-{:04}", prefix, at.format("%y%m%d-%H%M%S"), random)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> PricingEngine {
        PricingEngine::default()
    }

    /// Commercial installation, 2h / 1000 sqft / 2 visits.
    fn commercial_request() -> QuoteRequest {
        QuoteRequest {
            customer_name: "Desert Bloom HOA".to_string(),
            service_name: Some("Irrigation install".to_string()),
            extras: Some(json!({ "gateCode": "4821" })),
            project_type: "installation".to_string(),
            zone: "commercial".to_string(),
            hours: 2.0,
            sqft: 1000.0,
            visits: 2,
        }
    }

    fn accepted_quote() -> Quote {
        let mut quote = engine().create_quote(&commercial_request()).unwrap();
        quote.transition_to(QuoteStatus::Sent).unwrap();
        quote.transition_to(QuoteStatus::Accepted).unwrap();
        quote
    }

    #[test]
    fn test_estimate_residential_maintenance() {
        let request = QuoteRequest {
            customer_name: "Maria Lopez".to_string(),
            service_name: None,
            extras: None,
            project_type: "maintenance".to_string(),
            zone: "residential".to_string(),
            hours: 2.0,
            sqft: 1000.0,
            visits: 1,
        };

        let response = engine().estimate(&request).unwrap();

        assert!(response.valid);
        assert_eq!(response.labor_cents, 9_000);
        assert_eq!(response.materials_cents, 200_000);
        assert_eq!(response.visit_fees_cents, 0);
        assert_eq!(response.subtotal_cents, 209_000);
        assert_eq!(response.min_total_cents, 177_650);
        assert_eq!(response.max_total_cents, 240_350);
    }

    #[test]
    fn test_estimate_unknown_zone_fails_fast() {
        let mut request = commercial_request();
        request.zone = "industrial".to_string();

        let err = engine().estimate(&request).unwrap_err();
        assert_eq!(err.to_string(), "Unknown service zone: industrial");
    }

    #[test]
    fn test_estimate_out_of_range_is_reported_not_errored() {
        let mut request = commercial_request();
        request.hours = 500.0;

        let response = engine().estimate(&request).unwrap();

        assert!(!response.valid);
        assert_eq!(response.errors, vec!["Hours must be between 0 and 200"]);
        assert_eq!(response.subtotal_cents, 0);
        assert_eq!(response.min_total_cents, 0);
        assert_eq!(response.max_total_cents, 0);
    }

    #[test]
    fn test_estimate_serializes_camel_case() {
        let response = engine().estimate(&commercial_request()).unwrap();
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"minTotalCents\":570010")); // 670600 × 0.85
        assert!(json.contains("\"visitFeesCents\":5000"));
        assert!(json.contains("\"valid\":true"));
    }

    #[test]
    fn test_create_quote_snapshots_everything() {
        let quote = engine().create_quote(&commercial_request()).unwrap();

        assert!(Uuid::parse_str(&quote.id).is_ok());
        assert!(quote.quote_number.starts_with("Q-"));
        assert_eq!(quote.status, QuoteStatus::Pending);
        assert_eq!(quote.customer_name, "Desert Bloom HOA");

        // 6000×2×1.3 + 500×1000×1.3 + 5000
        assert_eq!(quote.labor_cents, 15_600);
        assert_eq!(quote.materials_cents, 650_000);
        assert_eq!(quote.visit_fees_cents, 5_000);
        assert_eq!(quote.subtotal_cents, 670_600);

        assert_eq!(quote.expires_at - quote.created_at, Duration::days(30));

        // Extras stored as an opaque JSON string
        let extras = quote.extras.as_deref().unwrap();
        let value: serde_json::Value = serde_json::from_str(extras).unwrap();
        assert_eq!(value["gateCode"], "4821");
    }

    #[test]
    fn test_create_quote_rejects_out_of_range() {
        let mut request = commercial_request();
        request.visits = 0;
        request.sqft = -1.0;

        let err = engine().create_quote(&request).unwrap_err();
        assert!(matches!(
            err,
            PricingError::OutOfRangeInputs { ref errors }
                if errors == &vec![
                    "Square feet must be between 0 and 100000".to_string(),
                    "Visits must be between 1 and 50".to_string(),
                ]
        ));
    }

    #[test]
    fn test_create_quote_requires_customer_name() {
        let mut request = commercial_request();
        request.customer_name = "   ".to_string();

        let err = engine().create_quote(&request).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Customer name is required");
    }

    #[test]
    fn test_create_quote_unknown_project_type() {
        let mut request = commercial_request();
        request.project_type = "demolition".to_string();

        let err = engine().create_quote(&request).unwrap_err();
        assert_eq!(err.to_string(), "Unknown project type: demolition");
    }

    #[test]
    fn test_create_invoice_from_accepted_quote() {
        let quote = accepted_quote();
        let invoice = engine().create_invoice(&quote).unwrap();

        assert!(invoice.invoice_number.starts_with("INV-"));
        assert_eq!(invoice.quote_id.as_deref(), Some(quote.id.as_str()));
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.customer_name, quote.customer_name);

        // $6706.00 × 8.6% = $576.72 (rounded from $576.7216)
        assert_eq!(invoice.subtotal_cents, 670_600);
        assert_eq!(invoice.tax_cents, 57_672);
        assert_eq!(invoice.total_cents, 728_272);

        assert_eq!(invoice.lines.len(), 3);
        let sum: i64 = invoice.lines.iter().map(|l| l.amount_cents).sum();
        assert_eq!(sum, invoice.subtotal_cents);

        assert_eq!(invoice.amount_paid_cents, 0);
        assert!(invoice.paid_at.is_none());
    }

    #[test]
    fn test_create_invoice_requires_accepted_status() {
        let quote = engine().create_quote(&commercial_request()).unwrap();

        let err = engine().create_invoice(&quote).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidQuoteStatus { ref current_status, .. }
                if current_status == "pending"
        ));
    }

    #[test]
    fn test_record_payment_full_flow() {
        let eng = engine();
        let mut invoice = eng.create_invoice(&accepted_quote()).unwrap();
        invoice.transition_to(InvoiceStatus::Sent).unwrap();

        let record = eng
            .record_payment(
                &mut invoice,
                728_272,
                PaymentMethod::Card,
                Some("AUTH-1184".to_string()),
            )
            .unwrap();

        assert!(Uuid::parse_str(&record.id).is_ok());
        assert_eq!(record.invoice_id, invoice.id);
        assert_eq!(record.method, PaymentMethod::Card);
        assert_eq!(record.amount_cents, 728_272);
        assert_eq!(record.reference.as_deref(), Some("AUTH-1184"));

        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.balance_due(), Money::zero());
        assert!(invoice.paid_at.is_some());
    }

    #[test]
    fn test_record_payment_rejects_draft_invoice() {
        let eng = engine();
        let mut invoice = eng.create_invoice(&accepted_quote()).unwrap();

        let err = eng
            .record_payment(&mut invoice, 1_000, PaymentMethod::Cash, None)
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidInvoiceStatus { ref current_status, .. }
                if current_status == "draft"
        ));
    }

    #[test]
    fn test_payloads_round_trip() {
        let eng = engine();
        let quote = accepted_quote();
        let invoice = eng.create_invoice(&quote).unwrap();

        let quote_back: Quote = serde_json::from_str(&eng.quote_payload(&quote)).unwrap();
        assert_eq!(quote_back.id, quote.id);
        assert_eq!(quote_back.subtotal_cents, quote.subtotal_cents);

        let invoice_back: Invoice =
            serde_json::from_str(&eng.invoice_payload(&invoice)).unwrap();
        assert_eq!(invoice_back.total_cents, invoice.total_cents);
    }

    #[test]
    fn test_document_number_format() {
        let at = Utc::now();
        let number = generate_document_number("Q", at);

        // Q-yymmdd-hhmmss-rrrr
        assert!(number.starts_with("Q-"));
        assert_eq!(number.len(), 20);
    }

    #[test]
    fn test_engine_with_custom_tax_rate() {
        let config = PricingConfig {
            tax_rate_bps: 0,
            ..PricingConfig::default()
        };
        let eng = PricingEngine::new(config);

        let invoice = eng.create_invoice(&accepted_quote()).unwrap();
        assert_eq!(invoice.tax_cents, 0);
        assert_eq!(invoice.total_cents, invoice.subtotal_cents);
    }
}
