//! # Validation Module
//!
//! Input validation for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (quote form)                                        │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate per-keystroke feedback                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Business bounds on hours / sqft / visits                          │
//! │  └── ALL checks run - the form shows every problem at once,            │
//! │      not just the first one                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (external persistence layer)                        │
//! │  └── NOT NULL / CHECK constraints                                      │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sonora_pricing::validation::{validate_hours, validate_visits};
//!
//! assert!(validate_hours(8.0).is_ok());
//! assert!(validate_visits(0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::{MAX_AREA_SQFT, MAX_JOB_HOURS, MAX_VISITS, MIN_VISITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates estimated labor hours.
///
/// ## Rules
/// - Must be within [0, 200], inclusive on both ends
/// - NaN and infinities are out of range (they fail the interval check)
///
/// ## Example
/// ```rust
/// use sonora_pricing::validation::validate_hours;
///
/// assert!(validate_hours(0.0).is_ok());
/// assert!(validate_hours(200.0).is_ok());
/// assert!(validate_hours(200.5).is_err());
/// ```
pub fn validate_hours(hours: f64) -> ValidationResult<()> {
    if !(0.0..=MAX_JOB_HOURS).contains(&hours) {
        return Err(ValidationError::OutOfRange {
            field: "Hours".to_string(),
            min: 0,
            max: MAX_JOB_HOURS as i64,
        });
    }

    Ok(())
}

/// Validates the service area in square feet.
///
/// ## Rules
/// - Must be within [0, 100000], inclusive on both ends
pub fn validate_area_sqft(sqft: f64) -> ValidationResult<()> {
    if !(0.0..=MAX_AREA_SQFT).contains(&sqft) {
        return Err(ValidationError::OutOfRange {
            field: "Square feet".to_string(),
            min: 0,
            max: MAX_AREA_SQFT as i64,
        });
    }

    Ok(())
}

/// Validates the number of site visits.
///
/// ## Rules
/// - Must be within [1, 50], inclusive on both ends
/// - Every job has at least one visit
pub fn validate_visits(visits: i64) -> ValidationResult<()> {
    if !(MIN_VISITS..=MAX_VISITS).contains(&visits) {
        return Err(ValidationError::OutOfRange {
            field: "Visits".to_string(),
            min: MIN_VISITS,
            max: MAX_VISITS,
        });
    }

    Ok(())
}

/// Validates a payment amount in cents.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Zero or negative payments are ledger corruption, not corrections
pub fn validate_payment_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "Payment amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name on a quote request.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 120 characters
///
/// ## Example
/// ```rust
/// use sonora_pricing::validation::validate_customer_name;
///
/// assert!(validate_customer_name("Maria Lopez").is_ok());
/// assert!(validate_customer_name("  ").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "Customer name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "Customer name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates an optional service label on a quote request.
///
/// ## Rules
/// - Can be empty (the label is a passthrough for the admin screen)
/// - Maximum 200 characters
pub fn validate_service_name(name: &str) -> ValidationResult<()> {
    if name.trim().len() > 200 {
        return Err(ValidationError::TooLong {
            field: "Service name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Form Validation
// =============================================================================

/// The result of validating a full set of numeric form inputs.
///
/// `errors` holds the user-facing messages in field order; the quote form
/// renders the list inline. `valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validates the three numeric quote-form inputs, collecting every failure.
///
/// All three checks always run - no short-circuiting - so the form can show
/// the user everything that needs fixing in one pass. No side effects.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Quote form: field change                                               │
/// │                                                                         │
/// │  hours=201, sqft=500, visits=0                                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_pricing_inputs ← THIS FUNCTION                               │
/// │       │                                                                 │
/// │       ├── hours check   → "Hours must be between 0 and 200"            │
/// │       ├── sqft check    → ok                                           │
/// │       └── visits check  → "Visits must be between 1 and 50"            │
/// │                                                                         │
/// │  → { valid: false, errors: [both messages] } rendered inline           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use sonora_pricing::validation::validate_pricing_inputs;
///
/// let report = validate_pricing_inputs(201.0, 500.0, 1);
/// assert!(!report.valid);
/// assert_eq!(report.errors, vec!["Hours must be between 0 and 200".to_string()]);
/// ```
pub fn validate_pricing_inputs(hours: f64, sqft: f64, visits: i64) -> ValidationReport {
    let mut errors = Vec::new();

    if let Err(e) = validate_hours(hours) {
        errors.push(e.to_string());
    }
    if let Err(e) = validate_area_sqft(sqft) {
        errors.push(e.to_string());
    }
    if let Err(e) = validate_visits(visits) {
        errors.push(e.to_string());
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hours() {
        // Bounds are inclusive
        assert!(validate_hours(0.0).is_ok());
        assert!(validate_hours(8.5).is_ok());
        assert!(validate_hours(200.0).is_ok());

        assert!(validate_hours(-0.5).is_err());
        assert!(validate_hours(200.1).is_err());
        assert!(validate_hours(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_area_sqft() {
        assert!(validate_area_sqft(0.0).is_ok());
        assert!(validate_area_sqft(100_000.0).is_ok());

        assert!(validate_area_sqft(-1.0).is_err());
        assert!(validate_area_sqft(100_000.5).is_err());
    }

    #[test]
    fn test_validate_visits() {
        assert!(validate_visits(1).is_ok());
        assert!(validate_visits(50).is_ok());

        assert!(validate_visits(0).is_err());
        assert!(validate_visits(51).is_err());
        assert!(validate_visits(-3).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(1).is_ok());
        assert!(validate_payment_amount(226_974).is_ok());

        assert!(validate_payment_amount(0).is_err());
        assert!(validate_payment_amount(-500).is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Maria Lopez").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_service_name() {
        assert!(validate_service_name("").is_ok());
        assert!(validate_service_name("Spring desert cleanup").is_ok());
        assert!(validate_service_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_pricing_inputs_runs_every_check() {
        // All three fields bad - all three messages come back, field order
        let report = validate_pricing_inputs(300.0, -5.0, 0);

        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Hours must be between 0 and 200".to_string(),
                "Square feet must be between 0 and 100000".to_string(),
                "Visits must be between 1 and 50".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_pricing_inputs_ok() {
        let report = validate_pricing_inputs(8.0, 2500.0, 4);

        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_validate_pricing_inputs_boundary_values() {
        // Inclusive on both ends of every range
        assert!(validate_pricing_inputs(0.0, 0.0, 1).valid);
        assert!(validate_pricing_inputs(200.0, 100_000.0, 50).valid);
    }
}
