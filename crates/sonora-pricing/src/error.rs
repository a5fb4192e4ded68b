//! # Error Types
//!
//! Domain-specific error types for sonora-pricing.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sonora-pricing errors (this file)                                     │
//! │  ├── PricingError     - Contract and lifecycle violations              │
//! │  └── ValidationError  - User input failures                            │
//! │                                                                         │
//! │  Web layer errors (external)                                           │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → ApiError → Frontend            │
//! │                                                                         │
//! │  Out-of-range form numbers are NOT errors at the estimate surface:     │
//! │  they come back as a message list on the result so the quote form      │
//! │  can render them inline. Errors here are for contract violations       │
//! │  (unknown enum keys, bad lifecycle moves) and record operations.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (quote ID, status, field name)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing domain errors.
///
/// These errors represent contract violations or record lifecycle failures.
/// They should be caught by the web layer and translated to user-friendly
/// messages.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Project type string is outside the closed enumeration.
    ///
    /// ## When This Occurs
    /// - The quote form submits a project type this engine doesn't price
    /// - An integration sends a stale or misspelled key
    ///
    /// This is a caller bug, never user input - it fails fast instead of
    /// silently defaulting to some rate.
    #[error("Unknown project type: {0}")]
    UnknownProjectType(String),

    /// Service zone string is outside the closed enumeration.
    #[error("Unknown service zone: {0}")]
    UnknownZone(String),

    /// Numeric inputs were out of bounds when creating a quote record.
    ///
    /// ## When This Occurs
    /// The estimate surface reports bad numbers as a message list on the
    /// result, but a quote *record* must never be built from them. The
    /// collected messages ride along for the caller to display.
    #[error("Pricing inputs are out of range: {}", errors.join("; "))]
    OutOfRangeInputs { errors: Vec<String> },

    /// Quote is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Trying to accept a quote that was never sent
    /// - Trying to re-send an expired quote
    /// - Trying to invoice a quote the client hasn't accepted
    #[error("Quote {quote_id} is {current_status}, cannot perform operation")]
    InvalidQuoteStatus {
        quote_id: String,
        current_status: String,
    },

    /// Invoice is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Recording a payment against a draft or voided invoice
    /// - Voiding an invoice that has already been paid
    #[error("Invoice {invoice_id} is {current_status}, cannot perform operation")]
    InvalidInvoiceStatus {
        invoice_id: String,
        current_status: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// The `Display` output of each variant is the exact message shown to the
/// user, so the quote form can surface `to_string()` directly.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
