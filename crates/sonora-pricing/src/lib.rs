//! # sonora-pricing: Pure Business Logic for Sonora Landworks
//!
//! This crate is the **heart** of the Sonora Landworks suite. It contains the
//! pricing, quoting, and invoicing rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sonora Landworks Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (Web)                               │   │
//! │  │    Quote Form ──► Admin Dashboard ──► Invoices ──► Reports     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP API                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Web Layer (external)                         │   │
//! │  │    routing, sessions, auth (out of scope for this crate)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ sonora-pricing (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   rates   │  │   money   │  │ breakdown │  │ validation│  │   │
//! │  │   │ RateBook  │  │   Money   │  │   labor   │  │   bounds  │  │   │
//! │  │   │ RateCard  │  │   Rate    │  │ materials │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   quote   │  │  invoice  │  │  reports  │  │  engine   │  │   │
//! │  │   │ QuoteRange│  │ tax/total │  │ dashboard │  │  facade   │  │   │
//! │  │   │  records  │  │ payments  │  │ rollups   │  │  logging  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Persistence Layer (external)                    │   │
//! │  │        stores quote requests, invoices, payment records         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProjectType, Zone, PricingInputs)
//! - [`money`] - Money type with integer arithmetic (no floating point drift!)
//! - [`rates`] - Rate tables (hourly/material rates, zone multipliers)
//! - [`error`] - Domain error types
//! - [`validation`] - Input bounds validation
//! - [`breakdown`] - Labor/materials/visit-fee breakdown calculator
//! - [`quote`] - Quote range estimator and quote records
//! - [`invoice`] - Invoice totals, line items, and payments
//! - [`reports`] - Dashboard aggregation over quotes and invoices
//! - [`engine`] - Instrumented facade consumed by the web layer
//! - [`config`] - Company profile, tax rate, and rate table configuration
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculation is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64); floats enter only
//!    at the measured-quantity boundary and are rounded exactly once
//! 4. **Fail Fast**: Unknown project types or zones are contract violations,
//!    never silent defaults
//!
//! ## Example Usage
//!
//! ```rust
//! use sonora_pricing::breakdown::compute_breakdown;
//! use sonora_pricing::rates::RateBook;
//! use sonora_pricing::types::{PricingInputs, ProjectType, Zone};
//!
//! let rates = RateBook::default();
//! let inputs = PricingInputs {
//!     hours: 2.0,
//!     sqft: 1000.0,
//!     visits: 1,
//!     zone: Zone::Residential,
//!     project_type: ProjectType::Maintenance,
//! };
//!
//! // 2h × $45/h = $90 labor, 1000 sqft × $2/sqft = $2000 materials,
//! // residential multiplier 1.0, first visit carries no fee
//! let breakdown = compute_breakdown(&inputs, &rates);
//! assert_eq!(breakdown.subtotal.cents(), 209_000); // $2090.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod breakdown;
pub mod config;
pub mod engine;
pub mod error;
pub mod invoice;
pub mod money;
pub mod quote;
pub mod rates;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sonora_pricing::Money` instead of
// `use sonora_pricing::money::Money`

pub use config::PricingConfig;
pub use engine::PricingEngine;
pub use error::{PricingError, ValidationError};
pub use money::Money;
pub use rates::{Rate, RateBook, RateCard};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum billable hours accepted on a single job.
///
/// ## Business Reason
/// A single landscaping job never runs past a few work weeks; anything above
/// 200 hours is a typo or an abuse of the public quote form. The bound is
/// inclusive: exactly 200 hours is accepted.
pub const MAX_JOB_HOURS: f64 = 200.0;

/// Maximum service area in square feet accepted on a single job.
///
/// ## Business Reason
/// 100,000 sqft (~2.3 acres) covers every property in the service area.
/// Larger lots get a site visit and a manual quote, not a form estimate.
pub const MAX_AREA_SQFT: f64 = 100_000.0;

/// Minimum number of site visits for a job.
///
/// ## Business Reason
/// Every job includes at least one visit; zero-visit jobs don't exist.
pub const MIN_VISITS: i64 = 1;

/// Maximum number of site visits for a job.
///
/// ## Business Reason
/// Weekly service for a year is ~52 visits; 50 is the cap for a single
/// quoted engagement. Longer arrangements are split into multiple quotes.
pub const MAX_VISITS: i64 = 50;

/// Flat fee in cents charged per visit beyond the first.
///
/// ## Business Reason
/// Covers travel and setup for each return trip. The first visit is baked
/// into the labor rate. This fee is deliberately NOT scaled by the zone
/// multiplier - it is a flat trip surcharge, not priced work.
pub const ADDITIONAL_VISIT_FEE_CENTS: i64 = 5_000;

/// Low end of the quote estimate band, in basis points (8500 = ×0.85).
///
/// ## Business Reason
/// Form estimates carry uncertainty until a supervisor walks the site.
/// The ±15% band communicates that without implying a committed price.
pub const QUOTE_BAND_LOW_BPS: u32 = 8_500;

/// High end of the quote estimate band, in basis points (11500 = ×1.15).
pub const QUOTE_BAND_HIGH_BPS: u32 = 11_500;

/// Sales tax applied to invoices, in basis points (860 = 8.6%).
///
/// ## Business Reason
/// Fixed jurisdiction rate for Phoenix, AZ. Applied only at invoicing -
/// quotes are informal pre-tax estimates and never include tax.
pub const SALES_TAX_BPS: u32 = 860;

/// Default number of days a quote remains valid after creation.
///
/// ## Business Reason
/// Material costs move seasonally; a quote older than a month needs to be
/// re-estimated. Configurable per deployment via [`config::PricingConfig`].
pub const DEFAULT_QUOTE_VALIDITY_DAYS: i64 = 30;
