//! # Runtime Configuration
//!
//! Company identity and pricing knobs, resolved once at startup.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Config Resolution                                  │
//! │                                                                         │
//! │  SONORA_* environment variables ──┐                                     │
//! │                                   ├──► PricingConfig ──► PricingEngine │
//! │  built-in defaults ───────────────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unset or unparseable variables fall back to the defaults quietly - a
//! missing variable on a crew laptop must never stop quoting.

use serde::{Deserialize, Serialize};

use crate::rates::{Rate, RateBook};
use crate::{DEFAULT_QUOTE_VALIDITY_DAYS, SALES_TAX_BPS};

// =============================================================================
// Pricing Config
// =============================================================================

/// Everything the engine needs that an office manager might change.
///
/// Rate changes only affect quotes created afterwards - existing quotes
/// and invoices carry frozen snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Shown on quote and invoice headers.
    pub company_name: String,

    /// Shown on quote headers ("serving Phoenix, AZ").
    pub service_area: String,

    /// Sales tax in basis points (860 = 8.6%).
    pub tax_rate_bps: u32,

    /// How long a fresh quote stays acceptable.
    pub quote_validity_days: i64,

    /// The rate tables quotes are priced from.
    pub rates: RateBook,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            company_name: "Sonora Landworks".to_string(),
            service_area: "Phoenix, AZ".to_string(),
            tax_rate_bps: SALES_TAX_BPS,
            quote_validity_days: DEFAULT_QUOTE_VALIDITY_DAYS,
            rates: RateBook::default(),
        }
    }
}

impl PricingConfig {
    /// Builds a config from `SONORA_*` environment variables.
    ///
    /// ## Recognized Variables
    /// ```text
    /// SONORA_COMPANY_NAME         "Sonora Landworks"
    /// SONORA_SERVICE_AREA         "Phoenix, AZ"
    /// SONORA_TAX_RATE             "8.6"        (percent, same as the settings screen)
    /// SONORA_QUOTE_VALIDITY_DAYS  "30"
    /// ```
    ///
    /// Rate tables are not env-configurable - they change through the
    /// settings screen, which deserializes a whole [`PricingConfig`].
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let company_name =
            std::env::var("SONORA_COMPANY_NAME").unwrap_or(defaults.company_name);
        let service_area =
            std::env::var("SONORA_SERVICE_AREA").unwrap_or(defaults.service_area);

        let tax_rate_bps = std::env::var("SONORA_TAX_RATE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .map(|pct| (pct * 100.0) as u32)
            .unwrap_or(defaults.tax_rate_bps);

        let quote_validity_days = std::env::var("SONORA_QUOTE_VALIDITY_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(defaults.quote_validity_days);

        Self {
            company_name,
            service_area,
            tax_rate_bps,
            quote_validity_days,
            rates: defaults.rates,
        }
    }

    /// Returns the sales tax as a typed rate.
    #[inline]
    pub const fn tax_rate(&self) -> Rate {
        Rate::from_bps(self.tax_rate_bps)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
