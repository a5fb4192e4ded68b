//! # Domain Types
//!
//! Core domain types used throughout the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProjectType    │   │      Zone       │   │ PricingInputs   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Maintenance    │   │  Residential    │   │  hours (f64)    │       │
//! │  │  Installation   │   │  Commercial     │   │  sqft (f64)     │       │
//! │  │  Repair         │   │                 │   │  visits (i64)   │       │
//! │  └─────────────────┘   └─────────────────┘   │  zone           │       │
//! │                                              │  project_type   │       │
//! │  Closed enumerations - every value           └─────────────────┘       │
//! │  has a rate table entry, and unknown                                   │
//! │  wire strings fail fast at parse time                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unknown Keys Fail Fast
//! The quote form submits `project_type` and `zone` as strings. Parsing an
//! unrecognized key returns [`PricingError::UnknownProjectType`] /
//! [`PricingError::UnknownZone`] instead of defaulting to some rate - a bad
//! key is a caller bug, and pricing the job with the wrong table would be
//! worse than rejecting it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::PricingError;

// =============================================================================
// Project Type
// =============================================================================

/// The kind of landscaping work being quoted.
///
/// Determines the rate card lookup: each variant has its own hourly labor
/// rate and per-sqft material rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// Recurring upkeep: mowing, trimming, cleanup.
    Maintenance,
    /// New plantings, hardscape, irrigation installs.
    Installation,
    /// Fixing existing landscaping or irrigation.
    Repair,
}

impl ProjectType {
    /// Every project type, in display order.
    pub const ALL: [ProjectType; 3] = [
        ProjectType::Maintenance,
        ProjectType::Installation,
        ProjectType::Repair,
    ];

    /// The wire/storage key for this project type (matches the serde tag).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Maintenance => "maintenance",
            ProjectType::Installation => "installation",
            ProjectType::Repair => "repair",
        }
    }
}

impl FromStr for ProjectType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maintenance" => Ok(ProjectType::Maintenance),
            "installation" => Ok(ProjectType::Installation),
            "repair" => Ok(ProjectType::Repair),
            other => Err(PricingError::UnknownProjectType(other.to_string())),
        }
    }
}

// =============================================================================
// Zone
// =============================================================================

/// The service zone a property falls in.
///
/// Determines the price multiplier applied to labor and materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Residential properties (×1.0 baseline).
    Residential,
    /// Commercial properties (×1.3 - access, insurance, scheduling overhead).
    Commercial,
}

impl Zone {
    /// Every zone, in display order.
    pub const ALL: [Zone; 2] = [Zone::Residential, Zone::Commercial];

    /// The wire/storage key for this zone (matches the serde tag).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Zone::Residential => "residential",
            Zone::Commercial => "commercial",
        }
    }
}

impl FromStr for Zone {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "residential" => Ok(Zone::Residential),
            "commercial" => Ok(Zone::Commercial),
            other => Err(PricingError::UnknownZone(other.to_string())),
        }
    }
}

// =============================================================================
// Pricing Inputs
// =============================================================================

/// A snapshot of the numeric and categorical inputs for one calculation.
///
/// Built fresh from form state on every change - nothing here is cached or
/// persisted by the calculators. Quantities are fractional because the form
/// accepts half-hours and odd lot sizes; they must pass
/// [`crate::validation::validate_pricing_inputs`] before any breakdown is
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingInputs {
    /// Estimated labor hours. Valid range [0, 200].
    pub hours: f64,

    /// Service area in square feet. Valid range [0, 100000].
    pub sqft: f64,

    /// Number of site visits. Valid range [1, 50].
    pub visits: i64,

    /// Service zone of the property.
    pub zone: Zone,

    /// Kind of work being quoted.
    pub project_type: ProjectType,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_parse_round_trip() {
        for pt in ProjectType::ALL {
            assert_eq!(pt.as_str().parse::<ProjectType>().unwrap(), pt);
        }
    }

    #[test]
    fn test_zone_parse_round_trip() {
        for zone in Zone::ALL {
            assert_eq!(zone.as_str().parse::<Zone>().unwrap(), zone);
        }
    }

    #[test]
    fn test_parse_unknown_project_type_fails_fast() {
        let err = "excavation".parse::<ProjectType>().unwrap_err();
        assert!(matches!(err, PricingError::UnknownProjectType(s) if s == "excavation"));
    }

    #[test]
    fn test_parse_unknown_zone_fails_fast() {
        let err = "industrial".parse::<Zone>().unwrap_err();
        assert!(matches!(err, PricingError::UnknownZone(s) if s == "industrial"));
    }

    #[test]
    fn test_serde_tags_match_wire_keys() {
        // The serde tags and as_str() must agree - both are the wire format
        let json = serde_json::to_string(&ProjectType::Installation).unwrap();
        assert_eq!(json, "\"installation\"");

        let zone: Zone = serde_json::from_str("\"commercial\"").unwrap();
        assert_eq!(zone, Zone::Commercial);
    }
}
