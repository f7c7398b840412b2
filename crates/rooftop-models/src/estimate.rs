//! Solar estimation engine.
//!
//! Converts a qualitative rooftop analysis into a rough sizing and payback
//! estimate. The engine is a pure function of the canonical labels and the
//! assumptions; it never fails.
//!
//! # Example
//!
//! ```
//! use rooftop_models::{estimate, PaybackPeriod, QualitativeAnalysis, SolarAssumptions};
//!
//! let analysis = QualitativeAnalysis {
//!     usable_area_qualitative: Some("small".to_string()),
//!     sunlight_exposure: Some("poor - significant shading".to_string()),
//!     ..Default::default()
//! };
//!
//! let result = estimate(&SolarAssumptions::default(), &analysis);
//! assert_eq!(result.panel_count, 5);
//! assert_eq!(result.system_wattage, 2000);
//! assert!(matches!(result.roi_years, PaybackPeriod::Years(_)));
//! ```

use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject, SubschemaValidation};
use schemars::JsonSchema;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::analysis::QualitativeAnalysis;
use crate::assumptions::SolarAssumptions;
use crate::labels::RoofProfile;

/// Yearly kWh produced per watt-peak of installed capacity.
pub const ANNUAL_YIELD_KWH_PER_WP: f64 = 1.4;

/// Display text for a payback period that cannot be computed.
pub const PAYBACK_NOT_APPLICABLE: &str = "N/A (No significant savings)";

/// Simple payback period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaybackPeriod {
    /// Years of savings needed to recover the system cost
    Years(f64),
    /// No savings, so the system never pays back
    NotApplicable,
}

impl PaybackPeriod {
    /// Years as a number, if applicable.
    pub fn years(&self) -> Option<f64> {
        match self {
            PaybackPeriod::Years(years) => Some(*years),
            PaybackPeriod::NotApplicable => None,
        }
    }
}

impl fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaybackPeriod::Years(years) => write!(f, "{:.1} years", years),
            PaybackPeriod::NotApplicable => f.write_str(PAYBACK_NOT_APPLICABLE),
        }
    }
}

/// Serialized as a number of years, or as the not-applicable string.
impl Serialize for PaybackPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PaybackPeriod::Years(years) => serializer.serialize_f64(*years),
            PaybackPeriod::NotApplicable => serializer.serialize_str(PAYBACK_NOT_APPLICABLE),
        }
    }
}

/// Either a number of years or the not-applicable string.
impl JsonSchema for PaybackPeriod {
    fn schema_name() -> String {
        "PaybackPeriod".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let not_applicable = SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            const_value: Some(PAYBACK_NOT_APPLICABLE.into()),
            ..Default::default()
        };

        SchemaObject {
            subschemas: Some(Box::new(SubschemaValidation {
                any_of: Some(vec![gen.subschema_for::<f64>(), not_applicable.into()]),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into()
    }
}

/// Numeric solar estimate.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct NumericEstimate {
    /// Usable roof area (square feet)
    pub usable_area_sq_ft: u32,
    /// Panels that fit the usable area
    pub panel_count: u32,
    /// Installed capacity (watts)
    pub system_wattage: u64,
    /// Installed capacity (kilowatts)
    pub system_size_kw: f64,
    /// Sunlight multiplier applied to production
    pub production_factor: f64,
    /// Yearly energy production (kWh)
    pub yearly_kwh: f64,
    /// Installed system cost
    pub system_cost: f64,
    /// Yearly electricity savings
    pub yearly_savings: f64,
    /// Simple payback period
    pub roi_years: PaybackPeriod,
}

/// Estimate from a raw qualitative analysis.
pub fn estimate(assumptions: &SolarAssumptions, analysis: &QualitativeAnalysis) -> NumericEstimate {
    estimate_profile(assumptions, analysis.profile())
}

/// Estimate from canonical labels.
pub fn estimate_profile(assumptions: &SolarAssumptions, profile: RoofProfile) -> NumericEstimate {
    let usable_area_sq_ft = profile.usable_area.square_feet();

    let panel_count = if usable_area_sq_ft > 0 && assumptions.panel_area_sq_ft > 0 {
        usable_area_sq_ft / assumptions.panel_area_sq_ft
    } else {
        0
    };

    let system_wattage = u64::from(panel_count) * u64::from(assumptions.panel_wattage);
    let production_factor = profile.sunlight.production_factor();

    let yearly_kwh = if system_wattage > 0 {
        (system_wattage as f64 * ANNUAL_YIELD_KWH_PER_WP * production_factor) / 1000.0
    } else {
        0.0
    };

    // Equal to (wattage / 1000) * cost_per_watt * 1000.
    let system_cost = if system_wattage > 0 {
        system_wattage as f64 * assumptions.cost_per_watt
    } else {
        0.0
    };

    let yearly_savings = yearly_kwh * assumptions.electricity_rate_per_kwh;

    let roi_years = if yearly_savings > 0.0 {
        PaybackPeriod::Years(system_cost / yearly_savings)
    } else {
        PaybackPeriod::NotApplicable
    };

    NumericEstimate {
        usable_area_sq_ft,
        panel_count,
        system_wattage,
        system_size_kw: system_wattage as f64 / 1000.0,
        production_factor,
        yearly_kwh,
        system_cost,
        yearly_savings,
        roi_years,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{SunlightExposure, UsableArea};

    fn analysis(area: &str, sunlight: &str) -> QualitativeAnalysis {
        QualitativeAnalysis {
            usable_area_qualitative: Some(area.to_string()),
            sunlight_exposure: Some(sunlight.to_string()),
            ..Default::default()
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn test_large_excellent() {
        let e = estimate(&SolarAssumptions::default(), &analysis("large", "excellent"));

        assert_eq!(e.usable_area_sq_ft, 600);
        assert_eq!(e.panel_count, 33);
        assert_eq!(e.system_wattage, 13200);
        assert_eq!(e.production_factor, 1.2);
        assert!(approx(e.yearly_kwh, 22.176));
        assert_eq!(e.system_cost, 924_000.0);
        assert!(approx(e.yearly_savings, 144.144));

        let years = e.roi_years.years().unwrap();
        assert!(approx(years, 924_000.0 / 144.144));
        assert!((years - 6410.3).abs() < 0.1);
    }

    #[test]
    fn test_unknown_good() {
        let e = estimate(&SolarAssumptions::default(), &analysis("unknown", "good"));

        assert_eq!(e.usable_area_sq_ft, 0);
        assert_eq!(e.panel_count, 0);
        assert_eq!(e.system_wattage, 0);
        assert_eq!(e.yearly_kwh, 0.0);
        assert_eq!(e.system_cost, 0.0);
        assert_eq!(e.yearly_savings, 0.0);
        assert_eq!(e.roi_years, PaybackPeriod::NotApplicable);
    }

    #[test]
    fn test_small_poor() {
        let e = estimate(
            &SolarAssumptions::default(),
            &analysis("small", "poor - significant shading"),
        );

        assert_eq!(e.usable_area_sq_ft, 100);
        assert_eq!(e.panel_count, 5);
        assert_eq!(e.system_wattage, 2000);
        assert_eq!(e.production_factor, 0.5);
        assert!(approx(e.yearly_kwh, 1.4));
        assert_eq!(e.system_cost, 140_000.0);
        assert!(approx(e.yearly_savings, 9.10));
        assert!((e.roi_years.years().unwrap() - 15_384.6).abs() < 0.1);
    }

    #[test]
    fn test_empty_analysis_is_total() {
        let e = estimate(&SolarAssumptions::default(), &QualitativeAnalysis::default());
        assert_eq!(e.usable_area_sq_ft, 0);
        assert_eq!(e.production_factor, 1.0);
        assert_eq!(e.roi_years, PaybackPeriod::NotApplicable);
    }

    #[test]
    fn test_panel_and_wattage_arithmetic() {
        let assumptions = SolarAssumptions::default();
        for area in UsableArea::ALL {
            let e = estimate_profile(
                &assumptions,
                RoofProfile {
                    usable_area: *area,
                    sunlight: SunlightExposure::Good,
                },
            );
            assert_eq!(e.panel_count, area.square_feet() / 18);
            assert_eq!(e.system_wattage, u64::from(e.panel_count) * 400);
            assert_eq!(e.yearly_kwh == 0.0, e.system_wattage == 0);
        }
    }

    #[test]
    fn test_cost_matches_scaled_formula() {
        let assumptions = SolarAssumptions::default();
        for area in UsableArea::ALL {
            let e = estimate_profile(
                &assumptions,
                RoofProfile {
                    usable_area: *area,
                    sunlight: SunlightExposure::Good,
                },
            );
            let scaled = if e.system_wattage > 0 {
                (e.system_wattage as f64 / 1000.0) * assumptions.cost_per_watt * 1000.0
            } else {
                0.0
            };
            assert!(approx(e.system_cost, scaled));
            assert_eq!(e.system_cost, e.system_wattage as f64 * 70.0);
        }
    }

    #[test]
    fn test_yearly_kwh_monotonic() {
        let assumptions = SolarAssumptions::default();
        let by_factor = [
            SunlightExposure::Poor,
            SunlightExposure::Moderate,
            SunlightExposure::Good,
            SunlightExposure::Excellent,
        ];
        let by_area = [UsableArea::Small, UsableArea::Medium, UsableArea::Large];

        for area in by_area {
            let outputs: Vec<f64> = by_factor
                .iter()
                .map(|s| {
                    estimate_profile(&assumptions, RoofProfile { sunlight: *s, usable_area: area })
                        .yearly_kwh
                })
                .collect();
            assert!(outputs.windows(2).all(|w| w[0] < w[1]));
        }

        for sunlight in by_factor {
            let outputs: Vec<f64> = by_area
                .iter()
                .map(|a| {
                    estimate_profile(&assumptions, RoofProfile { sunlight, usable_area: *a })
                        .yearly_kwh
                })
                .collect();
            assert!(outputs.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_roi_positive_and_finite() {
        let assumptions = SolarAssumptions::default();
        for area in [UsableArea::Small, UsableArea::Medium, UsableArea::Large] {
            for sunlight in SunlightExposure::ALL {
                let e = estimate_profile(
                    &assumptions,
                    RoofProfile { sunlight: *sunlight, usable_area: area },
                );
                let years = e.roi_years.years().unwrap();
                assert!(years > 0.0 && years.is_finite());
                assert!(approx(years, e.system_cost / e.yearly_savings));
            }
        }
    }

    #[test]
    fn test_custom_tariff() {
        let assumptions = SolarAssumptions::default()
            .with_cost_per_watt(1.0)
            .with_electricity_rate(100.0);
        let e = estimate(&assumptions, &analysis("medium", "good"));

        assert_eq!(e.panel_count, 16);
        assert_eq!(e.system_wattage, 6400);
        assert_eq!(e.system_cost, 6400.0);
        assert!(approx(e.yearly_kwh, 8.96));
        assert!(approx(e.yearly_savings, 896.0));
    }

    #[test]
    fn test_zero_panel_area_is_total() {
        let assumptions = SolarAssumptions::default().with_panel_area(0);
        let e = estimate(&assumptions, &analysis("large", "excellent"));
        assert_eq!(e.panel_count, 0);
        assert_eq!(e.roi_years, PaybackPeriod::NotApplicable);
    }

    #[test]
    fn test_payback_serialization() {
        assert_eq!(
            serde_json::to_value(PaybackPeriod::Years(12.5)).unwrap(),
            serde_json::json!(12.5)
        );
        assert_eq!(
            serde_json::to_value(PaybackPeriod::NotApplicable).unwrap(),
            serde_json::json!("N/A (No significant savings)")
        );
        assert_eq!(PaybackPeriod::Years(15_384.615).to_string(), "15384.6 years");
    }

    #[test]
    fn test_payback_schema_allows_number_or_sentinel() {
        let schema = serde_json::to_value(schemars::schema_for!(PaybackPeriod)).unwrap();
        let any_of = schema["anyOf"].as_array().unwrap();

        assert_eq!(any_of.len(), 2);
        assert_eq!(any_of[0]["type"], "number");
        assert_eq!(any_of[1]["type"], "string");
        assert_eq!(any_of[1]["const"], PAYBACK_NOT_APPLICABLE);

        let estimate_schema = serde_json::to_value(schemars::schema_for!(NumericEstimate)).unwrap();
        assert!(estimate_schema["properties"]["roi_years"].is_object());
    }
}
