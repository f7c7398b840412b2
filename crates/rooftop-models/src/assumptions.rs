//! Solar sizing assumptions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Pricing and hardware assumptions used by the estimation engine.
///
/// Built once at startup and passed by reference; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SolarAssumptions {
    /// Rated output per panel (watts)
    pub panel_wattage: u32,
    /// Roof area occupied by one panel (square feet)
    pub panel_area_sq_ft: u32,
    /// All-in installed cost per watt
    pub cost_per_watt: f64,
    /// Electricity tariff per kWh
    pub electricity_rate_per_kwh: f64,
    /// Expected system lifespan. Not used by the payback formula.
    pub system_lifespan_years: u32,
    /// Currency symbol for display
    pub currency_symbol: String,
}

impl Default for SolarAssumptions {
    fn default() -> Self {
        Self {
            panel_wattage: 400,
            panel_area_sq_ft: 18,
            cost_per_watt: 70.00,
            electricity_rate_per_kwh: 6.50,
            system_lifespan_years: 25,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl SolarAssumptions {
    /// Create assumptions from environment variables.
    ///
    /// Missing, unparsable, non-positive or infinite values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            panel_wattage: positive_env("SOLAR_PANEL_WATTAGE", defaults.panel_wattage),
            panel_area_sq_ft: positive_env("SOLAR_PANEL_AREA_SQ_FT", defaults.panel_area_sq_ft),
            cost_per_watt: positive_f64_env("SOLAR_COST_PER_WATT", defaults.cost_per_watt),
            electricity_rate_per_kwh: positive_f64_env(
                "SOLAR_ELECTRICITY_RATE",
                defaults.electricity_rate_per_kwh,
            ),
            system_lifespan_years: positive_env(
                "SOLAR_SYSTEM_LIFESPAN_YEARS",
                defaults.system_lifespan_years,
            ),
            currency_symbol: std::env::var("SOLAR_CURRENCY_SYMBOL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.currency_symbol),
        }
    }

    /// Override the panel wattage.
    pub fn with_panel_wattage(mut self, watts: u32) -> Self {
        self.panel_wattage = watts;
        self
    }

    /// Override the panel footprint.
    pub fn with_panel_area(mut self, sq_ft: u32) -> Self {
        self.panel_area_sq_ft = sq_ft;
        self
    }

    /// Override the installed cost per watt.
    pub fn with_cost_per_watt(mut self, cost: f64) -> Self {
        self.cost_per_watt = cost;
        self
    }

    /// Override the electricity tariff.
    pub fn with_electricity_rate(mut self, rate: f64) -> Self {
        self.electricity_rate_per_kwh = rate;
        self
    }
}

fn positive_env<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + PartialOrd + Default + Copy,
{
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => value,
            _ => {
                warn!(key, value = %raw, "Ignoring invalid solar assumption override");
                default
            }
        },
        Err(_) => default,
    }
}

/// Like [`positive_env`], but an overflowing value such as `inf` or `1e400`
/// is rejected so costs and payback stay finite.
fn positive_f64_env(key: &str, default: f64) -> f64 {
    let value = positive_env(key, default);
    if value.is_finite() {
        value
    } else {
        warn!(key, "Ignoring non-finite solar assumption override");
        default
    }
}
