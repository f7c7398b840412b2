//! Human-readable report formatting.

use schemars::JsonSchema;
use serde::Serialize;

use crate::analysis::QualitativeAnalysis;
use crate::assumptions::SolarAssumptions;
use crate::estimate::NumericEstimate;

/// Placeholder for a field the model did not return.
pub const NOT_AVAILABLE: &str = "N/A";

const DISCLAIMER: &[&str] = &[
    "These calculations are simplified and based on hypothetical averages and qualitative AI assessments. For precise figures, a real-world tool would require:",
    "- Exact roof dimensions and angles (from precise image processing or CAD data).",
    "- Detailed local solar irradiance data (from geographical APIs).",
    "- Real-time local electricity rates and incentive programs.",
    "- Specific solar panel models and up-to-date installation costs.",
];

/// Display strings for one analysis and its estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct AnalysisReport {
    pub roof_shape: String,
    pub main_obstacles: String,
    pub sunlight_exposure: String,
    pub usable_area: String,
    pub overall_assessment: String,
    pub usable_area_sq_ft: String,
    pub panel_count: String,
    pub system_size: String,
    pub yearly_energy: String,
    pub system_cost: String,
    pub yearly_savings: String,
    pub payback_period: String,
    pub notes: Vec<String>,
}

impl AnalysisReport {
    pub fn new(
        analysis: &QualitativeAnalysis,
        estimate: &NumericEstimate,
        assumptions: &SolarAssumptions,
    ) -> Self {
        let currency = &assumptions.currency_symbol;

        let main_obstacles = match analysis.main_obstacles.as_deref() {
            Some(items) if !items.is_empty() => items.join(", "),
            _ => "None".to_string(),
        };

        Self {
            roof_shape: verbatim(analysis.roof_shape.as_deref()),
            main_obstacles,
            sunlight_exposure: capitalized(analysis.sunlight_exposure.as_deref()),
            usable_area: capitalized(analysis.usable_area_qualitative.as_deref()),
            overall_assessment: verbatim(analysis.overall_assessment.as_deref()),
            usable_area_sq_ft: format!("{:.0} sq ft", f64::from(estimate.usable_area_sq_ft)),
            panel_count: estimate.panel_count.to_string(),
            system_size: format!("{:.2} kW", estimate.system_size_kw),
            yearly_energy: format!("{:.0} kWh", estimate.yearly_kwh),
            system_cost: format!("{}{:.2}", currency, estimate.system_cost),
            yearly_savings: format!("{}{:.2}", currency, estimate.yearly_savings),
            payback_period: estimate.roi_years.to_string(),
            notes: DISCLAIMER.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Render the full plain-text report.
    pub fn render_text(&self) -> String {
        let mut lines = vec![
            "Rooftop Analysis:".to_string(),
            format!("  Roof Shape: {}", self.roof_shape),
            format!("  Main Obstacles: {}", self.main_obstacles),
            format!("  Sunlight Exposure: {}", self.sunlight_exposure),
            format!("  Usable Area (Qualitative): {}", self.usable_area),
            format!("  Overall Assessment: {}", self.overall_assessment),
            String::new(),
            "Simplified Solar Potential Estimates:".to_string(),
            format!("  Estimated Usable Roof Area: {}", self.usable_area_sq_ft),
            format!("  Estimated Optimal Panel Count: {}", self.panel_count),
            format!("  Estimated System Size: {}", self.system_size),
            format!("  Estimated Yearly Energy Production: {}", self.yearly_energy),
            format!("  Estimated System Cost: {}", self.system_cost),
            format!("  Estimated Yearly Savings: {}", self.yearly_savings),
            format!("  Estimated ROI (Payback Period): {}", self.payback_period),
            String::new(),
            "Important Note on Estimates:".to_string(),
        ];
        lines.extend(self.notes.iter().cloned());
        lines.join("\n")
    }
}

fn verbatim(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn capitalized(value: Option<&str>) -> String {
    value.map(capitalize).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
