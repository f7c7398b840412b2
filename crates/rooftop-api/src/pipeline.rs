//! Image → analysis → estimate pipeline.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use rooftop_models::{
    estimate_profile, AnalysisReport, NumericEstimate, QualitativeAnalysis, RoofProfile,
    SolarAssumptions,
};
use rooftop_vision::{RoofAnalyzer, VisionResult};

use crate::metrics;

/// Everything produced for one rooftop.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub analysis: QualitativeAnalysis,
    pub profile: RoofProfile,
    pub estimate: NumericEstimate,
    pub report: AnalysisReport,
}

impl AnalysisOutcome {
    /// Estimate from an analysis that is already in hand.
    pub fn from_analysis(analysis: QualitativeAnalysis, assumptions: &SolarAssumptions) -> Self {
        let profile = analysis.profile();
        let estimate = estimate_profile(assumptions, profile);
        let report = AnalysisReport::new(&analysis, &estimate, assumptions);

        Self {
            analysis,
            profile,
            estimate,
            report,
        }
    }
}

/// Run one image through the analyzer and the estimation engine.
///
/// Exactly one analyzer call is made; its failure is returned as-is.
pub async fn run_analysis(
    analyzer: &dyn RoofAnalyzer,
    assumptions: &SolarAssumptions,
    image: &[u8],
) -> VisionResult<AnalysisOutcome> {
    let start = Instant::now();
    let result = analyzer.analyze_image(image).await;
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(analysis) => {
            metrics::record_analysis("success", elapsed);
            let outcome = AnalysisOutcome::from_analysis(analysis, assumptions);
            info!(
                image_bytes = image.len(),
                sunlight = %outcome.profile.sunlight,
                usable_area = %outcome.profile.usable_area,
                panels = outcome.estimate.panel_count,
                duration_ms = (elapsed * 1000.0) as u64,
                "Rooftop analysis completed"
            );
            Ok(outcome)
        }
        Err(e) => {
            metrics::record_analysis(e.kind(), elapsed);
            warn!(error = %e, kind = e.kind(), "Rooftop analysis failed");
            Err(e)
        }
    }
}
