//! Shared data models for the rooftop solar analyzer.
//!
//! This crate provides:
//! - The qualitative analysis record returned by the vision model
//! - Canonical sunlight and usable-area labels
//! - Solar sizing assumptions
//! - The estimation engine that turns labels into numbers
//! - Display formatting for reports

pub mod analysis;
pub mod assumptions;
pub mod estimate;
pub mod labels;
pub mod report;

// Re-export common types
pub use analysis::{AnalysisDecodeError, QualitativeAnalysis};
pub use assumptions::SolarAssumptions;
pub use estimate::{
    estimate, estimate_profile, NumericEstimate, PaybackPeriod, ANNUAL_YIELD_KWH_PER_WP,
    PAYBACK_NOT_APPLICABLE,
};
pub use labels::{RoofProfile, SunlightExposure, UsableArea};
pub use report::{AnalysisReport, NOT_AVAILABLE};
