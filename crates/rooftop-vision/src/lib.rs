//! Client for hosted vision models.
//!
//! This crate turns a rooftop image into a [`QualitativeAnalysis`] by asking
//! an OpenAI-compatible chat-completion endpoint (OpenRouter by default) for
//! a JSON assessment. Callers depend on the [`RoofAnalyzer`] trait so the
//! estimation pipeline can run without network access.
//!
//! [`QualitativeAnalysis`]: rooftop_models::QualitativeAnalysis

pub mod analyzer;
pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod prompt;
pub mod types;

pub use analyzer::{RoofAnalyzer, StaticAnalyzer};
pub use client::{parse_analysis, OpenRouterClient};
pub use config::VisionConfig;
pub use encoding::{encode_image, sniff_mime, EncodedImage};
pub use error::{VisionError, VisionResult};
