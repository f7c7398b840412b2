//! Axum HTTP API for rooftop solar analysis.
//!
//! This crate provides:
//! - Image upload and analysis endpoint
//! - Offline estimate endpoint for a supplied analysis record
//! - Rate limiting, security headers and request logging
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use pipeline::{run_analysis, AnalysisOutcome};
pub use routes::create_router;
pub use state::AppState;
