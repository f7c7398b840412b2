//! Application state.

use std::sync::Arc;

use rooftop_models::SolarAssumptions;
use rooftop_vision::{OpenRouterClient, RoofAnalyzer, VisionConfig, VisionResult};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Everything here is read-only; concurrent analyses share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub assumptions: Arc<SolarAssumptions>,
    pub analyzer: Arc<dyn RoofAnalyzer>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        assumptions: SolarAssumptions,
        analyzer: Arc<dyn RoofAnalyzer>,
    ) -> Self {
        Self {
            config,
            assumptions: Arc::new(assumptions),
            analyzer,
        }
    }

    /// Create state backed by the OpenRouter client.
    pub fn from_env(config: ApiConfig) -> VisionResult<Self> {
        let client = OpenRouterClient::new(VisionConfig::from_env())?;
        Ok(Self::new(config, SolarAssumptions::from_env(), Arc::new(client)))
    }
}
