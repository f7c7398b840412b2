//! Rooftop analysis capability.

use async_trait::async_trait;

use rooftop_models::QualitativeAnalysis;

use crate::client::OpenRouterClient;
use crate::error::VisionResult;

/// Anything that can turn a rooftop image into a qualitative analysis.
#[async_trait]
pub trait RoofAnalyzer: Send + Sync {
    async fn analyze_image(&self, image: &[u8]) -> VisionResult<QualitativeAnalysis>;

    /// Whether the analyzer can currently serve requests.
    fn is_ready(&self) -> bool {
        true
    }
}

#[async_trait]
impl RoofAnalyzer for OpenRouterClient {
    async fn analyze_image(&self, image: &[u8]) -> VisionResult<QualitativeAnalysis> {
        self.analyze_bytes(image).await
    }

    fn is_ready(&self) -> bool {
        self.config().has_api_key()
    }
}

type Responder = dyn Fn(&[u8]) -> VisionResult<QualitativeAnalysis> + Send + Sync;

/// Analyzer answering from a closure instead of the network.
pub struct StaticAnalyzer {
    respond: Box<Responder>,
}

impl StaticAnalyzer {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&[u8]) -> VisionResult<QualitativeAnalysis> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
        }
    }

    /// Always return the given analysis.
    pub fn returning(analysis: QualitativeAnalysis) -> Self {
        Self::new(move |_| Ok(analysis.clone()))
    }
}

#[async_trait]
impl RoofAnalyzer for StaticAnalyzer {
    async fn analyze_image(&self, image: &[u8]) -> VisionResult<QualitativeAnalysis> {
        (self.respond)(image)
    }
}
