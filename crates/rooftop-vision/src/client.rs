//! OpenRouter chat-completion client.

use reqwest::Client;
use tracing::{debug, info, warn};

use rooftop_models::QualitativeAnalysis;

use crate::config::VisionConfig;
use crate::encoding::{encode_image, EncodedImage};
use crate::error::{VisionError, VisionResult};
use crate::prompt::ROOF_ANALYSIS_PROMPT;
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
    ResponseFormat,
};

/// Client for an OpenAI-compatible vision endpoint.
///
/// Each analysis is a single request. Nothing is retried.
pub struct OpenRouterClient {
    http: Client,
    config: VisionConfig,
}

impl OpenRouterClient {
    /// Create a new client.
    pub fn new(config: VisionConfig) -> VisionResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VisionError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> VisionResult<Self> {
        Self::new(VisionConfig::from_env())
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Analyze raw image bytes.
    pub async fn analyze_bytes(&self, image: &[u8]) -> VisionResult<QualitativeAnalysis> {
        self.analyze_encoded(&encode_image(image)).await
    }

    /// Analyze an already encoded image.
    pub async fn analyze_encoded(&self, image: &EncodedImage) -> VisionResult<QualitativeAnalysis> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            VisionError::authentication("OPENROUTER_API_KEY is not set")
        })?;

        let url = self.config.completions_url();
        let request = self.build_request(image);

        info!(
            model = %self.config.model,
            mime = image.mime,
            payload_bytes = image.base64.len(),
            "Requesting rooftop analysis"
        );

        let mut builder = self.http.post(&url).bearer_auth(api_key).json(&request);
        if let Some(referer) = &self.config.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.app_title {
            builder = builder.header("X-Title", title);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), body));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            VisionError::unexpected(format!("Unreadable completion envelope: {}", e))
        })?;

        if let Some(error) = completion.error {
            return Err(status_error(error.status().unwrap_or(502), error.message));
        }

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| VisionError::unexpected("No content in completion response"))?;

        debug!(content_len = content.len(), "Received rooftop analysis");

        parse_analysis(&content)
    }

    fn build_request(&self, image: &EncodedImage) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: ROOF_ANALYSIS_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_uri(),
                        },
                    },
                ],
            }],
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat::json_object(),
        }
    }
}

/// Parse model output into an analysis record.
///
/// Surrounding whitespace and a Markdown code fence are tolerated. On failure
/// the error carries the unmodified text.
pub fn parse_analysis(content: &str) -> VisionResult<QualitativeAnalysis> {
    let text = content.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);

    QualitativeAnalysis::from_json_str(text.trim()).map_err(|e| {
        warn!(error = %e, "Vision model returned malformed JSON");
        VisionError::malformed(e.to_string(), content)
    })
}

fn status_error(status: u16, body: String) -> VisionError {
    match status {
        401 | 403 => VisionError::Authentication(body),
        429 => VisionError::RateLimited(body),
        _ => VisionError::Service { status, body },
    }
}
