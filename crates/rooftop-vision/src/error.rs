//! Vision client error types.

use thiserror::Error;

pub type VisionResult<T> = Result<T, VisionError>;

#[derive(Debug, Error)]
pub enum VisionError {
    /// The model replied, but the reply is not a JSON object.
    #[error("JSON parsing error: {message}")]
    MalformedResponse { message: String, raw: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Vision service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl VisionError {
    pub fn malformed(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            raw: raw.into(),
        }
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    /// Check if the model replied with unparsable content.
    pub fn is_malformed(&self) -> bool {
        matches!(self, VisionError::MalformedResponse { .. })
    }

    /// Raw model output, when the failure happened after a reply arrived.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            VisionError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            VisionError::MalformedResponse { .. } => "malformed_response",
            VisionError::Authentication(_) => "authentication",
            VisionError::RateLimited(_) => "rate_limited",
            VisionError::Service { .. } => "service",
            VisionError::UnexpectedResponse(_) => "unexpected_response",
            VisionError::InvalidConfig(_) => "invalid_config",
            VisionError::Network(_) => "network",
        }
    }
}
