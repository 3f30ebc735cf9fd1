//! Error types for the OpenAI adapter

use interview_application::GatewayError;
use thiserror::Error;

/// Result type alias for OpenAI operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when talking to a chat completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("API key not found (set {0})")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed (HTTP {status})")]
    Authentication { status: u16 },

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Response contained no message content")]
    EmptyChoice,
}

impl OpenAiError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => OpenAiError::Authentication { status },
            404 => OpenAiError::ModelNotFound(body.to_string()),
            _ => OpenAiError::Status {
                status,
                body: body.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for OpenAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OpenAiError::Timeout
        } else {
            OpenAiError::Network(err.to_string())
        }
    }
}

impl From<OpenAiError> for GatewayError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::MissingApiKey(var) => {
                GatewayError::NotConfigured(format!("API key not found (set {})", var))
            }
            OpenAiError::ClientBuild(msg) => GatewayError::NotConfigured(msg),
            OpenAiError::Timeout => GatewayError::Timeout,
            OpenAiError::Network(msg) => GatewayError::ConnectionError(msg),
            OpenAiError::ModelNotFound(msg) => GatewayError::ModelNotAvailable(msg),
            OpenAiError::EmptyChoice => GatewayError::EmptyResponse,
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}
