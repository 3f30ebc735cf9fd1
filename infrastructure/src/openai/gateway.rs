//! OpenAI LLM Gateway implementation

use crate::openai::error::OpenAiError;
use crate::openai::session::OpenAiSession;
use async_trait::async_trait;
use interview_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use interview_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Connection settings for a chat completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    /// Inline key; takes precedence over `api_key_env` when non-blank
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub temperature: f32,
    /// Per-request HTTP timeout
    pub timeout: Option<Duration>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: 0.7,
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl OpenAiSettings {
    /// The inline key, or the one found in `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
            })
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// LLM Gateway for OpenAI-compatible endpoints
///
/// A missing API key does not prevent construction: it surfaces as
/// [`GatewayError::NotConfigured`] on the first session, so calls that
/// never reach the collaborator still work without credentials.
pub struct OpenAiLlmGateway {
    client: reqwest::Client,
    settings: Arc<OpenAiSettings>,
    api_key: Option<Arc<str>>,
}

impl OpenAiLlmGateway {
    pub fn new(settings: OpenAiSettings) -> Result<Self, OpenAiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| OpenAiError::ClientBuild(e.to_string()))?;

        let api_key = settings.resolve_api_key().map(Arc::from);
        if api_key.is_none() {
            debug!(env = %settings.api_key_env, "No API key configured");
        }

        info!(base_url = %settings.base_url, "OpenAiLlmGateway initialized");

        Ok(Self {
            client,
            settings: Arc::new(settings),
            api_key,
        })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }
}

#[async_trait]
impl LlmGateway for OpenAiLlmGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| OpenAiError::MissingApiKey(self.settings.api_key_env.clone()))?;

        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.settings),
            api_key,
            model.clone(),
            system_prompt.to_string(),
        )))
    }
}
