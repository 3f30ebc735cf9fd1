//! Single-shot chat completion session

use crate::openai::error::{OpenAiError, Result};
use crate::openai::gateway::OpenAiSettings;
use async_trait::async_trait;
use interview_application::ports::llm_gateway::{GatewayError, LlmSession};
use interview_domain::{Message, Model};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A session bound to one model and one system prompt
///
/// Every `send_conversation` call is an independent POST; nothing is kept
/// between calls.
pub struct OpenAiSession {
    client: reqwest::Client,
    settings: Arc<OpenAiSettings>,
    api_key: Arc<str>,
    model: Model,
    system_prompt: String,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        settings: Arc<OpenAiSettings>,
        api_key: Arc<str>,
        model: Model,
        system_prompt: String,
    ) -> Self {
        Self {
            client,
            settings,
            api_key,
            model,
            system_prompt,
        }
    }

    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let body = ChatRequest::new(
            self.model.as_str(),
            &self.system_prompt,
            messages,
            self.settings.temperature,
        );
        let url = self.settings.completions_url();
        debug!(model = %self.model, turns = messages.len(), "POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.as_ref())
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body_text = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(OpenAiError::from_status(status, &body_text));
        }

        parse_completion(&body_text)
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send_conversation(
        &self,
        messages: &[Message],
    ) -> std::result::Result<String, GatewayError> {
        self.complete(messages).await.map_err(GatewayError::from)
    }
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, system_prompt: &'a str, messages: &'a [Message], temperature: f32) -> Self {
        let mut wire = Vec::with_capacity(messages.len() + 1);
        if !system_prompt.is_empty() {
            wire.push(WireMessage {
                role: "system",
                content: system_prompt,
            });
        }
        wire.extend(messages.iter().map(|m| WireMessage {
            role: m.role.as_str(),
            content: &m.content,
        }));
        Self {
            model,
            messages: wire,
            temperature,
        }
    }
}

/// Response body of `/chat/completions`
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Extract the first choice's text.
fn parse_completion(body: &str) -> Result<String> {
    let completion: ChatCompletion =
        serde_json::from_str(body).map_err(|e| OpenAiError::ParseError {
            error: e.to_string(),
            raw: body.to_string(),
        })?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(OpenAiError::EmptyChoice)
}
