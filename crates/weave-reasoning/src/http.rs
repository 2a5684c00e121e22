//! HTTP reasoning backend
//!
//! Speaks the OpenAI-compatible chat-completions protocol: one user
//! message per instruction, first choice's content is the reply. No
//! retries and no streaming; a failed call surfaces as a
//! [`ReasoningError`] for the stage to handle.

use crate::client::{Reasoner, ReasoningError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for the HTTP backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpReasonerConfig {
    /// Base URL, e.g. `https://api.openai.com/v1`
    pub endpoint: String,
    /// Model identifier, e.g. `gpt-4o-mini`
    pub model: String,
    /// Bearer token
    pub api_key: String,
}

impl HttpReasonerConfig {
    /// Create a configuration
    #[inline]
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// With a different model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

/// Reasoner backed by an OpenAI-compatible HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpReasoner {
    http: reqwest::Client,
    config: HttpReasonerConfig,
}

impl HttpReasoner {
    /// Create a reasoner with a fresh HTTP client
    #[inline]
    #[must_use]
    pub fn new(config: HttpReasonerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HttpReasonerConfig {
        &self.config
    }
}

#[async_trait]
impl Reasoner for HttpReasoner {
    async fn complete(&self, instruction: &str) -> Result<String, ReasoningError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: instruction.to_string(),
            }],
        };

        tracing::debug!(model = %self.config.model, chars = instruction.len(), "reasoning call");

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReasoningError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: ChatResponse = response.json().await?;
        decoded
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ReasoningError::MissingCompletion)
    }
}

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// One chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat-completions response body (the fields we consume)
#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
