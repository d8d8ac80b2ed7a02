//! HTTP text-generation client (OpenAI-style chat completions)
//!
//! Degradation contract: an unconfigured client (no API key) answers with a
//! clearly-labeled placeholder string instead of erroring, so the hub keeps
//! working offline; transport failures surface as `TextGeneration` errors
//! that the hub recovers from with its own fallback policies.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::error::{AgentryError, Result};

/// External text-generation collaborator. Safe to call from any number of
/// concurrent hub operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: String,
}

pub struct HttpTextGenerator {
    config: LlmConfig,
    client: Client,
}

impl HttpTextGenerator {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(LlmConfig::from_env())
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        if !self.config.is_configured() {
            warn!("text generation unavailable: no API key configured");
            return Ok(format!(
                "[text generation unavailable] model {} is not configured",
                self.config.model
            ));
        }

        debug!(
            prompt_len = prompt.len(),
            max_tokens, temperature, "sending generation request"
        );

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AgentryError::TextGeneration(format!(
                "generation endpoint returned {}",
                response.status()
            )));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AgentryError::TextGeneration("response contained no choices".into()))
    }
}
