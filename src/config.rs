use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub plugins: PluginConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub hub: HubConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PluginConfig {
    /// Directory scanned for agent manifest files; absent = built-ins only
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API key; empty disables generation (placeholder responses)
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Request timeout
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "http://localhost:4891/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt4all-j".to_string()
}

fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("AGENTRY_LLM_API_KEY").unwrap_or_default(),
            base_url: std::env::var("AGENTRY_LLM_BASE_URL")
                .unwrap_or_else(|_| default_llm_base_url()),
            model: std::env::var("AGENTRY_LLM_MODEL").unwrap_or_else(|_| default_llm_model()),
            timeout_secs: default_llm_timeout(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HubConfig {
    /// Conversation history kept per agent id
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Token budget for routing responses
    #[serde(default = "default_routing_tokens")]
    pub routing_max_tokens: u32,
    /// Token budget for synthesis responses
    #[serde(default = "default_synthesis_tokens")]
    pub synthesis_max_tokens: u32,
    /// Sampling temperature for both hub calls
    #[serde(default = "default_hub_temperature")]
    pub temperature: f32,
}

fn default_history_limit() -> usize {
    100
}

fn default_routing_tokens() -> u32 {
    512
}

fn default_synthesis_tokens() -> u32 {
    768
}

fn default_hub_temperature() -> f32 {
    0.3
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            routing_max_tokens: default_routing_tokens(),
            synthesis_max_tokens: default_synthesis_tokens(),
            temperature: default_hub_temperature(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Layered load: optional TOML file, then `AGENTRY_*` env overrides
    /// (e.g. `AGENTRY_LLM__API_KEY`)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(Environment::with_prefix("AGENTRY").separator("__"))
            .build()?
            .try_deserialize()
    }
}
