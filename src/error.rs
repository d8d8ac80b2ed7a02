use thiserror::Error;

/// Main error type for the orchestration fabric
#[derive(Error, Debug)]
pub enum AgentryError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Plugin loading errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plugin load error: {0}")]
    PluginLoad(String),

    // Orchestration errors
    #[error("No agents found capable of handling task type: {0}")]
    NoCapableAgent(String),

    #[error("Agent execution failed: {0}")]
    AgentExecution(String),

    #[error("Agent initialization failed: {0}")]
    AgentInit(String),

    // Communication hub errors (recovered internally, never surfaced raw)
    #[error("Routing response unparseable: {0}")]
    RoutingParse(String),

    #[error("Result synthesis failed: {0}")]
    Synthesis(String),

    #[error("Text generation failed: {0}")]
    TextGeneration(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AgentryError>;
