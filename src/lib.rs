pub mod agent;
pub mod agents;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod hub;
pub mod llm;
pub mod orchestrator;
pub mod plugin;
pub mod registry;

pub use agent::{Agent, AgentConfig, AgentStatus, ExecutionContext, StatusCell};
pub use config::{AppConfig, HubConfig, LlmConfig, LoggingConfig, PluginConfig};
pub use context::{
    CapabilityTable, ContextStore, Recommendation, RecommendationPriority, SharedDataEntry,
    Workflow, WorkflowStatus,
};
pub use domain::{AgentResult, Task, TaskPriority};
pub use error::{AgentryError, Result};
pub use hub::{
    AgentCapability, AgentMessage, AgentOutput, Collaboration, CommunicationHub,
    CommunicationResult,
};
pub use llm::{HttpTextGenerator, TextGenerator};
pub use orchestrator::{LoggingNotifier, Orchestrator, TaskNotifier};
pub use plugin::{AgentFactory, ManifestAgent, PluginLoader, PluginManifest};
pub use registry::AgentRegistry;
