//! Hub value types — capability descriptors, messages, and results
//!
//! An `AgentCapability` is routing metadata only; the hub reasons about
//! capabilities, never about live `Agent` instances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Lightweight routing descriptor registered with the hub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCapability {
    pub agent_id: String,
    pub description: String,
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    /// Self-declared expertise weight in `[0, 1]`
    #[serde(default)]
    pub expertise: f64,
}

impl AgentCapability {
    pub fn new(agent_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            description: description.into(),
            capabilities: Vec::new(),
            specialization: None,
            expertise: 0.5,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<&str>) -> Self {
        self.capabilities = capabilities.into_iter().map(String::from).collect();
        self
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    pub fn with_expertise(mut self, expertise: f64) -> Self {
        self.expertise = expertise;
        self
    }
}

/// Free-form task description routed through the hub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub task: String,
    #[serde(default)]
    pub context: Map<String, Value>,
    #[serde(default)]
    pub sender: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AgentMessage {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            context: Map::new(),
            sender: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }
}

/// Per-agent output from the hub's descriptor-driven execution layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    pub agent_id: String,
    pub capabilities: Vec<String>,
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

/// Combined outcome of one routed message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunicationResult {
    /// Outputs keyed by agent id
    pub agent_results: HashMap<String, AgentOutput>,
    pub synthesized: String,
    pub timestamp: DateTime<Utc>,
}

/// Multi-agent collaboration plan produced by the hub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaboration {
    pub involved_agents: Vec<String>,
    pub plan: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Schema for the model's routing answer. Parsed strictly from the first
/// JSON object in the response; anything else falls back to selecting all
/// registered descriptors.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingSelection {
    #[serde(default, alias = "primaryAgents")]
    pub primary_agents: Vec<String>,
    #[serde(default, alias = "supportingAgents")]
    pub supporting_agents: Vec<String>,
    #[serde(default, alias = "executionOrder")]
    pub execution_order: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}
