//! Workflow records — tracked multi-agent processes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkflowStatus {
    Active,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStatus::Active => write!(f, "ACTIVE"),
            WorkflowStatus::Paused => write!(f, "PAUSED"),
            WorkflowStatus::Completed => write!(f, "COMPLETED"),
            WorkflowStatus::Failed => write!(f, "FAILED"),
            WorkflowStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A tracked multi-agent process; `updated_at` refreshes on every status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub participating_agents: Vec<String>,
    /// Free-form description of how data moves between participants
    #[serde(default)]
    pub data_flow: Option<Value>,
    pub status: WorkflowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        participating_agents: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            participating_agents,
            data_flow: None,
            status: WorkflowStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_data_flow(mut self, data_flow: Value) -> Self {
        self.data_flow = Some(data_flow);
        self
    }
}
