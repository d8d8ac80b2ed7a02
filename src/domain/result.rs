//! AgentResult — the single outcome value produced per task execution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result returned by an agent after processing a task.
///
/// Created exactly once per execution via [`AgentResult::success`] or
/// [`AgentResult::failure`]; a failure carries no data, only a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub task_id: String,
    pub agent_name: String,
    pub success: bool,
    pub data: Option<Value>,
    pub message: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    pub completed_at: DateTime<Utc>,
    pub execution_time_ms: u64,
}

impl AgentResult {
    pub fn success(
        task_id: impl Into<String>,
        agent_name: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            agent_name: agent_name.into(),
            success: true,
            data: Some(data),
            message: None,
            metadata: None,
            completed_at: Utc::now(),
            execution_time_ms: 0,
        }
    }

    pub fn failure(
        task_id: impl Into<String>,
        agent_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            agent_name: agent_name.into(),
            success: false,
            data: None,
            message: Some(message.into()),
            metadata: None,
            completed_at: Utc::now(),
            execution_time_ms: 0,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
