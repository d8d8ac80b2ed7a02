//! Echo agent — the smallest complete Agent implementation
//!
//! Answers its declared task types by reflecting the task back. Used by the
//! demo binary and as the canonical capability-dispatch fixture.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;
use tracing::debug;

use crate::agent::{Agent, AgentConfig, AgentStatus, ExecutionContext, StatusCell};
use crate::domain::{AgentResult, Task};
use crate::error::Result;

pub struct EchoAgent {
    task_types: Vec<String>,
    status: StatusCell,
    config: Mutex<Option<AgentConfig>>,
}

impl EchoAgent {
    /// Handles `PING` and `ECHO` tasks by default
    pub fn new() -> Self {
        Self::with_task_types(vec!["PING".into(), "ECHO".into()])
    }

    pub fn with_task_types(task_types: Vec<String>) -> Self {
        Self {
            task_types,
            status: StatusCell::new(),
            config: Mutex::new(None),
        }
    }
}

impl Default for EchoAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for EchoAgent {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Reflects tasks back to the caller; liveness and wiring checks"
    }

    fn can_handle(&self, task: &Task) -> bool {
        self.task_types.iter().any(|t| t == &task.task_type)
    }

    async fn execute(&self, task: &Task, _ctx: &ExecutionContext) -> AgentResult {
        self.status.set(AgentStatus::Running);
        debug!(task_id = %task.id, "echoing task");
        let result = AgentResult::success(
            &task.id,
            self.name(),
            json!({
                "echo": task.description,
                "taskType": task.task_type,
                "parameters": task.parameters,
            }),
        );
        self.status.set(AgentStatus::Ready);
        result
    }

    fn status(&self) -> AgentStatus {
        self.status.get()
    }

    async fn initialize(&self, config: AgentConfig) -> Result<()> {
        *self.config.lock().unwrap_or_else(|e| e.into_inner()) = Some(config);
        self.status.set(AgentStatus::Ready);
        Ok(())
    }

    async fn shutdown(&self) {
        self.status.set(AgentStatus::Shutdown);
    }

    fn config(&self) -> Option<AgentConfig> {
        self.config
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handles_ping_and_echoes_parameters() {
        let agent = EchoAgent::new();
        agent.initialize(AgentConfig::new("echo")).await.unwrap();
        assert_eq!(agent.status(), AgentStatus::Ready);

        let task = Task::new("PING", "hello", serde_json::Map::new());
        assert!(agent.can_handle(&task));
        assert!(!agent.can_handle(&Task::probe("ANALYZE")));

        let result = agent.execute(&task, &ExecutionContext::default()).await;
        assert!(result.success);
        assert_eq!(result.agent_name, "echo");
        assert_eq!(result.data.unwrap()["echo"], json!("hello"));
        assert_eq!(agent.status(), AgentStatus::Ready);
    }

    #[tokio::test]
    async fn shutdown_is_terminal() {
        let agent = EchoAgent::new();
        agent.initialize(AgentConfig::new("echo")).await.unwrap();
        agent.shutdown().await;
        assert_eq!(agent.status(), AgentStatus::Shutdown);
    }
}
