//! Template agent — implementation skeleton for new analytical units
//!
//! Shows the full contract: configuration-driven task types, status
//! transitions, failure capture, and collaborative writes into the shared
//! context store.

use async_trait::async_trait;
use serde_json::{json, Map};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::agent::{Agent, AgentConfig, AgentStatus, ExecutionContext, StatusCell};
use crate::context::ContextStore;
use crate::domain::{AgentResult, Task};
use crate::error::Result;

pub struct TemplateAgent {
    /// Shared store for publishing results to collaborating agents
    store: Option<Arc<ContextStore>>,
    status: StatusCell,
    config: Mutex<Option<AgentConfig>>,
}

impl TemplateAgent {
    pub fn new() -> Self {
        Self {
            store: None,
            status: StatusCell::new(),
            config: Mutex::new(None),
        }
    }

    pub fn with_store(store: Arc<ContextStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    fn task_types(&self) -> Vec<String> {
        self.config
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|c| c.property_or("taskTypes", vec!["TEMPLATE".to_string()]))
            .unwrap_or_else(|| vec!["TEMPLATE".to_string()])
    }
}

impl Default for TemplateAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for TemplateAgent {
    fn name(&self) -> &str {
        "template"
    }

    fn description(&self) -> &str {
        "Skeleton agent demonstrating the execute contract and store writes"
    }

    fn can_handle(&self, task: &Task) -> bool {
        self.task_types().iter().any(|t| t == &task.task_type)
    }

    async fn execute(&self, task: &Task, ctx: &ExecutionContext) -> AgentResult {
        self.status.set(AgentStatus::Running);

        // A real agent would do its analysis here; failures are captured
        // into a failure result rather than escaping the boundary.
        let outcome = self.run_inner(task, ctx).await;
        let result = match outcome {
            Ok(data) => AgentResult::success(&task.id, self.name(), data),
            Err(e) => {
                warn!(task_id = %task.id, error = %e, "template agent failed");
                AgentResult::failure(&task.id, self.name(), e.to_string())
            }
        };

        self.status.set(AgentStatus::Ready);
        result
    }

    fn status(&self) -> AgentStatus {
        self.status.get()
    }

    async fn initialize(&self, config: AgentConfig) -> Result<()> {
        debug!(agent = %config.name, "initializing template agent");
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

impl TemplateAgent {
    async fn run_inner(
        &self,
        task: &Task,
        ctx: &ExecutionContext,
    ) -> Result<serde_json::Value> {
        let summary = json!({
            "taskType": task.task_type,
            "handled": true,
            "session": ctx.session_id,
        });

        // Publish for collaborators when a store is wired in
        if let Some(store) = &self.store {
            let mut meta = Map::new();
            meta.insert("dataType".into(), json!("template-output"));
            store
                .store_shared_data(&format!("template:{}", task.id), summary.clone(), self.name(), meta)
                .await;
        }

        Ok(summary)
    }
}
