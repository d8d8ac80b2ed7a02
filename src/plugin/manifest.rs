//! Plugin manifests — declarative agents loaded from a watched directory
//!
//! A manifest is one JSON file declaring an agent: the task types it
//! handles, its capability strings, and a response template. The loader
//! materializes each manifest as a [`ManifestAgent`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Mutex;

use crate::agent::{Agent, AgentConfig, AgentStatus, ExecutionContext, StatusCell};
use crate::domain::{AgentResult, Task};
use crate::error::{AgentryError, Result};

/// On-disk plugin declaration
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Task types this agent answers
    pub task_types: Vec<String>,
    /// Capability strings (advertised through the registry, usable by hub
    /// descriptor registration)
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Template returned as the result data; the task id and type are
    /// attached alongside
    #[serde(default)]
    pub response: Option<Value>,
}

impl PluginManifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let manifest: PluginManifest = serde_json::from_str(&raw)?;
        if manifest.name.is_empty() {
            return Err(AgentryError::PluginLoad(format!(
                "manifest {} has an empty agent name",
                path.display()
            )));
        }
        if manifest.task_types.is_empty() {
            return Err(AgentryError::PluginLoad(format!(
                "manifest {} declares no task types",
                path.display()
            )));
        }
        Ok(manifest)
    }
}

/// Declarative agent backed by a manifest file
pub struct ManifestAgent {
    manifest: PluginManifest,
    status: StatusCell,
    config: Mutex<Option<AgentConfig>>,
}

impl ManifestAgent {
    pub fn new(manifest: PluginManifest) -> Self {
        Self {
            manifest,
            status: StatusCell::new(),
            config: Mutex::new(None),
        }
    }

    pub fn capabilities(&self) -> &[String] {
        &self.manifest.capabilities
    }
}

#[async_trait]
impl Agent for ManifestAgent {
    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn description(&self) -> &str {
        &self.manifest.description
    }

    fn can_handle(&self, task: &Task) -> bool {
        self.manifest
            .task_types
            .iter()
            .any(|t| t == &task.task_type)
    }

    async fn execute(&self, task: &Task, _ctx: &ExecutionContext) -> AgentResult {
        self.status.set(AgentStatus::Running);
        let response = self
            .manifest
            .response
            .clone()
            .unwrap_or_else(|| json!(format!("Handled by {}", self.manifest.name)));
        let result = AgentResult::success(
            &task.id,
            self.name(),
            json!({
                "response": response,
                "taskType": task.task_type,
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
    async fn manifest_agent_answers_declared_types() {
        let manifest: PluginManifest = serde_json::from_value(json!({
            "name": "translator",
            "description": "translates text",
            "task_types": ["TRANSLATE"],
            "capabilities": ["natural-language"],
            "response": {"lang": "en"},
        }))
        .unwrap();
        let agent = ManifestAgent::new(manifest);
        agent.initialize(AgentConfig::new("translator")).await.unwrap();

        assert!(agent.can_handle(&Task::probe("TRANSLATE")));
        assert!(!agent.can_handle(&Task::probe("PING")));

        let task = Task::probe("TRANSLATE");
        let result = agent.execute(&task, &ExecutionContext::default()).await;
        assert!(result.success);
        assert_eq!(result.data.unwrap()["response"], json!({"lang": "en"}));
    }
}
