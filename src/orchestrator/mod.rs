//! Orchestrator — receives a task, dispatches it to one capable agent, and
//! records the outcome
//!
//! Per-task flow: best-effort context writes → capability query → selection
//! (first `Ready` agent, else first capable agent — a documented fallback,
//! not an accident) → spawn-isolated execution → timing → result write-back
//! → completion notification. Every path returns a well-formed
//! `AgentResult`; nothing escapes as an error.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::agent::{Agent, ExecutionContext};
use crate::context::ContextStore;
use crate::domain::{AgentResult, Task};
use crate::error::{AgentryError, Result};
use crate::registry::AgentRegistry;

/// Result name used when no agent produced the outcome
const ORCHESTRATOR_NAME: &str = "orchestrator";

/// Task-completion hook. Fire-and-forget: the orchestrator logs a failed
/// notification and moves on.
#[async_trait]
pub trait TaskNotifier: Send + Sync {
    async fn notify(&self, task: &Task, result: &AgentResult) -> Result<()>;
}

/// Default hook: structured log lines only
pub struct LoggingNotifier;

#[async_trait]
impl TaskNotifier for LoggingNotifier {
    async fn notify(&self, task: &Task, result: &AgentResult) -> Result<()> {
        info!(
            task_id = %task.id,
            agent = %result.agent_name,
            success = result.success,
            "task completed"
        );
        Ok(())
    }
}

pub struct Orchestrator {
    registry: Arc<AgentRegistry>,
    store: Arc<ContextStore>,
    notifier: Arc<dyn TaskNotifier>,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<AgentRegistry>,
        store: Arc<ContextStore>,
        notifier: Arc<dyn TaskNotifier>,
    ) -> Self {
        Self {
            registry,
            store,
            notifier,
        }
    }

    /// Process one task; always returns a result, never an error
    pub async fn process_task(&self, task: Task, ctx: ExecutionContext) -> AgentResult {
        info!(task_id = %task.id, task_type = %task.task_type, "processing task");
        let start = Instant::now();

        // Best-effort task metadata; correctness does not depend on it
        self.store
            .store_context(&task.id, "taskType", json!(task.task_type))
            .await;
        self.store
            .store_context(&task.id, "startTime", json!(task.created_at.to_rfc3339()))
            .await;

        let capable = self.registry.get_capable_agents(&task.task_type).await;
        if capable.is_empty() {
            warn!(task_type = %task.task_type, "no capable agents");
            let mut result = AgentResult::failure(
                &task.id,
                ORCHESTRATOR_NAME,
                AgentryError::NoCapableAgent(task.task_type.clone()).to_string(),
            );
            result.execution_time_ms = start.elapsed().as_millis() as u64;
            self.record_outcome(&task, &result).await;
            self.notify(&task, &result).await;
            return result;
        }

        let selected = Self::select_agent(&capable);
        debug!(task_id = %task.id, agent = selected.name(), "agent selected");

        // Execute on a separate task so a panicking agent is converted into
        // a failure result instead of unwinding into the caller.
        let agent = selected.clone();
        let exec_task = task.clone();
        let exec_ctx = ctx.clone();
        let outcome =
            tokio::spawn(async move { agent.execute(&exec_task, &exec_ctx).await }).await;

        let mut result = match outcome {
            Ok(result) => result,
            Err(e) => {
                error!(task_id = %task.id, agent = selected.name(), error = %e, "agent execution escaped");
                AgentResult::failure(
                    &task.id,
                    selected.name(),
                    AgentryError::AgentExecution(e.to_string()).to_string(),
                )
            }
        };
        result.execution_time_ms = start.elapsed().as_millis() as u64;

        self.record_outcome(&task, &result).await;
        self.notify(&task, &result).await;

        info!(
            task_id = %task.id,
            agent = %result.agent_name,
            elapsed_ms = result.execution_time_ms,
            success = result.success,
            "task finished"
        );
        result
    }

    /// Fan N tasks out to N independent single-task invocations. Results
    /// preserve input order; one task's failure never cancels the others.
    pub async fn process_tasks(
        &self,
        tasks: Vec<Task>,
        ctx: ExecutionContext,
    ) -> Vec<AgentResult> {
        info!(count = tasks.len(), "processing task batch");
        let futures = tasks
            .into_iter()
            .map(|task| self.process_task(task, ctx.clone()));
        join_all(futures).await
    }

    /// First `Ready` agent wins; otherwise fall back to the first capable
    /// agent regardless of status.
    fn select_agent(capable: &[Arc<dyn Agent>]) -> Arc<dyn Agent> {
        capable
            .iter()
            .find(|agent| agent.status().is_ready())
            .cloned()
            .unwrap_or_else(|| capable[0].clone())
    }

    async fn record_outcome(&self, task: &Task, result: &AgentResult) {
        let serialized = serde_json::to_value(result).unwrap_or(Value::Null);
        self.store.store_context(&task.id, "result", serialized).await;
        self.store
            .store_context(&task.id, "executedBy", json!(result.agent_name))
            .await;
        let status = if result.success { "completed" } else { "failed" };
        self.store
            .store_context(&task.id, "status", json!(status))
            .await;
        if !result.success {
            self.store
                .store_context(&task.id, "error", json!(result.message))
                .await;
        }
    }

    async fn notify(&self, task: &Task, result: &AgentResult) {
        if let Err(e) = self.notifier.notify(task, result).await {
            warn!(task_id = %task.id, error = %e, "task notification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentConfig, AgentStatus, StatusCell};
    use crate::agents::EchoAgent;
    use crate::plugin::PluginLoader;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAgent {
        name: String,
        executions: AtomicUsize,
        status: StatusCell,
    }

    impl CountingAgent {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                executions: AtomicUsize::new(0),
                status: StatusCell::new(),
            }
        }
    }

    #[async_trait]
    impl Agent for CountingAgent {
        fn name(&self) -> &str {
            &self.name
        }
        fn description(&self) -> &str {
            "counts executions"
        }
        fn can_handle(&self, task: &Task) -> bool {
            task.task_type == "COUNT"
        }
        async fn execute(&self, task: &Task, _ctx: &ExecutionContext) -> AgentResult {
            self.executions.fetch_add(1, Ordering::SeqCst);
            AgentResult::success(&task.id, &self.name, json!("counted"))
        }
        fn status(&self) -> AgentStatus {
            self.status.get()
        }
        async fn initialize(&self, _config: AgentConfig) -> Result<()> {
            self.status.set(AgentStatus::Ready);
            Ok(())
        }
        async fn shutdown(&self) {
            self.status.set(AgentStatus::Shutdown);
        }
        fn config(&self) -> Option<AgentConfig> {
            None
        }
    }

    struct PanickingAgent;

    #[async_trait]
    impl Agent for PanickingAgent {
        fn name(&self) -> &str {
            "panicker"
        }
        fn description(&self) -> &str {
            "always panics"
        }
        fn can_handle(&self, task: &Task) -> bool {
            task.task_type == "PANIC"
        }
        async fn execute(&self, _task: &Task, _ctx: &ExecutionContext) -> AgentResult {
            panic!("boom");
        }
        fn status(&self) -> AgentStatus {
            AgentStatus::Ready
        }
        async fn initialize(&self, _config: AgentConfig) -> Result<()> {
            Ok(())
        }
        async fn shutdown(&self) {}
        fn config(&self) -> Option<AgentConfig> {
            None
        }
    }

    async fn orchestrator_with(agents: Vec<Arc<dyn Agent>>) -> Orchestrator {
        let registry = Arc::new(AgentRegistry::new(PluginLoader::bare(None)));
        for agent in agents {
            registry.register_agent(agent).await;
        }
        Orchestrator::new(
            registry,
            Arc::new(ContextStore::new()),
            Arc::new(LoggingNotifier),
        )
    }

    #[tokio::test]
    async fn no_capable_agent_failure_names_task_type() {
        let orch = orchestrator_with(vec![]).await;
        let task = Task::probe("UNHANDLED");
        let result = orch.process_task(task, ExecutionContext::default()).await;

        assert!(!result.success);
        assert_eq!(result.agent_name, ORCHESTRATOR_NAME);
        assert!(result.message.unwrap().contains("UNHANDLED"));
    }

    #[tokio::test]
    async fn exactly_one_capable_agent_executes() {
        let first = Arc::new(CountingAgent::new("first"));
        let second = Arc::new(CountingAgent::new("second"));
        let orch =
            orchestrator_with(vec![first.clone() as Arc<dyn Agent>, second.clone()]).await;

        let result = orch
            .process_task(Task::probe("COUNT"), ExecutionContext::default())
            .await;

        assert!(result.success);
        let total = first.executions.load(Ordering::SeqCst)
            + second.executions.load(Ordering::SeqCst);
        assert_eq!(total, 1);
        let executed = if first.executions.load(Ordering::SeqCst) == 1 {
            "first"
        } else {
            "second"
        };
        assert_eq!(result.agent_name, executed);
    }

    #[tokio::test]
    async fn echo_ping_scenario() {
        let orch = orchestrator_with(vec![Arc::new(EchoAgent::new()) as Arc<dyn Agent>]).await;
        let task = Task::new("PING", "are you there", serde_json::Map::new());
        let result = orch.process_task(task, ExecutionContext::default()).await;

        assert!(result.success);
        assert_eq!(result.agent_name, "echo");
    }

    #[tokio::test]
    async fn panicking_agent_becomes_failure_result() {
        let orch = orchestrator_with(vec![Arc::new(PanickingAgent) as Arc<dyn Agent>]).await;
        let result = orch
            .process_task(Task::probe("PANIC"), ExecutionContext::default())
            .await;

        assert!(!result.success);
        assert_eq!(result.agent_name, "panicker");
    }

    #[tokio::test]
    async fn batch_results_preserve_order_and_isolate_failures() {
        let orch = orchestrator_with(vec![Arc::new(EchoAgent::new()) as Arc<dyn Agent>]).await;
        let tasks = vec![
            Task::probe("PING").with_id("t0"),
            Task::probe("UNHANDLED").with_id("t1"),
            Task::probe("PING").with_id("t2"),
        ];

        let results = orch.process_tasks(tasks, ExecutionContext::default()).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].task_id, "t0");
        assert!(results[0].success);
        assert_eq!(results[1].task_id, "t1");
        assert!(!results[1].success);
        assert_eq!(results[2].task_id, "t2");
        assert!(results[2].success);
    }
}
