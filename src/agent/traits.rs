//! Agent trait — the capability-check/execute contract
//!
//! The agent set is open-ended: implementations arrive from the compiled-in
//! registry or from plugin manifests at runtime, so dispatch is over trait
//! objects registered into the `AgentRegistry` lookup table.

use async_trait::async_trait;

use crate::domain::{AgentResult, Task};
use crate::error::Result;

use super::config::AgentConfig;
use super::context::ExecutionContext;
use super::status::AgentStatus;

/// Capability-polymorphic interface implemented by every analytical unit.
///
/// Contract:
/// - `can_handle` is a pure predicate with no side effects.
/// - `execute` may write to the context store but must always return exactly
///   one `AgentResult`; internal failures become a failure result, they never
///   escape the method. The orchestrator additionally isolates panics.
/// - `shutdown` is terminal and irreversible.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Unique name of this agent (unique across all registered agents)
    fn name(&self) -> &str;

    /// Human-readable description of the agent's capabilities
    fn description(&self) -> &str;

    /// Pure capability predicate for the given task
    fn can_handle(&self, task: &Task) -> bool;

    /// Execute the task with the given per-invocation context
    async fn execute(&self, task: &Task, ctx: &ExecutionContext) -> AgentResult;

    /// Current lifecycle status
    fn status(&self) -> AgentStatus;

    /// Initialize with configuration; moves the agent to `Ready` on success
    async fn initialize(&self, config: AgentConfig) -> Result<()>;

    /// Release resources; the agent is `Shutdown` afterwards
    async fn shutdown(&self);

    /// Current configuration, if initialized
    fn config(&self) -> Option<AgentConfig>;
}
