//! Agent lifecycle status

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Lifecycle state of an agent.
///
/// `Initializing → Ready ⇄ Running → Ready | Error`; `Shutdown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentStatus {
    Initializing,
    Ready,
    Running,
    Error,
    Shutdown,
}

impl AgentStatus {
    /// Ready to accept a task right now
    pub fn is_ready(&self) -> bool {
        matches!(self, AgentStatus::Ready)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentStatus::Shutdown)
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Initializing => write!(f, "INITIALIZING"),
            AgentStatus::Ready => write!(f, "READY"),
            AgentStatus::Running => write!(f, "RUNNING"),
            AgentStatus::Error => write!(f, "ERROR"),
            AgentStatus::Shutdown => write!(f, "SHUTDOWN"),
        }
    }
}

/// Interior-mutable status slot shared by agent implementations.
///
/// Agents are held as `Arc<dyn Agent>` by the registry, so lifecycle methods
/// take `&self`; the cell gives them a place to record status transitions.
/// `Shutdown` is sticky: once set, later transitions are ignored.
#[derive(Debug)]
pub struct StatusCell {
    inner: RwLock<AgentStatus>,
}

impl StatusCell {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AgentStatus::Initializing),
        }
    }

    pub fn get(&self) -> AgentStatus {
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set(&self, status: AgentStatus) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if guard.is_terminal() {
            return;
        }
        *guard = status;
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}
