//! ExecutionContext — per-invocation bag passed to `Agent::execute`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Context owned by the caller for the duration of one orchestrator call.
///
/// Not persisted; cloned per task when a batch fans out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(default)]
    pub shared_data: Map<String, Value>,
    #[serde(default)]
    pub configuration: Map<String, Value>,
}

impl ExecutionContext {
    pub fn new(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            user_id: Some(user_id.into()),
            shared_data: Map::new(),
            configuration: Map::new(),
        }
    }

    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.shared_data.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.shared_data.get(key)
    }
}
