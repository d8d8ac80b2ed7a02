//! Shared data entries — the global last-writer-wins table

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One slot in the shared-data table, written by any agent, readable by all
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedDataEntry {
    pub data: Value,
    pub source_agent: String,
    /// ISO-8601 write timestamp
    pub timestamp: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub data_type: String,
}

impl SharedDataEntry {
    pub fn new(data: Value, source_agent: impl Into<String>, metadata: Map<String, Value>) -> Self {
        let data_type = extract_data_type(&metadata);
        Self {
            data,
            source_agent: source_agent.into(),
            timestamp: Utc::now().to_rfc3339(),
            metadata,
            data_type,
        }
    }
}

/// Declared type of a shared-data write, read from `metadata["dataType"]`
fn extract_data_type(metadata: &Map<String, Value>) -> String {
    metadata
        .get("dataType")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}
