//! Per-agent configuration

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration handed to an agent at initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl AgentConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Map::new(),
            enabled: true,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Typed property lookup with a fallback
    pub fn property_or<T: serde::de::DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.properties
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_property_lookup_falls_back() {
        let config = AgentConfig::new("echo").with_property("retries", json!(3));
        assert_eq!(config.property_or("retries", 0u32), 3);
        assert_eq!(config.property_or("missing", 7u32), 7);
        assert_eq!(config.property_or("retries", "x".to_string()), "x");
    }
}
