//! Recommendations — queued suggestions that one agent act on another's data

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
}

/// A queued suggestion delivered to one target agent's inbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub rec_type: String,
    pub title: String,
    pub description: String,
    /// Agent suggested to act on this recommendation
    pub suggested_agent: String,
    pub action: String,
    pub priority: RecommendationPriority,
    pub data_keys: Vec<String>,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl Recommendation {
    pub fn new(
        rec_type: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        suggested_agent: impl Into<String>,
        action: impl Into<String>,
        priority: RecommendationPriority,
    ) -> Self {
        let rec_type = rec_type.into();
        Self {
            id: format!("{}-{}", rec_type, Uuid::new_v4()),
            rec_type,
            title: title.into(),
            description: description.into(),
            suggested_agent: suggested_agent.into(),
            action: action.into(),
            priority,
            data_keys: Vec::new(),
            parameters: Map::new(),
        }
    }

    pub fn with_data_keys(mut self, keys: Vec<String>) -> Self {
        self.data_keys = keys;
        self
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }
}
