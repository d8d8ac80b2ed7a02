//! Capability and compatibility tables — configuration data, not code
//!
//! The tables drive the store's reactive recommendation hooks: which agents
//! declare which capability strings, and which data types are considered
//! compatible with each other. Defaults cover the stock-analysis fleet the
//! demo ships with.

use serde::Deserialize;
use std::collections::HashMap;

/// Static capability/compatibility configuration consulted by the store
#[derive(Debug, Clone, Deserialize)]
pub struct CapabilityTable {
    /// agent id → declared capability strings
    #[serde(default)]
    pub agent_capabilities: HashMap<String, Vec<String>>,
    /// data type → compatible data types
    #[serde(default)]
    pub compatibility: HashMap<String, Vec<String>>,
}

impl CapabilityTable {
    pub fn empty() -> Self {
        Self {
            agent_capabilities: HashMap::new(),
            compatibility: HashMap::new(),
        }
    }

    pub fn with_agent(
        mut self,
        agent_id: impl Into<String>,
        capabilities: Vec<&'static str>,
    ) -> Self {
        self.agent_capabilities.insert(
            agent_id.into(),
            capabilities.into_iter().map(String::from).collect(),
        );
        self
    }

    pub fn with_compatibility(
        mut self,
        data_type: impl Into<String>,
        compatible: Vec<&'static str>,
    ) -> Self {
        self.compatibility.insert(
            data_type.into(),
            compatible.into_iter().map(String::from).collect(),
        );
        self
    }

    /// Agents (excluding `source_agent`) whose capability list contains the
    /// type, or any capability string that contains it as a substring.
    ///
    /// The substring rule is deliberately loose and is the documented
    /// contract; short type strings can over-match.
    pub fn compatible_agents(&self, source_agent: &str, data_type: &str) -> Vec<String> {
        let mut matches: Vec<String> = self
            .agent_capabilities
            .iter()
            .filter(|(agent, _)| agent.as_str() != source_agent)
            .filter(|(_, caps)| {
                caps.iter()
                    .any(|cap| cap == data_type || cap.contains(data_type))
            })
            .map(|(agent, _)| agent.clone())
            .collect();
        matches.sort();
        matches
    }

    /// Whether two data types are linked through the compatibility matrix
    pub fn is_compatible(&self, data_type: &str, other: &str) -> bool {
        self.compatibility
            .get(data_type)
            .map(|linked| linked.iter().any(|t| t == other))
            .unwrap_or(false)
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::empty()
            .with_agent(
                "stock-analyzer",
                vec![
                    "financial-data",
                    "time-series",
                    "market-analysis",
                    "technical-indicators",
                ],
            )
            .with_agent(
                "chart-visualizer",
                vec![
                    "data-visualization",
                    "interactive-charts",
                    "technical-charts",
                    "time-series-viz",
                ],
            )
            .with_agent(
                "risk-assessor",
                vec![
                    "risk-analysis",
                    "financial-metrics",
                    "volatility-analysis",
                    "portfolio-risk",
                ],
            )
            .with_agent(
                "technical-analyzer",
                vec![
                    "pattern-recognition",
                    "trend-analysis",
                    "signal-generation",
                    "market-indicators",
                ],
            )
            .with_agent(
                "gpt4all-chat",
                vec![
                    "natural-language",
                    "conversation",
                    "analysis-explanation",
                    "decision-support",
                ],
            )
            .with_compatibility(
                "stock-analysis",
                vec!["financial-data", "time-series", "market-data"],
            )
            .with_compatibility(
                "financial-data",
                vec!["stock-analysis", "risk-data", "portfolio-data"],
            )
            .with_compatibility(
                "time-series",
                vec!["stock-analysis", "chart-data", "trend-data"],
            )
    }
}
