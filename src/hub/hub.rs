//! CommunicationHub — LLM-assisted multi-agent routing and synthesis
//!
//! Routes free-form tasks that do not map to a single capability: the model
//! picks participants from the descriptor table, the hub fans work out to a
//! descriptor-driven simulation layer (not the live `Agent::execute` path),
//! and a second model call synthesizes the combined answer. Both model calls
//! have deterministic fallbacks; `route_message` never fails outright.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::HubConfig;
use crate::error::{AgentryError, Result};
use crate::llm::TextGenerator;

use super::capability::{
    AgentCapability, AgentMessage, AgentOutput, Collaboration, CommunicationResult,
    RoutingSelection,
};

pub struct CommunicationHub {
    generator: Arc<dyn TextGenerator>,
    config: HubConfig,
    /// Descriptor table — routing metadata, not live agents
    registry: RwLock<HashMap<String, AgentCapability>>,
    /// Ring buffer of recent messages per agent id
    history: RwLock<HashMap<String, VecDeque<AgentMessage>>>,
}

impl CommunicationHub {
    pub fn new(generator: Arc<dyn TextGenerator>, config: HubConfig) -> Self {
        Self {
            generator,
            config,
            registry: RwLock::new(HashMap::new()),
            history: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register_agent(&self, agent_id: &str, capability: AgentCapability) {
        info!(
            agent = agent_id,
            capabilities = ?capability.capabilities,
            "registering hub descriptor"
        );
        self.registry
            .write()
            .await
            .insert(agent_id.to_string(), capability);
    }

    pub async fn available_agents(&self) -> Vec<AgentCapability> {
        self.registry.read().await.values().cloned().collect()
    }

    pub async fn conversation_history(&self, agent_id: &str) -> Vec<AgentMessage> {
        self.history
            .read()
            .await
            .get(agent_id)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Route a message: model-assisted selection, concurrent fan-out,
    /// synthesized combined answer. Infallible by design.
    pub async fn route_message(&self, message: AgentMessage) -> CommunicationResult {
        let selected = self.find_best_agents(&message.task, &message.context).await;
        let outputs = self.coordinate_execution(&message, &selected).await;
        self.synthesize_results(outputs).await
    }

    /// Ask the model which registered descriptors should participate.
    /// Falls back to every registered id when the answer is unparseable or
    /// names nobody we know — over-inclusion beats exclusion.
    pub async fn find_best_agents(
        &self,
        task: &str,
        context: &serde_json::Map<String, Value>,
    ) -> Vec<String> {
        let registry = self.registry.read().await;
        let prompt = build_routing_prompt(task, context, &registry);
        let mut known: Vec<String> = registry.keys().cloned().collect();
        known.sort();
        drop(registry);

        let response = self
            .generator
            .generate(&prompt, self.config.routing_max_tokens, self.config.temperature)
            .await;

        match response {
            Ok(text) => match parse_agent_selection(&text, &known) {
                Ok(selected) => selected,
                Err(e) => {
                    warn!(error = %e, "routing selection fell back to all agents");
                    known
                }
            },
            Err(e) => {
                warn!(error = %e, "routing call failed; selecting all agents");
                known
            }
        }
    }

    /// Produce a collaboration plan for a set of agents. The plan text
    /// degrades to a labeled placeholder when the model is unreachable.
    pub async fn facilitate_collaboration(
        &self,
        initiating_agent: &str,
        task: &str,
        involved_agents: Vec<String>,
    ) -> Collaboration {
        let prompt = build_collaboration_prompt(initiating_agent, task, &involved_agents);
        let plan = match self
            .generator
            .generate(&prompt, self.config.synthesis_max_tokens, 0.4)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "collaboration planning failed");
                format!("[collaboration plan unavailable] {}", e)
            }
        };

        Collaboration {
            involved_agents,
            plan,
            status: "ACTIVE".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Concurrently "execute" each selected descriptor against the internal
    /// simulation layer and record conversation history.
    async fn coordinate_execution(
        &self,
        message: &AgentMessage,
        selected: &[String],
    ) -> Vec<AgentOutput> {
        let futures = selected.iter().map(|agent_id| async move {
            let capability = self.registry.read().await.get(agent_id).cloned();
            let Some(capability) = capability else {
                debug!(agent = %agent_id, "selected agent not in descriptor table");
                return None;
            };
            self.record_history(agent_id, message.clone()).await;
            Some(AgentOutput {
                agent_id: agent_id.clone(),
                capabilities: capability.capabilities.clone(),
                output: format!("Processed: {}", message.task),
                timestamp: Utc::now(),
            })
        });
        join_all(futures).await.into_iter().flatten().collect()
    }

    async fn record_history(&self, agent_id: &str, message: AgentMessage) {
        let mut history = self.history.write().await;
        let ring = history.entry(agent_id.to_string()).or_default();
        ring.push_back(message);
        while ring.len() > self.config.history_limit {
            ring.pop_front();
        }
    }

    /// Build the unified narrative; on any model failure fall back to the
    /// deterministic template. Synthesis never fails outright.
    async fn synthesize_results(&self, outputs: Vec<AgentOutput>) -> CommunicationResult {
        let prompt = build_synthesis_prompt(&outputs);
        let synthesized = match self
            .generator
            .generate(&prompt, self.config.synthesis_max_tokens, self.config.temperature)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "synthesis failed; using fallback template");
                fallback_synthesis(&outputs)
            }
        };

        let agent_results = outputs
            .into_iter()
            .map(|output| (output.agent_id.clone(), output))
            .collect();

        CommunicationResult {
            agent_results,
            synthesized,
            timestamp: Utc::now(),
        }
    }
}

fn build_routing_prompt(
    task: &str,
    context: &serde_json::Map<String, Value>,
    registry: &HashMap<String, AgentCapability>,
) -> String {
    let mut catalog = String::new();
    let mut ids: Vec<&String> = registry.keys().collect();
    ids.sort();
    for id in ids {
        let cap = &registry[id];
        catalog.push_str(&format!(
            "- {}: {} (Specialties: {})\n",
            id,
            cap.description,
            cap.capabilities.join(", ")
        ));
    }

    format!(
        "You are an intelligent agent coordinator. Route this task to the most appropriate agents.\n\n\
         Task: {}\nContext: {}\n\nAvailable Agents:\n{}\n\
         Respond with a single JSON object:\n\
         {{\"primary_agents\": [\"agent-id\"], \"supporting_agents\": [], \
         \"execution_order\": \"SEQUENTIAL|PARALLEL|HYBRID\", \"reasoning\": \"why\"}}",
        task,
        Value::Object(context.clone()),
        catalog
    )
}

fn build_collaboration_prompt(
    initiating_agent: &str,
    task: &str,
    involved_agents: &[String],
) -> String {
    format!(
        "Facilitate collaboration between agents for this task.\n\n\
         Initiating Agent: {}\nTask: {}\nInvolved Agents: {}\n\n\
         Create a collaboration plan covering role definitions, information \
         sharing, conflict resolution, and checkpoints.",
        initiating_agent,
        task,
        involved_agents.join(", ")
    )
}

fn build_synthesis_prompt(outputs: &[AgentOutput]) -> String {
    let results = serde_json::to_string(outputs).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Synthesize the results from multiple AI agents into a coherent response.\n\n\
         Agent Results: {}\n\n\
         Create a unified response that combines insights from all agents, \
         resolves contradictions, and suggests next steps.",
        results
    )
}

/// Strict, schema-validated parse of the routing response: take the first
/// JSON object in the text, deserialize [`RoutingSelection`], and keep only
/// ids present in the descriptor table. Empty selection is a parse failure.
fn parse_agent_selection(response: &str, known: &[String]) -> Result<Vec<String>> {
    let start = response
        .find('{')
        .ok_or_else(|| AgentryError::RoutingParse("no JSON object in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| AgentryError::RoutingParse("unterminated JSON object".into()))?;
    if end < start {
        return Err(AgentryError::RoutingParse("malformed JSON bounds".into()));
    }

    let selection: RoutingSelection = serde_json::from_str(&response[start..=end])
        .map_err(|e| AgentryError::RoutingParse(e.to_string()))?;

    let mut selected: Vec<String> = Vec::new();
    for id in selection
        .primary_agents
        .into_iter()
        .chain(selection.supporting_agents)
    {
        if known.iter().any(|k| k == &id) && !selected.contains(&id) {
            selected.push(id);
        }
    }

    if selected.is_empty() {
        return Err(AgentryError::RoutingParse(
            "selection names no registered agents".into(),
        ));
    }
    Ok(selected)
}

/// Deterministic synthesis used when the model call fails
fn fallback_synthesis(outputs: &[AgentOutput]) -> String {
    let mut text = String::from("## Agent Collaboration Summary\n\n");
    for output in outputs {
        text.push_str(&format!("**{} Agent Analysis:**\n", output.agent_id));
        if !output.capabilities.is_empty() {
            text.push_str(&format!(
                "- Specialized in: {}\n",
                output.capabilities.join(", ")
            ));
        }
        text.push_str(&format!("- Analysis: {}\n\n", output.output));
    }
    text.push_str(&format!(
        "## Unified Recommendations:\nBased on the collective analysis from {} specialized agents, \
         review the individual outputs above and act on the highest-priority findings.",
        outputs.len()
    ));
    text
}
