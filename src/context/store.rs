//! ContextStore — shared, concurrent, pub/sub-capable collaboration fabric
//!
//! One injected service owns every shared map behind its own locks; callers
//! never need external locking. Absence is always an empty result or `None`,
//! never an error. Writes into the private or shared tables trigger the
//! reactive recommendation hooks driven by the capability table.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

use super::compatibility::CapabilityTable;
use super::entry::SharedDataEntry;
use super::recommendation::{Recommendation, RecommendationPriority};
use super::workflow::{Workflow, WorkflowStatus};

/// Concurrency-safe shared memory for agent collaboration
pub struct ContextStore {
    /// agent id → private key/value namespace
    agent_contexts: RwLock<HashMap<String, Map<String, Value>>>,
    /// data key → last-writer-wins shared entry
    shared_data: RwLock<HashMap<String, SharedDataEntry>>,
    /// context key → subscriber agent ids. Duplicates are allowed: repeated
    /// subscribe calls append repeated entries, each notified separately.
    subscriptions: RwLock<HashMap<String, Vec<String>>>,
    workflows: RwLock<HashMap<String, Workflow>>,
    /// target agent id → recommendation inbox (unbounded)
    recommendations: RwLock<HashMap<String, Vec<Recommendation>>>,
    capabilities: CapabilityTable,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::with_capabilities(CapabilityTable::default())
    }

    pub fn with_capabilities(capabilities: CapabilityTable) -> Self {
        Self {
            agent_contexts: RwLock::new(HashMap::new()),
            shared_data: RwLock::new(HashMap::new()),
            subscriptions: RwLock::new(HashMap::new()),
            workflows: RwLock::new(HashMap::new()),
            recommendations: RwLock::new(HashMap::new()),
            capabilities,
        }
    }

    // ---- private agent contexts ----

    /// Upsert into the agent's private namespace.
    ///
    /// Side effect: regenerates the agent's data-type recommendations when
    /// its context carries a `"dataType"` entry.
    pub async fn store_context(&self, agent_id: &str, key: &str, value: Value) {
        self.agent_contexts
            .write()
            .await
            .entry(agent_id.to_string())
            .or_default()
            .insert(key.to_string(), value);

        self.generate_context_recommendations(agent_id).await;
    }

    pub async fn get_context(&self, agent_id: &str, key: &str) -> Option<Value> {
        self.agent_contexts
            .read()
            .await
            .get(agent_id)
            .and_then(|ctx| ctx.get(key).cloned())
    }

    pub async fn get_all_context(&self, agent_id: &str) -> Map<String, Value> {
        self.agent_contexts
            .read()
            .await
            .get(agent_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn clear_context(&self, agent_id: &str) {
        self.agent_contexts.write().await.remove(agent_id);
        self.recommendations.write().await.remove(agent_id);
    }

    pub async fn clear_all(&self) {
        self.agent_contexts.write().await.clear();
        self.shared_data.write().await.clear();
        self.subscriptions.write().await.clear();
        self.workflows.write().await.clear();
        self.recommendations.write().await.clear();
    }

    // ---- shared data ----

    /// Last-writer-wins upsert into the global shared table.
    ///
    /// Side effects: queues a notification recommendation for every
    /// subscriber of `key`, then queues a collaborative recommendation for
    /// every agent compatible with the entry's declared data type.
    pub async fn store_shared_data(
        &self,
        key: &str,
        data: Value,
        source_agent: &str,
        metadata: Map<String, Value>,
    ) {
        let entry = SharedDataEntry::new(data.clone(), source_agent, metadata);
        let data_type = entry.data_type.clone();
        self.shared_data
            .write()
            .await
            .insert(key.to_string(), entry);

        self.notify_subscribers(key, &data).await;
        self.generate_collaborative_recommendations(key, source_agent, &data_type)
            .await;
    }

    pub async fn get_shared_data(&self, key: &str) -> Option<SharedDataEntry> {
        self.shared_data.read().await.get(key).cloned()
    }

    pub async fn get_all_shared_data(&self) -> HashMap<String, SharedDataEntry> {
        self.shared_data.read().await.clone()
    }

    pub async fn clear_shared_data(&self, key: &str) {
        self.shared_data.write().await.remove(key);
    }

    // ---- subscriptions ----

    /// Append `subscriber_agent` to the key's list. Not de-duplicated:
    /// subscribing twice yields two entries and two notifications per write.
    pub async fn subscribe_to_context(&self, subscriber_agent: &str, context_key: &str) {
        self.subscriptions
            .write()
            .await
            .entry(context_key.to_string())
            .or_default()
            .push(subscriber_agent.to_string());
        debug!(subscriber = subscriber_agent, key = context_key, "subscribed");
    }

    /// Remove one occurrence of the subscriber; dropping the last subscriber
    /// removes the key entry entirely (same write lock, so the
    /// "empty list ⇒ no key" invariant holds atomically).
    pub async fn unsubscribe_from_context(&self, subscriber_agent: &str, context_key: &str) {
        let mut subs = self.subscriptions.write().await;
        if let Some(list) = subs.get_mut(context_key) {
            if let Some(pos) = list.iter().position(|s| s == subscriber_agent) {
                list.remove(pos);
            }
            if list.is_empty() {
                subs.remove(context_key);
            }
        }
    }

    pub async fn get_subscribers(&self, context_key: &str) -> Vec<String> {
        self.subscriptions
            .read()
            .await
            .get(context_key)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) async fn has_subscription_key(&self, context_key: &str) -> bool {
        self.subscriptions.read().await.contains_key(context_key)
    }

    /// Queue a context-update notification for every subscriber of the key
    pub async fn notify_subscribers(&self, context_key: &str, _data: &Value) {
        let subscribers = self.get_subscribers(context_key).await;
        for subscriber in subscribers {
            let mut params = Map::new();
            params.insert("updateType".into(), json!("context-change"));
            params.insert("contextKey".into(), json!(context_key));
            let notification = Recommendation::new(
                "notification",
                "Context Data Updated",
                format!("New data available for {}", context_key),
                &subscriber,
                "process-context-update",
                RecommendationPriority::Low,
            )
            .with_data_keys(vec![context_key.to_string()])
            .with_parameters(params);

            self.append_recommendation(&subscriber, notification).await;
        }
    }

    // ---- workflows ----

    pub async fn create_workflow(&self, workflow: Workflow) {
        self.workflows
            .write()
            .await
            .insert(workflow.id.clone(), workflow);
    }

    pub async fn get_workflow(&self, workflow_id: &str) -> Option<Workflow> {
        self.workflows.read().await.get(workflow_id).cloned()
    }

    pub async fn get_active_workflows(&self) -> Vec<Workflow> {
        self.workflows
            .read()
            .await
            .values()
            .filter(|w| w.status == WorkflowStatus::Active)
            .cloned()
            .collect()
    }

    /// Change a workflow's status, refreshing `updated_at`. No-op when the
    /// workflow does not exist.
    pub async fn update_workflow_status(&self, workflow_id: &str, status: WorkflowStatus) {
        if let Some(workflow) = self.workflows.write().await.get_mut(workflow_id) {
            workflow.status = status;
            workflow.updated_at = chrono::Utc::now();
        }
    }

    // ---- recommendations ----

    /// Replace the agent's recommendation inbox
    pub async fn set_recommendations(&self, agent_id: &str, recommendations: Vec<Recommendation>) {
        self.recommendations
            .write()
            .await
            .insert(agent_id.to_string(), recommendations);
    }

    pub async fn get_recommendations(&self, agent_id: &str) -> Vec<Recommendation> {
        self.recommendations
            .read()
            .await
            .get(agent_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn clear_recommendations(&self, agent_id: &str) {
        self.recommendations.write().await.remove(agent_id);
    }

    async fn append_recommendation(&self, agent_id: &str, recommendation: Recommendation) {
        self.recommendations
            .write()
            .await
            .entry(agent_id.to_string())
            .or_default()
            .push(recommendation);
    }

    // ---- querying and analysis ----

    /// Agents whose private context has an entry literally keyed `"dataType"`
    /// equal to `data_type`
    pub async fn find_agents_with_data_type(&self, data_type: &str) -> Vec<String> {
        self.agent_contexts
            .read()
            .await
            .iter()
            .filter(|(_, ctx)| {
                ctx.get("dataType")
                    .and_then(Value::as_str)
                    .map(|t| t == data_type)
                    .unwrap_or(false)
            })
            .map(|(agent, _)| agent.clone())
            .collect()
    }

    /// Capability-table lookup; see [`CapabilityTable::compatible_agents`]
    /// for the (deliberately loose) matching rule.
    pub async fn find_compatible_agents(&self, source_agent: &str, data_type: &str) -> Vec<String> {
        self.capabilities.compatible_agents(source_agent, data_type)
    }

    /// Compose compatible agents, relevant shared-data keys, and canned
    /// workflow templates for the agent's current `dataType`.
    pub async fn generate_collaboration_suggestions(&self, agent_id: &str) -> Value {
        let context = self.get_all_context(agent_id).await;
        let Some(data_type) = context.get("dataType").and_then(Value::as_str) else {
            return json!({});
        };

        let compatible = self.capabilities.compatible_agents(agent_id, data_type);

        let relevant: Vec<String> = self
            .shared_data
            .read()
            .await
            .iter()
            .filter(|(_, entry)| {
                entry.data_type == data_type
                    || self.capabilities.is_compatible(data_type, &entry.data_type)
            })
            .map(|(key, _)| key.clone())
            .collect();

        json!({
            "compatibleAgents": compatible,
            "relevantSharedData": relevant,
            "workflowSuggestions": workflow_templates(agent_id, data_type),
        })
    }

    // ---- reactive hooks ----

    /// Rebuild the agent's own inbox from the canned per-data-type templates
    /// when its private context declares a data type.
    async fn generate_context_recommendations(&self, agent_id: &str) {
        let context = self.get_all_context(agent_id).await;
        let Some(data_type) = context.get("dataType").and_then(Value::as_str) else {
            return;
        };

        let recommendations = data_type_recommendations(data_type);
        if !recommendations.is_empty() {
            self.set_recommendations(agent_id, recommendations).await;
        }
    }

    /// Queue a collaborative recommendation for each agent compatible with
    /// the written entry's data type.
    async fn generate_collaborative_recommendations(
        &self,
        data_key: &str,
        source_agent: &str,
        data_type: &str,
    ) {
        for target in self.capabilities.compatible_agents(source_agent, data_type) {
            let mut params = Map::new();
            params.insert("sourceAgent".into(), json!(source_agent));
            params.insert("dataKey".into(), json!(data_key));
            let rec = Recommendation::new(
                "collaboration",
                format!("Act on {} data", data_type),
                format!("Process {}'s {} data from {}", source_agent, data_type, data_key),
                &target,
                "process-shared-data",
                RecommendationPriority::High,
            )
            .with_data_keys(vec![data_key.to_string()])
            .with_parameters(params);

            self.append_recommendation(&target, rec).await;
        }
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Canned recommendations for well-known data types
fn data_type_recommendations(data_type: &str) -> Vec<Recommendation> {
    match data_type {
        "stock-analysis" => {
            let mut params = Map::new();
            params.insert(
                "chartTypes".into(),
                json!(["candlestick", "line", "volume"]),
            );
            vec![Recommendation::new(
                "visualization",
                "Create Interactive Stock Chart",
                "Visualize the stock analysis data with interactive charts",
                "chart-visualizer",
                "create-chart",
                RecommendationPriority::High,
            )
            .with_data_keys(vec!["stockData".to_string()])
            .with_parameters(params)]
        }
        "time-series" => {
            let mut params = Map::new();
            params.insert(
                "patterns".into(),
                json!(["head-shoulders", "triangles", "support-resistance"]),
            );
            vec![Recommendation::new(
                "analysis",
                "Detect Chart Patterns",
                "Analyze time series data for technical patterns",
                "technical-analyzer",
                "detect-patterns",
                RecommendationPriority::Medium,
            )
            .with_data_keys(vec!["historicalData".to_string()])
            .with_parameters(params)]
        }
        "financial-data" => {
            let mut params = Map::new();
            params.insert(
                "riskTypes".into(),
                json!(["volatility", "correlation", "var"]),
            );
            vec![Recommendation::new(
                "analysis",
                "Perform Risk Assessment",
                "Analyze financial data for risk factors and portfolio implications",
                "risk-assessor",
                "assess-risk",
                RecommendationPriority::High,
            )
            .with_data_keys(vec!["financialMetrics".to_string()])
            .with_parameters(params)]
        }
        _ => Vec::new(),
    }
}

/// Canned workflow templates keyed by known data types
fn workflow_templates(agent_id: &str, data_type: &str) -> Vec<Value> {
    match data_type {
        "stock-analysis" => vec![
            json!({
                "name": "Stock Analysis to Visualization Workflow",
                "description": "Automatically create charts when stock analysis completes",
                "agents": [agent_id, "chart-visualizer"],
                "trigger": "stock-analysis-complete",
            }),
            json!({
                "name": "Comprehensive Market Analysis Workflow",
                "description": "Chain stock analysis, risk assessment, and visualization",
                "agents": [agent_id, "risk-assessor", "chart-visualizer"],
                "trigger": "market-data-available",
            }),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shared_data_round_trip() {
        let store = ContextStore::new();
        store
            .store_shared_data("quotes", json!([1, 2, 3]), "feed", Map::new())
            .await;

        let entry = store.get_shared_data("quotes").await.expect("entry");
        assert_eq!(entry.data, json!([1, 2, 3]));
        assert_eq!(entry.source_agent, "feed");
        assert_eq!(entry.data_type, "unknown");
    }

    #[tokio::test]
    async fn last_writer_wins() {
        let store = ContextStore::new();
        store
            .store_shared_data("slot", json!("first"), "a", Map::new())
            .await;
        store
            .store_shared_data("slot", json!("second"), "b", Map::new())
            .await;

        let entry = store.get_shared_data("slot").await.expect("entry");
        assert_eq!(entry.data, json!("second"));
        assert_eq!(entry.source_agent, "b");
    }

    #[tokio::test]
    async fn subscriber_gets_notification_recommendation() {
        let store = ContextStore::new();
        store.subscribe_to_context("watcher", "quotes").await;
        store
            .store_shared_data("quotes", json!(42), "feed", Map::new())
            .await;

        let recs = store.get_recommendations("watcher").await;
        assert!(!recs.is_empty());
        assert_eq!(recs[0].rec_type, "notification");
        assert_eq!(recs[0].data_keys, vec!["quotes".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_subscriptions_are_kept_and_notified_twice() {
        let store = ContextStore::new();
        store.subscribe_to_context("watcher", "quotes").await;
        store.subscribe_to_context("watcher", "quotes").await;
        assert_eq!(store.get_subscribers("quotes").await.len(), 2);

        store
            .store_shared_data("quotes", json!(1), "feed", Map::new())
            .await;
        assert_eq!(store.get_recommendations("watcher").await.len(), 2);
    }

    #[tokio::test]
    async fn unsubscribing_last_subscriber_removes_key() {
        let store = ContextStore::new();
        store.subscribe_to_context("watcher", "quotes").await;
        store.unsubscribe_from_context("watcher", "quotes").await;

        assert!(store.get_subscribers("quotes").await.is_empty());
        assert!(!store.has_subscription_key("quotes").await);
    }

    #[tokio::test]
    async fn active_workflow_filter_and_updated_at() {
        let store = ContextStore::new();
        store
            .create_workflow(Workflow::new("wf-1", "analysis", "", vec!["a".into()]))
            .await;
        store
            .create_workflow(Workflow::new("wf-2", "viz", "", vec!["b".into()]))
            .await;

        assert_eq!(store.get_active_workflows().await.len(), 2);

        let before = store.get_workflow("wf-1").await.unwrap().updated_at;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        store
            .update_workflow_status("wf-1", WorkflowStatus::Completed)
            .await;

        let active = store.get_active_workflows().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "wf-2");

        let after = store.get_workflow("wf-1").await.unwrap().updated_at;
        assert!(after > before);
    }

    #[tokio::test]
    async fn context_write_regenerates_data_type_recommendations() {
        let store = ContextStore::new();
        store
            .store_context("analyzer", "dataType", json!("stock-analysis"))
            .await;

        let recs = store.get_recommendations("analyzer").await;
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].suggested_agent, "chart-visualizer");
        assert_eq!(recs[0].action, "create-chart");
    }

    #[tokio::test]
    async fn find_agents_with_data_type_scans_contexts() {
        let store = ContextStore::new();
        store
            .store_context("a", "dataType", json!("time-series"))
            .await;
        store
            .store_context("b", "dataType", json!("stock-analysis"))
            .await;
        store.store_context("c", "other", json!("time-series")).await;

        let agents = store.find_agents_with_data_type("time-series").await;
        assert_eq!(agents, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn collaboration_suggestions_require_data_type() {
        let store = ContextStore::new();
        assert_eq!(
            store.generate_collaboration_suggestions("nobody").await,
            json!({})
        );

        store
            .store_context("analyzer", "dataType", json!("stock-analysis"))
            .await;
        let mut meta = Map::new();
        meta.insert("dataType".into(), json!("financial-data"));
        store
            .store_shared_data("metrics", json!({}), "feed", meta)
            .await;

        let suggestions = store.generate_collaboration_suggestions("analyzer").await;
        // financial-data is compatibility-linked to stock-analysis
        assert_eq!(suggestions["relevantSharedData"], json!(["metrics"]));
        assert_eq!(
            suggestions["workflowSuggestions"].as_array().unwrap().len(),
            2
        );
    }
}
