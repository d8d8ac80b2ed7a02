//! AgentRegistry — owns the live agent set and its lifecycle
//!
//! Explicitly constructed and dependency-injected, never a process-wide
//! global. The maps are lock-internal: registration and lookup are safe from
//! any number of concurrent workers without caller-side locking.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::agent::{Agent, AgentConfig};
use crate::domain::Task;
use crate::plugin::PluginLoader;

pub struct AgentRegistry {
    agents: RwLock<HashMap<String, Arc<dyn Agent>>>,
    configs: RwLock<HashMap<String, AgentConfig>>,
    loader: PluginLoader,
}

impl AgentRegistry {
    pub fn new(loader: PluginLoader) -> Self {
        Self {
            agents: RwLock::new(HashMap::new()),
            configs: RwLock::new(HashMap::new()),
            loader,
        }
    }

    /// Register everything the plugin loader produces (startup path)
    pub async fn load_plugin_agents(&self) {
        let agents = self.loader.load_agents();
        let count = agents.len();
        for agent in agents {
            self.register_agent(agent).await;
        }
        info!(count, "registered plugin agents");
    }

    /// Store the instance and, when unconfigured, assign a default
    /// configuration and initialize. An initialization failure is logged;
    /// the agent stays registered in whatever status it reports.
    pub async fn register_agent(&self, agent: Arc<dyn Agent>) {
        let name = agent.name().to_string();
        info!(agent = %name, "registering agent");
        self.agents.write().await.insert(name.clone(), agent.clone());

        let needs_config = !self.configs.read().await.contains_key(&name);
        if needs_config {
            let config = AgentConfig::new(&name);
            self.configs
                .write()
                .await
                .insert(name.clone(), config.clone());
            if let Err(e) = agent.initialize(config).await {
                error!(agent = %name, error = %e, "agent initialization failed");
            }
        }
    }

    /// Shut the agent down and remove all trace of it
    pub async fn unregister_agent(&self, agent_name: &str) {
        info!(agent = agent_name, "unregistering agent");
        let removed = self.agents.write().await.remove(agent_name);
        if let Some(agent) = removed {
            agent.shutdown().await;
        }
        self.configs.write().await.remove(agent_name);
    }

    pub async fn get_agent(&self, agent_name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.read().await.get(agent_name).cloned()
    }

    pub async fn get_all_agents(&self) -> Vec<Arc<dyn Agent>> {
        self.agents.read().await.values().cloned().collect()
    }

    /// Filter all registered agents through `can_handle` on a synthetic
    /// probe task of the given type
    pub async fn get_capable_agents(&self, task_type: &str) -> Vec<Arc<dyn Agent>> {
        let probe = Task::probe(task_type);
        self.agents
            .read()
            .await
            .values()
            .filter(|agent| agent.can_handle(&probe))
            .cloned()
            .collect()
    }

    /// Store the config and re-initialize the agent with it
    pub async fn configure_agent(&self, agent_name: &str, config: AgentConfig) {
        self.configs
            .write()
            .await
            .insert(agent_name.to_string(), config.clone());
        if let Some(agent) = self.get_agent(agent_name).await {
            if let Err(e) = agent.initialize(config).await {
                error!(agent = agent_name, error = %e, "agent reconfiguration failed");
            }
        }
    }

    /// Shut down and clear everything, then re-run the plugin loader
    pub async fn reload_agents(&self) {
        info!("reloading all agents");
        self.shutdown_all().await;
        self.load_plugin_agents().await;
    }

    /// Process-teardown path: shut down every agent and clear both maps
    pub async fn shutdown_all(&self) {
        info!("shutting down all agents");
        let drained: Vec<Arc<dyn Agent>> = self.agents.write().await.drain().map(|(_, a)| a).collect();
        for agent in drained {
            agent.shutdown().await;
        }
        self.configs.write().await.clear();
    }
}
