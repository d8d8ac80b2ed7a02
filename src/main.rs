use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agentry::{
    AgentCapability, AgentMessage, AppConfig, CommunicationHub, ContextStore, ExecutionContext,
    HttpTextGenerator, LoggingNotifier, Orchestrator, PluginLoader, AgentRegistry, Task,
};

/// Demo runner: wires the registry, orchestrator, and hub together and
/// pushes one task through each path.
#[derive(Parser, Debug)]
#[command(name = "agentry", about = "Agent orchestration demo runner")]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plugin manifest directory (overrides configuration)
    #[arg(long)]
    plugin_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let plugin_dir = cli.plugin_dir.or(config.plugins.directory.clone());
    let store = Arc::new(ContextStore::new());
    let registry = Arc::new(AgentRegistry::new(PluginLoader::new(plugin_dir)));
    registry.load_plugin_agents().await;

    let orchestrator = Orchestrator::new(
        registry.clone(),
        store.clone(),
        Arc::new(LoggingNotifier),
    );

    // One task through the capability-dispatch path
    let task = Task::new("PING", "smoke check", serde_json::Map::new());
    let result = orchestrator
        .process_task(task, ExecutionContext::new("demo-session", "demo-user"))
        .await;
    info!(
        agent = %result.agent_name,
        success = result.success,
        elapsed_ms = result.execution_time_ms,
        "orchestrator result"
    );

    // One message through the LLM-assisted hub path; degrades to labeled
    // placeholders when no model endpoint is configured
    let generator = Arc::new(HttpTextGenerator::new(config.llm.clone())?);
    let hub = CommunicationHub::new(generator, config.hub.clone());
    for agent in registry.get_all_agents().await {
        hub.register_agent(
            agent.name(),
            AgentCapability::new(agent.name(), agent.description()),
        )
        .await;
    }
    let routed = hub
        .route_message(AgentMessage::new("summarize system health"))
        .await;
    info!(
        participants = routed.agent_results.len(),
        "hub synthesis: {}", routed.synthesized
    );

    registry.shutdown_all().await;
    Ok(())
}
