//! End-to-end orchestration: plugin discovery → registry → dispatch

use std::io::Write;
use std::sync::Arc;

use agentry::{
    AgentRegistry, ContextStore, ExecutionContext, LoggingNotifier, Orchestrator, PluginLoader,
    Task,
};

fn orchestrator(registry: Arc<AgentRegistry>, store: Arc<ContextStore>) -> Orchestrator {
    Orchestrator::new(registry, store, Arc::new(LoggingNotifier))
}

#[tokio::test]
async fn manifest_agent_is_dispatchable_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut manifest = std::fs::File::create(dir.path().join("translator.json")).unwrap();
    write!(
        manifest,
        r#"{{
            "name": "translator",
            "description": "translates text",
            "task_types": ["TRANSLATE"],
            "capabilities": ["natural-language"],
            "response": "bonjour"
        }}"#
    )
    .unwrap();

    let registry = Arc::new(AgentRegistry::new(PluginLoader::new(Some(
        dir.path().to_path_buf(),
    ))));
    registry.load_plugin_agents().await;

    let store = Arc::new(ContextStore::new());
    let orch = orchestrator(registry.clone(), store.clone());

    let task = Task::new("TRANSLATE", "hello", serde_json::Map::new());
    let task_id = task.id.clone();
    let result = orch
        .process_task(task, ExecutionContext::new("s1", "u1"))
        .await;

    assert!(result.success);
    assert_eq!(result.agent_name, "translator");

    // Outcome is recorded in the store under the task id
    let status = store.get_context(&task_id, "status").await;
    assert_eq!(status, Some(serde_json::json!("completed")));
    let executed_by = store.get_context(&task_id, "executedBy").await;
    assert_eq!(executed_by, Some(serde_json::json!("translator")));
}

#[tokio::test]
async fn failure_is_recorded_with_error_key() {
    let registry = Arc::new(AgentRegistry::new(PluginLoader::bare(None)));
    let store = Arc::new(ContextStore::new());
    let orch = orchestrator(registry, store.clone());

    let task = Task::new("NOBODY_HANDLES_THIS", "", serde_json::Map::new());
    let task_id = task.id.clone();
    let result = orch.process_task(task, ExecutionContext::default()).await;

    assert!(!result.success);
    assert!(result
        .message
        .as_deref()
        .unwrap()
        .contains("NOBODY_HANDLES_THIS"));
    assert_eq!(
        store.get_context(&task_id, "status").await,
        Some(serde_json::json!("failed"))
    );
    assert!(store.get_context(&task_id, "error").await.is_some());
}

#[tokio::test]
async fn batch_mixes_builtin_and_missing_capabilities() {
    let registry = Arc::new(AgentRegistry::new(PluginLoader::new(None)));
    registry.load_plugin_agents().await;
    let orch = orchestrator(registry, Arc::new(ContextStore::new()));

    let tasks = vec![
        Task::new("PING", "one", serde_json::Map::new()).with_id("b0"),
        Task::new("MISSING", "two", serde_json::Map::new()).with_id("b1"),
        Task::new("TEMPLATE", "three", serde_json::Map::new()).with_id("b2"),
    ];

    let results = orch
        .process_tasks(tasks, ExecutionContext::default())
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(
        results.iter().map(|r| r.task_id.as_str()).collect::<Vec<_>>(),
        vec!["b0", "b1", "b2"]
    );
    assert!(results[0].success);
    assert_eq!(results[0].agent_name, "echo");
    assert!(!results[1].success);
    assert!(results[2].success);
    assert_eq!(results[2].agent_name, "template");
}

#[tokio::test]
async fn reload_replaces_dynamic_agents_but_keeps_builtins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("extra.json"),
        r#"{"name": "extra", "task_types": ["EXTRA"]}"#,
    )
    .unwrap();

    let registry = Arc::new(AgentRegistry::new(PluginLoader::new(Some(
        dir.path().to_path_buf(),
    ))));
    registry.load_plugin_agents().await;
    assert!(registry.get_agent("extra").await.is_some());
    assert!(registry.get_agent("echo").await.is_some());

    // Manifest removed: after reload the dynamic agent is gone, built-ins stay
    std::fs::remove_file(dir.path().join("extra.json")).unwrap();
    registry.reload_agents().await;

    assert!(registry.get_agent("extra").await.is_none());
    assert!(registry.get_agent("echo").await.is_some());
    assert!(registry.get_agent("template").await.is_some());
}
