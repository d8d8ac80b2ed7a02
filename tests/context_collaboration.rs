//! Cross-component collaboration through the shared context store

use std::sync::Arc;

use agentry::agents::TemplateAgent;
use agentry::{
    AgentRegistry, ContextStore, ExecutionContext, LoggingNotifier, Orchestrator, PluginLoader,
    Task, Workflow, WorkflowStatus,
};

// TemplateAgent publishes its output into the shared store; a subscriber to
// that key should find a notification recommendation afterwards.
#[tokio::test]
async fn agent_execution_notifies_shared_data_subscribers() {
    let store = Arc::new(ContextStore::new());
    let registry = Arc::new(AgentRegistry::new(PluginLoader::bare(None)));
    registry
        .register_agent(Arc::new(TemplateAgent::with_store(store.clone())))
        .await;

    let task = Task::new("TEMPLATE", "collaborative run", serde_json::Map::new());
    let shared_key = format!("template:{}", task.id);
    store.subscribe_to_context("observer", &shared_key).await;

    let orch = Orchestrator::new(registry, store.clone(), Arc::new(LoggingNotifier));
    let result = orch.process_task(task, ExecutionContext::default()).await;
    assert!(result.success);

    let entry = store.get_shared_data(&shared_key).await.expect("published");
    assert_eq!(entry.source_agent, "template");

    let recs = store.get_recommendations("observer").await;
    assert!(recs.iter().any(|r| r.rec_type == "notification"));
}

#[tokio::test]
async fn concurrent_writers_do_not_corrupt_the_store() {
    let store = Arc::new(ContextStore::new());
    let mut handles = Vec::new();

    for writer in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                let agent = format!("agent-{}", writer);
                store
                    .store_context(&agent, &format!("k{}", i), serde_json::json!(i))
                    .await;
                store
                    .store_shared_data(
                        "contended",
                        serde_json::json!({"writer": writer, "i": i}),
                        &agent,
                        serde_json::Map::new(),
                    )
                    .await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Last-writer-wins: some writer's final value is present and well-formed
    let entry = store.get_shared_data("contended").await.expect("entry");
    assert!(entry.source_agent.starts_with("agent-"));
    for writer in 0..8 {
        let ctx = store.get_all_context(&format!("agent-{}", writer)).await;
        assert_eq!(ctx.len(), 50);
    }
}

#[tokio::test]
async fn workflow_lifecycle_round_trip() {
    let store = ContextStore::new();
    store
        .create_workflow(Workflow::new(
            "wf-analysis",
            "Market Analysis",
            "chained analysis",
            vec!["stock-analyzer".into(), "chart-visualizer".into()],
        ))
        .await;

    assert_eq!(store.get_active_workflows().await.len(), 1);

    store
        .update_workflow_status("wf-analysis", WorkflowStatus::Paused)
        .await;
    assert!(store.get_active_workflows().await.is_empty());

    store
        .update_workflow_status("wf-analysis", WorkflowStatus::Active)
        .await;
    assert_eq!(store.get_active_workflows().await.len(), 1);

    let wf = store.get_workflow("wf-analysis").await.unwrap();
    assert!(wf.updated_at > wf.created_at);
}
