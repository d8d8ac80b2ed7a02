//! Collaborative context store — private namespaces, shared data with
//! pub/sub, workflows, and per-agent recommendation inboxes

pub mod compatibility;
pub mod entry;
pub mod recommendation;
pub mod store;
pub mod workflow;

pub use compatibility::CapabilityTable;
pub use entry::SharedDataEntry;
pub use recommendation::{Recommendation, RecommendationPriority};
pub use store::ContextStore;
pub use workflow::{Workflow, WorkflowStatus};
