//! Agent abstraction — trait, status, config, and per-invocation context

pub mod config;
pub mod context;
pub mod status;
pub mod traits;

pub use config::AgentConfig;
pub use context::ExecutionContext;
pub use status::{AgentStatus, StatusCell};
pub use traits::Agent;
