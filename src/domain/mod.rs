//! Domain value types — tasks and their results

pub mod result;
pub mod task;

pub use result::AgentResult;
pub use task::{Task, TaskPriority};
