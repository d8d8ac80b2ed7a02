//! LLM-assisted communication hub — capability-descriptor routing and
//! result synthesis

pub mod capability;
pub mod hub;

pub use capability::{
    AgentCapability, AgentMessage, AgentOutput, Collaboration, CommunicationResult,
    RoutingSelection,
};
pub use hub::CommunicationHub;
