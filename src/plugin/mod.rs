//! Plugin discovery — compiled-in registry plus manifest directory scanning

pub mod loader;
pub mod manifest;

pub use loader::{AgentFactory, PluginLoader};
pub use manifest::{ManifestAgent, PluginManifest};
