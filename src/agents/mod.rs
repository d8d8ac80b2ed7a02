//! Built-in agent implementations
//!
//! These are the compiled-in half of the plugin set; the other half comes
//! from manifest files scanned by the `plugin` module.

pub mod echo;
pub mod template;

pub use echo::EchoAgent;
pub use template::TemplateAgent;
