//! PluginLoader — assembles the full agent set from built-ins and manifests
//!
//! Two sources: a compiled-in factory list (the `agents/` built-ins by
//! default) and a runtime-scanned directory of JSON manifests. A missing or
//! empty directory yields no dynamic agents and no error; one malformed
//! manifest is logged and skipped without affecting the rest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::agents::{EchoAgent, TemplateAgent};

use super::manifest::{ManifestAgent, PluginManifest};

/// Compiled-in agent constructor
pub type AgentFactory = Arc<dyn Fn() -> Arc<dyn Agent> + Send + Sync>;

pub struct PluginLoader {
    plugin_dir: Option<PathBuf>,
    builtins: Vec<AgentFactory>,
}

impl PluginLoader {
    /// Loader with the default built-in set and the given manifest directory
    pub fn new(plugin_dir: Option<PathBuf>) -> Self {
        Self {
            plugin_dir,
            builtins: vec![
                Arc::new(|| Arc::new(EchoAgent::new()) as Arc<dyn Agent>),
                Arc::new(|| Arc::new(TemplateAgent::new()) as Arc<dyn Agent>),
            ],
        }
    }

    /// Loader with no built-ins; register factories explicitly
    pub fn bare(plugin_dir: Option<PathBuf>) -> Self {
        Self {
            plugin_dir,
            builtins: Vec::new(),
        }
    }

    pub fn register_builtin(&mut self, factory: AgentFactory) {
        self.builtins.push(factory);
    }

    /// Produce the full agent set: fresh built-in instances plus one
    /// `ManifestAgent` per parseable manifest. Calling this again after the
    /// previous set was shut down is the reload path; built-ins are
    /// unaffected by directory contents.
    pub fn load_agents(&self) -> Vec<Arc<dyn Agent>> {
        let mut agents: Vec<Arc<dyn Agent>> = Vec::new();

        for factory in &self.builtins {
            let agent = factory();
            debug!(agent = agent.name(), "loaded built-in agent");
            agents.push(agent);
        }

        if let Some(dir) = &self.plugin_dir {
            agents.extend(self.scan_manifests(dir));
        }

        info!(count = agents.len(), "plugin loader assembled agent set");
        agents
    }

    fn scan_manifests(&self, dir: &Path) -> Vec<Arc<dyn Agent>> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "plugin directory unavailable");
                return Vec::new();
            }
        };

        let mut agents: Vec<Arc<dyn Agent>> = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match PluginManifest::from_file(&path) {
                Ok(manifest) => {
                    info!(agent = %manifest.name, file = %path.display(), "loaded plugin manifest");
                    agents.push(Arc::new(ManifestAgent::new(manifest)));
                }
                // One bad manifest must not break the rest
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping malformed plugin manifest");
                }
            }
        }
        agents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_directory_yields_builtins_only() {
        let loader = PluginLoader::new(Some(PathBuf::from("/nonexistent/plugins")));
        let agents = loader.load_agents();
        assert_eq!(agents.len(), 2);
    }

    #[test]
    fn malformed_manifest_is_isolated() {
        let dir = tempfile::tempdir().unwrap();

        let mut good = std::fs::File::create(dir.path().join("good.json")).unwrap();
        write!(
            good,
            r#"{{"name": "summarizer", "task_types": ["SUMMARIZE"]}}"#
        )
        .unwrap();

        let mut bad = std::fs::File::create(dir.path().join("bad.json")).unwrap();
        write!(bad, "{{not json").unwrap();

        let loader = PluginLoader::bare(Some(dir.path().to_path_buf()));
        let agents = loader.load_agents();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].name(), "summarizer");
    }

    #[test]
    fn non_json_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let loader = PluginLoader::bare(Some(dir.path().to_path_buf()));
        assert!(loader.load_agents().is_empty());
    }
}
