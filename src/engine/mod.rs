//! Resource matching engine interface.
//!
//! The engine is initialized with the serialized graph and a JSON options
//! string. The options carry the path the same graph was persisted to; the
//! engine requires both even though they hold the same content.

pub mod local;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

pub use local::LocalContext;

/// Match policy used when none is given
pub const DEFAULT_MATCH_POLICY: &str = "first";

/// Load and match format understood by the engine
pub const JGF_FORMAT: &str = "jgf";

/// A matching engine that can be loaded with a resource graph
pub trait MatchEngine {
    /// Load the graph in `jgf` using the JSON `options` string
    fn init_context(&mut self, jgf: &str, options: &str) -> Result<()>;
}

/// Options handed to the engine alongside the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub matcher_policy: String,
    pub load_file: String,
    pub load_format: String,
    pub match_format: String,
}

impl EngineOptions {
    /// JGF options for a graph persisted at `load_file`.
    ///
    /// An empty policy falls back to [`DEFAULT_MATCH_POLICY`].
    pub fn new(matcher_policy: &str, load_file: &Path) -> Self {
        let matcher_policy = if matcher_policy.is_empty() {
            DEFAULT_MATCH_POLICY
        } else {
            matcher_policy
        };
        EngineOptions {
            matcher_policy: matcher_policy.to_string(),
            load_file: load_file.to_string_lossy().to_string(),
            load_format: JGF_FORMAT.to_string(),
            match_format: JGF_FORMAT.to_string(),
        }
    }

    /// Render as the options string the engine expects
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_options_json() {
        let options = EngineOptions::new("lonode", Path::new("/tmp/graph.json"));
        let value: Value = serde_json::from_str(&options.to_json().unwrap()).unwrap();

        assert_eq!(value["matcher_policy"], "lonode");
        assert_eq!(value["load_file"], "/tmp/graph.json");
        assert_eq!(value["load_format"], "jgf");
        assert_eq!(value["match_format"], "jgf");
    }

    #[test]
    fn test_empty_policy_defaults_to_first() {
        let options = EngineOptions::new("", Path::new("graph.json"));
        assert_eq!(options.matcher_policy, "first");
    }
}
