//! In-process JGF loader.
//!
//! [`LocalContext`] performs the same checks the engine's JGF reader applies
//! when a context is created, and keeps a summary of the loaded graph.

use std::collections::HashSet;
use std::fs;

use super::{EngineOptions, MatchEngine, JGF_FORMAT};
use crate::error::{Result, TopologyError};
use crate::graph::metadata::{Containment, REQUIRED_NODE_FIELDS};
use crate::graph::JsonGraph;

/// Summary of a graph accepted by [`LocalContext`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGraph {
    pub matcher_policy: String,
    pub load_file: String,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Matching engine context that validates and records the loaded graph
#[derive(Debug, Default)]
pub struct LocalContext {
    loaded: Option<LoadedGraph>,
}

impl LocalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph loaded by the last successful `init_context`
    pub fn loaded(&self) -> Option<&LoadedGraph> {
        self.loaded.as_ref()
    }
}

fn reject(message: impl Into<String>) -> TopologyError {
    TopologyError::EngineInit(message.into())
}

/// Check a parsed graph for the fields and references the reader relies on
pub fn validate_graph(graph: &JsonGraph) -> Result<()> {
    let mut ids = HashSet::new();
    for node in &graph.graph.nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(reject(format!("duplicate node id {}", node.id)));
        }
        for field in REQUIRED_NODE_FIELDS {
            if !node.metadata.contains_key(field) {
                return Err(reject(format!("node {} is missing metadata field '{}'", node.id, field)));
            }
        }
        if node.metadata.containment_path().is_none() {
            return Err(reject(format!("node {} has no containment path", node.id)));
        }
    }

    let valid = [Containment::Contains.as_str(), Containment::In.as_str()];
    for edge in &graph.graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !ids.contains(endpoint.as_str()) {
                return Err(reject(format!(
                    "edge {} -> {} references unknown node {}",
                    edge.source, edge.target, endpoint
                )));
            }
        }
        match edge.metadata.edge_containment() {
            Some(containment) if valid.contains(&containment) => {}
            other => {
                return Err(reject(format!(
                    "edge {} -> {} has invalid containment {:?}",
                    edge.source, edge.target, other
                )))
            }
        }
    }
    Ok(())
}

impl MatchEngine for LocalContext {
    fn init_context(&mut self, jgf: &str, options: &str) -> Result<()> {
        let options: EngineOptions =
            serde_json::from_str(options).map_err(|e| reject(format!("invalid options: {}", e)))?;

        if options.matcher_policy.is_empty() {
            return Err(reject("matcher_policy cannot be empty"));
        }
        if options.load_format != JGF_FORMAT || options.match_format != JGF_FORMAT {
            return Err(reject(format!(
                "unsupported formats load={} match={}",
                options.load_format, options.match_format
            )));
        }

        let persisted = fs::read_to_string(&options.load_file)
            .map_err(|e| reject(format!("cannot read load_file {}: {}", options.load_file, e)))?;
        if persisted != jgf {
            return Err(reject(format!("load_file {} does not match the graph", options.load_file)));
        }

        let graph: JsonGraph =
            serde_json::from_str(jgf).map_err(|e| reject(format!("malformed JGF: {}", e)))?;
        validate_graph(&graph)?;

        log::info!(
            "Loaded {} nodes and {} edges with match policy {}",
            graph.graph.nodes.len(),
            graph.graph.edges.len(),
            options.matcher_policy
        );
        self.loaded = Some(LoadedGraph {
            matcher_policy: options.matcher_policy,
            load_file: options.load_file,
            node_count: graph.graph.nodes.len(),
            edge_count: graph.graph.edges.len(),
        });
        Ok(())
    }
}
