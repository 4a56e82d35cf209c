//! JSON Graph Format (JGF) document types.
//!
//! The matching engine reads a single document of the shape
//! `{"graph": {"nodes": [...], "edges": [...]}}`. Node ids are strings on the
//! outside while `uniq_id`/`id` inside the metadata stay integers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Free-form metadata attached to a node or edge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Metadata(Map::new())
    }

    /// Set `key` to `value`, replacing any previous value
    pub fn add_element(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Value of `paths.containment`, if present
    pub fn containment_path(&self) -> Option<&str> {
        self.0.get("paths")?.get("containment")?.as_str()
    }

    /// Value of `name.containment` on an edge, if present
    pub fn edge_containment(&self) -> Option<&str> {
        self.0.get("name")?.get("containment")?.as_str()
    }
}

/// A graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub metadata: Metadata,
}

/// A directed graph edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub metadata: Metadata,
}

/// Node and edge lists of a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Top-level JGF document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonGraph {
    pub graph: Graph,
}

impl JsonGraph {
    /// Render the document as indented JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_json()?.into_bytes())
    }

    /// Parse a document previously produced by [`JsonGraph::to_bytes`]
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.graph.nodes.iter().find(|node| node.id == id)
    }

    /// Node whose label is `label`
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        self.graph.nodes.iter().find(|node| node.label == label)
    }

    /// Edges from `source` to `target`
    pub fn edges_between<'a>(&'a self, source: &'a str, target: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.graph
            .edges
            .iter()
            .filter(move |edge| edge.source == source && edge.target == target)
    }
}
