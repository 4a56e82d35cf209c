//! Graph builder.
//!
//! Each instance reports the network nodes on its path, ordered from the top
//! of the hierarchy down to the node it is attached to:
//!
//! ```text
//! NetworkNodes: ["nn-ec17a935b39a06f41", "nn-dd9ec3119ca6ea9dc", "nn-a59759166e67e7c02"]
//! ```
//!
//! `nn-ec17*` sits at the top and the instance hangs off `nn-a59*`. Two
//! instances attached to the same node are close together, and the closer two
//! instances are in the graph overall, the closer they are physically.
//!
//! The builder walks these chains, creates each node once, and records every
//! parent/child relation once no matter how many chains pass through it.

use std::collections::{HashMap, HashSet};

use super::ids::{IdRegistry, UniqueId};
use super::jgf::{Edge, Graph, JsonGraph, Node};
use super::metadata::{self, Containment};
use super::paths::{assemble_path, containment_path, root_path};
use super::{CLUSTER_TYPE, INSTANCE_TYPE, NODE_TYPE, ROOT_UID};
use crate::topology::InstanceRecord;

/// Accumulates nodes and containment relations for one topology snapshot
#[derive(Debug)]
pub struct GraphBuilder {
    registry: IdRegistry,
    /// Nodes in creation order
    nodes: Vec<Node>,
    /// uid -> index into `nodes`
    node_index: HashMap<u32, usize>,
    /// (parent, child) in the order first requested
    relations: Vec<(u32, u32)>,
    /// Canonical (min, max) pairs already recorded
    seen_relations: HashSet<(u32, u32)>,
}

impl GraphBuilder {
    /// Create a builder holding only the cluster root
    pub fn new() -> Self {
        let mut builder = GraphBuilder {
            registry: IdRegistry::new(),
            nodes: Vec::new(),
            node_index: HashMap::new(),
            relations: Vec::new(),
            seen_relations: HashSet::new(),
        };
        builder.reset();
        builder
    }

    /// Drop all nodes, relations and ids, then recreate the root
    pub fn reset(&mut self) {
        self.registry.reset();
        self.nodes.clear();
        self.node_index.clear();
        self.relations.clear();
        self.seen_relations.clear();

        let root = Node {
            id: ROOT_UID.to_string(),
            label: CLUSTER_TYPE.to_string(),
            metadata: metadata::root_metadata(&root_path()),
        };
        self.insert_node(ROOT_UID, root);
    }

    /// Reset, add every record, and flatten into a JGF document
    pub fn build(&mut self, records: &[InstanceRecord]) -> JsonGraph {
        self.reset();
        self.populate(records);
        self.finalize()
    }

    /// Add nodes and relations for each record in input order
    pub fn populate(&mut self, records: &[InstanceRecord]) {
        for record in records {
            self.add_record(record);
        }
    }

    /// Add one instance, its network node chain, and the relations between them
    pub fn add_record(&mut self, record: &InstanceRecord) {
        let instance_uid = self.add_instance_node(record);
        let chain = &record.network_nodes;

        // No network nodes, the instance hangs directly off the root
        if chain.is_empty() {
            log::warn!("Instance {} reports no network nodes, attaching it to the root", record.instance_id);
            self.add_relation(ROOT_UID, instance_uid);
            return;
        }

        for (i, name) in chain.iter().enumerate() {
            // Create the network node, providing parents up to it
            let node_uid = self.add_network_node(name, &chain[..i]);

            if i == 0 {
                // Top of the chain hangs off the root
                self.add_relation(ROOT_UID, node_uid);
            } else {
                let parent = self.registry.get_or_create(&chain[i - 1]);
                self.add_relation(parent.uid, node_uid);
            }

            // Last entry is the node the instance is attached to
            if i == chain.len() - 1 {
                self.add_relation(node_uid, instance_uid);
            }
        }
    }

    /// Create the instance node if needed and return its uid.
    ///
    /// Ancestors are registered before the instance itself, so an instance
    /// always receives a higher id than the network nodes above it.
    pub fn add_instance_node(&mut self, record: &InstanceRecord) -> u32 {
        let parents = assemble_path(&mut self.registry, &record.network_nodes);
        let uid = self.registry.get_or_create(&record.instance_id);

        if !self.node_index.contains_key(&uid.uid) {
            log::debug!("Creating instance node for {}", record.instance_id);
            let path = containment_path(&parents, INSTANCE_TYPE, uid.uid);
            let node = Node {
                id: uid.to_string(),
                label: uid.name.clone(),
                metadata: metadata::instance_metadata(record, &uid, &path),
            };
            self.insert_node(uid.uid, node);
        }
        uid.uid
    }

    /// Create a network node below `parents` if needed and return its uid
    pub fn add_network_node(&mut self, name: &str, parents: &[String]) -> u32 {
        let uid = self.registry.get_or_create(name);

        if !self.node_index.contains_key(&uid.uid) {
            log::debug!("Creating network node for {}", name);
            let ancestors = assemble_path(&mut self.registry, parents);
            let path = containment_path(&ancestors, NODE_TYPE, uid.uid);
            let node = Node {
                id: uid.to_string(),
                label: uid.name.clone(),
                metadata: metadata::network_node_metadata(&uid, &path),
            };
            self.insert_node(uid.uid, node);
        }
        uid.uid
    }

    /// Record that `parent` contains `child`.
    ///
    /// Returns false when the pair was already recorded in either direction.
    pub fn add_relation(&mut self, parent: u32, child: u32) -> bool {
        // Edges are bidirectional, so key on the sorted pair
        let key = (parent.min(child), parent.max(child));
        if !self.seen_relations.insert(key) {
            return false;
        }
        self.relations.push((parent, child));
        true
    }

    /// Flatten nodes and relations into a JGF document.
    ///
    /// Each relation becomes a "contains" edge and an "in" edge.
    pub fn finalize(&self) -> JsonGraph {
        for node in &self.nodes {
            log::debug!("Creating node {} {}", node.id, node.label);
        }

        let mut edges = Vec::with_capacity(self.relations.len() * 2);
        for &(parent, child) in &self.relations {
            log::debug!("Creating edge ({} contains-> {}) ({} in-> {})", parent, child, child, parent);
            edges.push(Edge {
                source: parent.to_string(),
                target: child.to_string(),
                metadata: metadata::edge_metadata(Containment::Contains),
            });
            edges.push(Edge {
                source: child.to_string(),
                target: parent.to_string(),
                metadata: metadata::edge_metadata(Containment::In),
            });
        }

        JsonGraph {
            graph: Graph {
                nodes: self.nodes.clone(),
                edges,
            },
        }
    }

    /// Id assigned to `name` in this run, if any
    pub fn lookup(&self, name: &str) -> Option<&UniqueId> {
        self.registry.get(name)
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct parent/child relations
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn insert_node(&mut self, uid: u32, node: Node) {
        self.node_index.insert(uid, self.nodes.len());
        self.nodes.push(node);
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
