//! # Flextopo - resource graphs from cloud instance network topology
//!
//! This library turns the per-instance network topology reported by the
//! cloud (an ordered list of network nodes from the top of the hierarchy down
//! to the node an instance is attached to) into a containment graph in JSON
//! Graph Format (JGF), and loads it into a resource matching engine.
//!
//! ## Architecture
//!
//! - `topology`: instance records, query filters, and topology sources
//! - `graph`: unique ids, containment paths, metadata, graph builder, JGF types
//! - `engine`: matching engine interface and an in-process JGF loader
//! - `orchestrator`: one full generation from query to engine context
//! - `config` / `config_loader`: YAML configuration and CLI overrides
//! - `error`: the error taxonomy shared by every stage
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use flextopo::engine::LocalContext;
//! use flextopo::graph::GraphBuilder;
//! use flextopo::orchestrator::generate_topology;
//! use flextopo::topology::{SnapshotSource, TopologyQuery};
//!
//! let source = SnapshotSource::new("topology.json").with_region("us-east-2");
//! let mut builder = GraphBuilder::new();
//! let mut engine = LocalContext::new();
//!
//! let summary = generate_topology(
//!     &mut builder,
//!     &source,
//!     &TopologyQuery::new(Some("ml-group"), None),
//!     &mut engine,
//!     "first",
//!     None,
//! )?;
//! println!("{} nodes, {} edges", summary.node_count, summary.edge_count);
//! # Ok::<(), flextopo::error::TopologyError>(())
//! ```
//!
//! ## Graph Shape
//!
//! ```text
//! cluster (0)  /cluster
//! \-- nn-top (1)  /cluster/node1
//!     \-- nn-leaf (2)  /cluster/node1/node2
//!         \-- i-0abc (3)  /cluster/node1/node2/instance3
//! ```
//!
//! Every parent/child pair becomes two edges: `contains` from parent to child
//! and `in` from child to parent.
//!
//! ## Error Handling
//!
//! Library operations return [`error::TopologyError`], which separates an
//! empty query result from transport, serialization, persistence and engine
//! failures. The binary wraps these with `color_eyre` context.

pub mod config;
pub mod config_loader;
pub mod engine;
pub mod error;
pub mod graph;
pub mod orchestrator;
pub mod topology;
