//! Resource graph construction.
//!
//! This module turns per-instance network node chains into a containment
//! hierarchy in JSON Graph Format (JGF). Each network node and instance gets
//! a run-scoped unique id, a containment path under the synthetic cluster
//! root, and a pair of "contains"/"in" edges to its parent.

pub mod builder;
pub mod ids;
pub mod jgf;
pub mod metadata;
pub mod paths;

pub use builder::GraphBuilder;
pub use ids::{IdRegistry, UniqueId};
pub use jgf::{Edge, Graph, JsonGraph, Metadata, Node};
pub use metadata::Containment;
pub use paths::{assemble_path, containment_path};

/// Resource type of the synthetic root
pub const CLUSTER_TYPE: &str = "cluster";

/// Resource type of a network node (switch tier)
pub const NODE_TYPE: &str = "node";

/// Resource type of a compute instance
pub const INSTANCE_TYPE: &str = "instance";

/// Unique id of the synthetic root, never handed out by the registry
pub const ROOT_UID: u32 = 0;
