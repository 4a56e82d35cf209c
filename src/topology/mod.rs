//! Instance network topology input.
//!
//! This module defines the per-instance records the graph is built from and
//! the sources that produce them.

pub mod source;
pub mod types;

// Re-export key types for easier access
pub use source::{SnapshotSource, TopologySource};
pub use types::{InstanceRecord, TopologyQuery, TopologySnapshot};
