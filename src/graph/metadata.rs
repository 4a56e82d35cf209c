//! Node and edge metadata.
//!
//! The JGF reader of the matching engine rejects nodes that lack any of
//! `type`, `basename`, `name`, `rank`, `status`, `exclusive`, `unit`, `size`,
//! `uniq_id`, `id` or `paths.containment`.

use serde_json::json;

use super::ids::UniqueId;
use super::jgf::Metadata;
use super::{CLUSTER_TYPE, INSTANCE_TYPE, NODE_TYPE, ROOT_UID};
use crate::topology::InstanceRecord;

/// Metadata keys every node must carry
pub const REQUIRED_NODE_FIELDS: [&str; 11] = [
    "type", "basename", "name", "rank", "status", "exclusive", "unit", "size", "uniq_id", "id", "paths",
];

/// Direction of a containment edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Parent to child
    Contains,
    /// Child to parent
    In,
}

impl Containment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Containment::Contains => "contains",
            Containment::In => "in",
        }
    }
}

/// Required fields with the defaults the engine expects
pub fn default_metadata(typ: &str) -> Metadata {
    let mut m = Metadata::new();
    m.add_element("type", typ);
    m.add_element("basename", typ);
    m.add_element("name", typ);
    m.add_element("rank", -1);
    m.add_element("status", -1);
    m.add_element("exclusive", false);
    m.add_element("unit", "");
    m.add_element("size", 1);
    m
}

/// Edge metadata naming the containment direction
pub fn edge_metadata(containment: Containment) -> Metadata {
    let mut m = Metadata::new();
    m.add_element("name", json!({ "containment": containment.as_str() }));
    m
}

fn add_identity(m: &mut Metadata, uid: u32, path: &str) {
    m.add_element("uniq_id", uid);
    m.add_element("id", uid);
    m.add_element("paths", json!({ "containment": path }));
}

/// Metadata of the cluster root
pub fn root_metadata(path: &str) -> Metadata {
    let mut m = default_metadata(CLUSTER_TYPE);
    add_identity(&mut m, ROOT_UID, path);
    m
}

/// Metadata of a network node
pub fn network_node_metadata(uid: &UniqueId, path: &str) -> Metadata {
    let mut m = default_metadata(NODE_TYPE);
    add_identity(&mut m, uid.uid, path);
    m
}

/// Metadata of an instance, including its cloud attributes.
///
/// Attributes the topology source did not report are written as empty strings.
pub fn instance_metadata(record: &InstanceRecord, uid: &UniqueId, path: &str) -> Metadata {
    let mut m = default_metadata(INSTANCE_TYPE);
    add_identity(&mut m, uid.uid, path);

    let attribute = |value: &Option<String>| value.clone().unwrap_or_default();
    m.add_element("availability_zone", attribute(&record.availability_zone));
    m.add_element("instance_type", attribute(&record.instance_type));
    m.add_element("zone_id", attribute(&record.zone_id));
    m.add_element("group", attribute(&record.group_name));
    m
}
