//! Topology record and query types.
//!
//! Field names follow the DescribeInstanceTopology response so that a saved
//! response can be read back without translation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Network placement of one compute instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceRecord {
    pub instance_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Network nodes from the top of the hierarchy down to the one nearest the instance
    #[serde(default)]
    pub network_nodes: Vec<String>,
}

impl InstanceRecord {
    /// Record with no cloud attributes
    pub fn new(instance_id: &str, network_nodes: Vec<String>) -> Self {
        InstanceRecord {
            instance_id: instance_id.to_string(),
            availability_zone: None,
            instance_type: None,
            zone_id: None,
            group_name: None,
            network_nodes,
        }
    }

    /// True when the availability zone is unknown or belongs to `region`
    pub fn in_region(&self, region: &str) -> bool {
        match &self.availability_zone {
            Some(zone) => zone.starts_with(region),
            None => true,
        }
    }
}

/// One page of a DescribeInstanceTopology response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologySnapshot {
    #[serde(rename = "Instances", default)]
    pub instances: Vec<InstanceRecord>,
    #[serde(rename = "NextToken", default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Filters narrowing which instances are described
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyQuery {
    /// Placement group name
    pub group: Option<String>,
    /// Instance id
    pub instance: Option<String>,
}

impl TopologyQuery {
    /// Build a query, treating empty strings as "no filter"
    pub fn new(group: Option<&str>, instance: Option<&str>) -> Self {
        let non_empty = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);
        TopologyQuery {
            group: non_empty(group),
            instance: non_empty(instance),
        }
    }

    /// True when `record` passes every filter that is set
    pub fn matches(&self, record: &InstanceRecord) -> bool {
        let group_ok = match &self.group {
            Some(group) => record.group_name.as_deref() == Some(group.as_str()),
            None => true,
        };
        let instance_ok = match &self.instance {
            Some(instance) => record.instance_id == *instance,
            None => true,
        };
        group_ok && instance_ok
    }
}

impl fmt::Display for TopologyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params = Vec::new();
        if let Some(group) = &self.group {
            params.push(format!("GroupNames=[{}]", group));
        }
        if let Some(instance) = &self.instance {
            params.push(format!("InstanceIds=[{}]", instance));
        }
        if params.is_empty() {
            write!(f, "all instances")
        } else {
            write!(f, "{}", params.join(", "))
        }
    }
}
