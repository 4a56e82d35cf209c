//! Topology sources.
//!
//! A source answers a [`TopologyQuery`] with the instances it knows about.
//! [`SnapshotSource`] reads a saved DescribeInstanceTopology response from
//! disk, in JSON or YAML.

use std::fs;
use std::path::PathBuf;

use super::types::{InstanceRecord, TopologyQuery, TopologySnapshot};
use crate::error::{Result, TopologyError};

/// Anything that can describe instance network topology
pub trait TopologySource {
    /// Return the instances matching `query`, possibly none
    fn describe(&self, query: &TopologyQuery) -> Result<Vec<InstanceRecord>>;
}

/// Topology read from a saved response file
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
    region: Option<String>,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotSource {
            path: path.into(),
            region: None,
        }
    }

    /// Only describe instances whose availability zone lies in `region`
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    fn load(&self) -> Result<TopologySnapshot> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            TopologyError::transport(format!("reading snapshot {}", self.path.display()), e)
        })?;

        let is_yaml = matches!(
            self.path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let snapshot = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| {
                TopologyError::transport(format!("parsing snapshot {}", self.path.display()), e)
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                TopologyError::transport(format!("parsing snapshot {}", self.path.display()), e)
            })?
        };
        Ok(snapshot)
    }
}

impl TopologySource for SnapshotSource {
    fn describe(&self, query: &TopologyQuery) -> Result<Vec<InstanceRecord>> {
        log::info!("Reading topology snapshot from {:?}", self.path);
        let snapshot = self.load()?;

        if snapshot.next_token.is_some() {
            log::warn!("Snapshot {:?} is one page of a paginated response, later pages are not included", self.path);
        }

        let total = snapshot.instances.len();
        let records: Vec<InstanceRecord> = snapshot
            .instances
            .into_iter()
            .filter(|record| match &self.region {
                Some(region) if !record.in_region(region) => {
                    log::warn!(
                        "Skipping instance {} in {:?}, outside region {}",
                        record.instance_id,
                        record.availability_zone,
                        region
                    );
                    false
                }
                _ => true,
            })
            .filter(|record| query.matches(record))
            .collect();

        log::info!("Snapshot describes {} of {} instances for {}", records.len(), total, query);
        Ok(records)
    }
}
