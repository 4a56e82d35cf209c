use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::DEFAULT_MATCH_POLICY;
use crate::topology::TopologyQuery;

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "us-east-2";

/// Shape of a cloud region name such as `us-east-2` or `ap-southeast-1`
const REGION_PATTERN: &str = r"^[a-z]{2}(-[a-z]+)+-\d+$";

/// Top-level configuration structure that mirrors the YAML configuration
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub topology: TopologyConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

impl Config {
    /// Fill in settings left blank, such as an empty match policy
    pub fn normalize(&mut self) {
        if self.matcher.policy.trim().is_empty() {
            self.matcher.policy = default_policy();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topology.source.as_os_str().is_empty() {
            return Err(ValidationError::InvalidTopology(
                "source snapshot path cannot be empty".to_string(),
            ));
        }

        let region = Regex::new(REGION_PATTERN)
            .map_err(|e| ValidationError::InvalidTopology(e.to_string()))?;
        if !region.is_match(&self.topology.region) {
            return Err(ValidationError::InvalidTopology(format!(
                "'{}' is not a valid region name",
                self.topology.region
            )));
        }

        if let Some(output) = &self.output {
            if output.path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidOutput(
                    "output path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Query built from the configured filters
    pub fn query(&self) -> TopologyQuery {
        TopologyQuery::new(self.topology.group.as_deref(), self.topology.instance.as_deref())
    }

    /// Where to keep the serialized graph, if anywhere
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_ref().map(|output| output.path.as_path())
    }
}

/// Matching engine settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatcherConfig {
    #[serde(default = "default_policy")]
    pub policy: String,
}

/// Where topology comes from and which part of it to describe
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TopologyConfig {
    /// Saved DescribeInstanceTopology response (JSON or YAML)
    #[serde(default)]
    pub source: PathBuf,
    #[serde(default = "default_region")]
    pub region: String,
    /// Placement group filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Instance id filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub path: PathBuf,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid topology configuration: {0}")]
    InvalidTopology(String),
    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
}

fn default_policy() -> String {
    DEFAULT_MATCH_POLICY.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// Default implementations
impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
        }
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            region: default_region(),
            group: None,
            instance: None,
        }
    }
}
