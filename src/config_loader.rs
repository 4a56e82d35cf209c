use crate::config::{Config, OutputConfig};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let mut config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.normalize();
    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub policy: Option<String>,
    pub region: Option<String>,
    pub group: Option<String>,
    pub instance: Option<String>,
    pub topology: Option<PathBuf>,
    pub file: Option<PathBuf>,
}

/// Apply CLI overrides to a configuration and re-validate it
pub fn apply_cli_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(policy) = &overrides.policy {
        info!("Match policy override: {}", policy);
        config.matcher.policy = policy.clone();
    }

    if let Some(region) = &overrides.region {
        config.topology.region = region.clone();
    }

    if let Some(group) = &overrides.group {
        config.topology.group = Some(group.clone());
    }

    if let Some(instance) = &overrides.instance {
        config.topology.instance = Some(instance.clone());
    }

    if let Some(topology) = &overrides.topology {
        config.topology.source = topology.clone();
    }

    if let Some(file) = &overrides.file {
        config.output = Some(OutputConfig { path: file.clone() });
    }

    // An empty policy means the engine default
    config.normalize();
    config.validate()?;

    Ok(())
}
