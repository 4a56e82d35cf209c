use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use flextopo::config::Config;
use flextopo::config_loader::{self, CliOverrides};
use flextopo::engine::LocalContext;
use flextopo::graph::GraphBuilder;
use flextopo::orchestrator::generate_topology;
use flextopo::topology::SnapshotSource;

/// Build a resource graph from instance network topology and load it into the matcher
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional YAML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Saved DescribeInstanceTopology response (JSON or YAML)
    #[arg(short, long)]
    topology: Option<PathBuf>,

    /// Match policy
    #[arg(long)]
    policy: Option<String>,

    /// Cloud region
    #[arg(long)]
    region: Option<String>,

    /// Instance ID to get topology for
    #[arg(long)]
    instance: Option<String>,

    /// Placement group to get topology for
    #[arg(long)]
    group: Option<String>,

    /// Save the JSON graph to this file instead of a temporary one
    #[arg(long)]
    file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            policy: self.policy.clone(),
            region: self.region.clone(),
            group: self.group.clone(),
            instance: self.instance.clone(),
            topology: self.topology.clone(),
            file: self.file.clone(),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    info!("Starting flextopo topology graph generation");

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => Config::default(),
    };
    config_loader::apply_cli_overrides(&mut config, &args.overrides())?;

    info!("Region: {}", config.topology.region);
    info!("Topology snapshot: {:?}", config.topology.source);

    let source = SnapshotSource::new(&config.topology.source).with_region(config.topology.region.clone());
    let mut builder = GraphBuilder::new();
    let mut engine = LocalContext::new();

    let summary = generate_topology(
        &mut builder,
        &source,
        &config.query(),
        &mut engine,
        &config.matcher.policy,
        config.output_path(),
    )
    .wrap_err("There was a problem generating the topology")?;

    info!(
        "Loaded {} instances as {} nodes and {} edges",
        summary.instance_count, summary.node_count, summary.edge_count
    );
    if let Some(path) = &summary.saved_to {
        info!("Graph saved to {:?}", path);
    }

    Ok(())
}
