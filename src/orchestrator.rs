//! Topology graph orchestrator.
//!
//! This module runs one full generation: query the topology source, build
//! the graph, persist it, and initialize the matching engine with it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{EngineOptions, MatchEngine};
use crate::error::{Result, TopologyError};
use crate::graph::GraphBuilder;
use crate::topology::{TopologyQuery, TopologySource};

/// Prefix of the scratch file used when no output path is given
const SCRATCH_PREFIX: &str = "aws-topology-";

/// Outcome of a successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct TopologySummary {
    pub instance_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    /// Where the graph was kept, if the caller asked for a file
    pub saved_to: Option<PathBuf>,
}

/// Generate the topology graph for `query` and load it into `engine`.
///
/// The builder is reset first, so one builder can serve sequential runs.
/// When `save_file` is `None` the graph is written to a scratch file that is
/// removed once the engine has been initialized. A `save_file` is removed
/// again if the engine rejects the graph.
pub fn generate_topology<S, E>(
    builder: &mut GraphBuilder,
    source: &S,
    query: &TopologyQuery,
    engine: &mut E,
    match_policy: &str,
    save_file: Option<&Path>,
) -> Result<TopologySummary>
where
    S: TopologySource + ?Sized,
    E: MatchEngine + ?Sized,
{
    // Reset counter, ids, nodes and edges
    builder.reset();

    // Get topology for instances
    log::info!("Topology Query Parameters: {}", query);
    let records = source.describe(query)?;

    // No instances found
    if records.is_empty() {
        return Err(TopologyError::EmptyResult {
            query: query.to_string(),
        });
    }

    // Create nodes and edges once
    builder.populate(&records);
    let graph = builder.finalize();
    log::info!(
        "Built graph with {} nodes and {} edges from {} instances",
        builder.node_count(),
        graph.graph.edges.len(),
        records.len()
    );

    // Serialize, persist, and init the engine context
    let jgf = graph.to_json()?;
    let saved_to = init_engine_context(engine, &jgf, match_policy, save_file)?;

    Ok(TopologySummary {
        instance_count: records.len(),
        node_count: builder.node_count(),
        edge_count: graph.graph.edges.len(),
        saved_to,
    })
}

/// Persist `jgf` and hand both the bytes and the path to the engine
fn init_engine_context<E>(
    engine: &mut E,
    jgf: &str,
    match_policy: &str,
    save_file: Option<&Path>,
) -> Result<Option<PathBuf>>
where
    E: MatchEngine + ?Sized,
{
    match save_file {
        Some(path) => {
            write_graph(path, jgf)?;

            // A rejected graph leaves no file behind
            if let Err(e) = load_engine(engine, jgf, match_policy, path) {
                if let Err(remove_err) = fs::remove_file(path) {
                    log::warn!("Failed to remove rejected graph {:?}: {}", path, remove_err);
                }
                return Err(e);
            }

            log::info!("Saved graph to {:?}", path);
            Ok(Some(path.to_path_buf()))
        }
        None => {
            // No save file, so use a temporary one
            let scratch = tempfile::Builder::new()
                .prefix(SCRATCH_PREFIX)
                .suffix(".json")
                .tempfile()
                .map_err(|e| TopologyError::Persistence {
                    path: std::env::temp_dir(),
                    source: e,
                })?;
            write_graph(scratch.path(), jgf)?;
            load_engine(engine, jgf, match_policy, scratch.path())?;
            // scratch is removed when dropped
            Ok(None)
        }
    }
}

fn write_graph(path: &Path, jgf: &str) -> Result<()> {
    fs::write(path, jgf).map_err(|e| TopologyError::Persistence {
        path: path.to_path_buf(),
        source: e,
    })
}

fn load_engine<E>(engine: &mut E, jgf: &str, match_policy: &str, path: &Path) -> Result<()>
where
    E: MatchEngine + ?Sized,
{
    let options = EngineOptions::new(match_policy, path);
    log::info!(" Match policy: {}", options.matcher_policy);
    log::info!(" Load format: JSON Graph Format (JGF)");
    engine.init_context(jgf, &options.to_json()?)?;
    log::info!("Init context complete!");
    Ok(())
}
