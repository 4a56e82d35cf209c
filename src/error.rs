//! Error types for topology graph generation.

use std::path::PathBuf;

/// Result type for topology operations
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors that can occur while fetching, building, persisting or loading a topology graph
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// The topology source returned no instances for the query
    #[error("No instances were found for this query ({query})")]
    EmptyResult { query: String },

    /// The topology source could not be queried
    #[error("describe instance topology: {context}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The graph could not be rendered to JSON
    #[error("Error serializing graph: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The serialized graph could not be written
    #[error("Error writing json to file {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The matching engine rejected the graph or its options
    #[error("Error creating context: {0}")]
    EngineInit(String),
}

impl TopologyError {
    /// Wrap a topology source failure with context
    pub fn transport<E>(context: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TopologyError::Transport {
            context: context.into(),
            source: source.into(),
        }
    }

    /// True when the failure is an empty query result rather than a fault
    pub fn is_empty_result(&self) -> bool {
        matches!(self, TopologyError::EmptyResult { .. })
    }
}
