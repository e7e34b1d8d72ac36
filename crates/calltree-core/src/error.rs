//! Error types for graph and edge-index operations.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors returned by the edge store, traversal, layering and pruning.
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    /// An index file could not be read or written.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// No index file exists for the symbol (it was never scanned).
    #[error("no edge index entry for symbol '{0}'")]
    NotFound(String),

    /// Leaf-polarity peeling stalled on a non-empty graph.
    #[error("cycle detected among {} nodes: {}", remaining.len(), remaining.join(", "))]
    CycleDetected { remaining: Vec<String> },

    /// Root-polarity layering could not reach these nodes from any source.
    #[error("nodes unreachable from any source: {}", nodes.join(", "))]
    Unrooted { nodes: Vec<String> },

    /// The principal symbol is not part of the corpus or graph.
    #[error("unknown principal symbol '{0}'")]
    UnknownPrincipal(String),

    /// A polarity selector other than `leaf` or `root`.
    #[error("invalid polarity '{0}' (expected 'leaf' or 'root')")]
    InvalidPolarity(String),

    /// Serialising the layered graph failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl GraphError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub fn not_found(symbol: impl Into<String>) -> Self {
        Self::NotFound(symbol.into())
    }

    pub fn unknown_principal(symbol: impl Into<String>) -> Self {
        Self::UnknownPrincipal(symbol.into())
    }

    /// Whether this error means "never indexed" rather than a real failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
