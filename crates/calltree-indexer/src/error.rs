//! Indexer error types

use std::path::PathBuf;

use calltree_core::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid symbol pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid source glob: {0}")]
    Glob(#[from] globset::Error),

    #[error("failed to walk source directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Two source units share a file stem.
    #[error("duplicate symbol '{symbol}': {} and {}", first.display(), second.display())]
    DuplicateSymbol {
        symbol: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl IndexError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
