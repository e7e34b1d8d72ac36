//! Corpus scanning and edge index construction

pub mod builder;
pub mod config;
pub mod corpus;
pub mod error;
pub mod query;
pub mod scanner;

#[cfg(test)]
pub mod test_utils;


pub use builder::{BuildSummary, build_edge_index};
pub use config::{CONFIG_FILE, IndexerConfig};
pub use corpus::Corpus;
pub use error::{IndexError, Result};
pub use query::query;
pub use scanner::{ReferenceScanner, SymbolPattern, read_unit};
