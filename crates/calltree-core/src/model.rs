//! Core value types shared by the index, traversal and layering code

use std::fmt;
use std::str::FromStr;

use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Which way a query expands from its principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Collect everything that (transitively) calls the principal.
    #[default]
    Leaf,
    /// Collect everything the principal (transitively) calls.
    Root,
}

impl Polarity {
    /// Suffix of the index file holding this polarity's relatives.
    pub fn index_suffix(self) -> &'static str {
        match self {
            Polarity::Leaf => "_in",
            Polarity::Root => "_out",
        }
    }

    /// Orient a (current, relative) pair as a caller→callee edge.
    pub fn orient<'a>(self, current: &'a str, relative: &'a str) -> (&'a str, &'a str) {
        match self {
            Polarity::Leaf => (relative, current),
            Polarity::Root => (current, relative),
        }
    }

    /// Edge direction that leads away from the principal.
    pub fn outward(self) -> Direction {
        match self {
            Polarity::Leaf => Direction::Incoming,
            Polarity::Root => Direction::Outgoing,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Leaf => "leaf",
            Polarity::Root => "root",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leaf" => Ok(Polarity::Leaf),
            "root" => Ok(Polarity::Root),
            other => Err(GraphError::InvalidPolarity(other.to_string())),
        }
    }
}
