//! Corpus configuration, read from an optional `calltree.toml`

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use calltree_core::{EdgeStore, INDEX_DIR};
use serde::Deserialize;
use tracing::debug;

use crate::error::{IndexError, Result};

pub const CONFIG_FILE: &str = "calltree.toml";

/// Where the corpus lives and how its units are scanned.
///
/// Every field but `root` can be set in `calltree.toml`:
///
/// ```toml
/// source_dir = "code"
/// index_dir = "data"
/// patterns = ["*.m"]
/// comment_prefix = "%"
/// header_lines = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexerConfig {
    #[serde(skip)]
    pub root: PathBuf,
    /// Directory of source units, relative to `root`.
    pub source_dir: String,
    /// Directory of the edge index, relative to `root`.
    pub index_dir: String,
    /// File-name globs selecting source units.
    pub patterns: Vec<String>,
    /// Lines starting with this (after indentation) are comments.
    pub comment_prefix: String,
    /// Declaration lines at the top of each unit, never scanned.
    pub header_lines: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            source_dir: "code".to_string(),
            index_dir: INDEX_DIR.to_string(),
            patterns: vec!["*.m".to_string()],
            comment_prefix: "%".to_string(),
            header_lines: 1,
        }
    }
}

impl IndexerConfig {
    /// Defaults rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Read `<root>/calltree.toml` if present, defaults otherwise.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let path = root.join(CONFIG_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
                return Ok(Self::new(root));
            }
            Err(e) => return Err(IndexError::io(path, e)),
        };

        let mut config: IndexerConfig =
            toml::from_str(&content).map_err(|source| IndexError::Config {
                path: path.clone(),
                source,
            })?;
        config.root = root;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.source_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index_dir)
    }

    pub fn store(&self) -> EdgeStore {
        EdgeStore::at(&self.root, &self.index_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
