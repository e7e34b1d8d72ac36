//! On-disk edge index: one inbound and one outbound list per symbol
//!
//! Layout under the index directory:
//!
//! ```text
//! <symbol>_in.txt    callers of <symbol>, one per line
//! <symbol>_out.txt   callees of <symbol>, one per line
//! manifest.json      version, symbol count, build time
//! ```

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::model::Polarity;
use crate::traversal::RelativeSource;

/// Default index directory, relative to the corpus root.
pub const INDEX_DIR: &str = "data";

/// Manifest file written after each build that indexed something.
pub const MANIFEST: &str = "manifest.json";

const LIST_EXT: &str = "txt";

/// Build metadata stored next to the edge lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub symbol_count: usize,
    pub built_at: String,
}

/// Handle on an edge index directory.
#[derive(Debug, Clone)]
pub struct EdgeStore {
    dir: PathBuf,
}

impl EdgeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        EdgeStore { dir: dir.into() }
    }

    /// Store at `<root>/<index_dir>`.
    pub fn at(root: &Path, index_dir: &str) -> Self {
        Self::new(root.join(index_dir))
    }

    /// Path of the list file holding `symbol`'s relatives for `polarity`.
    pub fn list_path(&self, symbol: &str, polarity: Polarity) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", symbol, polarity.index_suffix(), LIST_EXT))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST)
    }

    /// Create the index directory if it does not exist.
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| GraphError::io(&self.dir, e))?;
        }
        Ok(())
    }

    /// A symbol counts as indexed once its inbound list exists.
    pub fn is_indexed(&self, symbol: &str) -> bool {
        self.list_path(symbol, Polarity::Leaf).is_file()
    }

    /// Read the relatives of `symbol`: callers for `Leaf`, callees for `Root`.
    /// The symbol itself is filtered out.
    pub fn relatives(&self, symbol: &str, polarity: Polarity) -> Result<Vec<String>> {
        let path = self.list_path(symbol, polarity);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(GraphError::not_found(symbol));
            }
            Err(e) => return Err(GraphError::io(path, e)),
        };
        Ok(parse_list(&content)
            .filter(|name| *name != symbol)
            .map(str::to_string)
            .collect())
    }

    /// Overwrite the inbound list of `symbol`.
    pub fn write_inbound(&self, symbol: &str, callers: &[String]) -> Result<()> {
        let path = self.list_path(symbol, Polarity::Leaf);
        let body: String = callers.iter().map(|c| format!("{c}\n")).collect();
        fs::write(&path, body).map_err(|e| GraphError::io(path, e))
    }

    /// Create an empty outbound list for `symbol` unless one exists.
    pub fn touch_outbound(&self, symbol: &str) -> Result<()> {
        let path = self.list_path(symbol, Polarity::Root);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map(|_| ())
            .map_err(|e| GraphError::io(path, e))
    }

    /// Append `callee` to `caller`'s outbound list unless already recorded.
    /// Returns whether a line was written.
    pub fn append_outbound(&self, caller: &str, callee: &str) -> Result<bool> {
        let path = self.list_path(caller, Polarity::Root);
        let existing = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(GraphError::io(path, e)),
        };
        if parse_list(&existing).any(|name| name == callee) {
            return Ok(false);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| GraphError::io(&path, e))?;
        // Repair a list whose last line lost its terminator.
        let prefix = if existing.is_empty() || existing.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        writeln!(file, "{prefix}{callee}").map_err(|e| GraphError::io(&path, e))?;
        Ok(true)
    }

    /// Delete every edge list and the manifest. Other files are left alone.
    /// Returns the number of files removed.
    pub fn clear(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(GraphError::io(&self.dir, e)),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| GraphError::io(&self.dir, e))?;
            let path = entry.path();
            if !path.is_file() || !is_index_file(&path) {
                continue;
            }
            fs::remove_file(&path).map_err(|e| GraphError::io(&path, e))?;
            removed += 1;
        }
        tracing::debug!("Cleared {} index files from {}", removed, self.dir.display());
        Ok(removed)
    }

    /// Remove the whole index directory.
    pub fn remove_all(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).map_err(|e| GraphError::io(&self.dir, e))?;
        }
        Ok(())
    }

    pub fn write_manifest(&self, symbol_count: usize) -> Result<Manifest> {
        self.ensure_dir()?;
        let manifest = Manifest {
            version: env!("CARGO_PKG_VERSION").to_string(),
            symbol_count,
            built_at: chrono::Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| GraphError::Serialization(e.to_string()))?;
        let path = self.manifest_path();
        fs::write(&path, json).map_err(|e| GraphError::io(&path, e))?;
        tracing::debug!("Index manifest saved: {}", path.display());
        Ok(manifest)
    }

    pub fn read_manifest(&self) -> Result<Option<Manifest>> {
        let path = self.manifest_path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(GraphError::io(path, e)),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| GraphError::Serialization(e.to_string()))
    }
}

impl RelativeSource for EdgeStore {
    fn relatives(&self, symbol: &str, polarity: Polarity) -> Result<Vec<String>> {
        EdgeStore::relatives(self, symbol, polarity)
    }
}

fn parse_list(content: &str) -> impl Iterator<Item = &str> {
    content.lines().map(str::trim).filter(|line| !line.is_empty())
}

fn is_index_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name == MANIFEST {
        return true;
    }
    let Some(stem) = name.strip_suffix(".txt") else {
        return false;
    };
    stem.ends_with(Polarity::Leaf.index_suffix()) || stem.ends_with(Polarity::Root.index_suffix())
}
