//! Test fixtures for the indexer

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::config::IndexerConfig;

/// Create a corpus root with `code/<name>` for each `(name, body)`.
pub fn create_corpus(units: &[(&str, &str)]) -> (TempDir, IndexerConfig) {
    let temp_dir = TempDir::new().unwrap();
    let code = temp_dir.path().join("code");
    fs::create_dir_all(&code).unwrap();
    for (name, body) in units {
        fs::write(code.join(name), body).unwrap();
    }
    let config = IndexerConfig::new(temp_dir.path());
    (temp_dir, config)
}

/// The three-unit chain a → b → c.
pub fn create_chain_corpus() -> (TempDir, IndexerConfig) {
    create_corpus(&[
        ("a.m", "function a()\n  x = b(1);\nend\n"),
        ("b.m", "function y = b(x)\n  y = c(x);\nend\n"),
        ("c.m", "function y = c(x)\n  y = x + 1;\nend\n"),
    ])
}

/// Read a list file as written, or `None` when it is absent.
pub fn read_list(dir: &Path, file: &str) -> Option<String> {
    fs::read_to_string(dir.join(file)).ok()
}

/// File name → content for everything in `dir`.
pub fn snapshot_dir(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let name = entry.file_name().to_string_lossy().into_owned();
        files.insert(name, fs::read(entry.path()).unwrap());
    }
    files
}
