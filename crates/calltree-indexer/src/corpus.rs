//! Source unit discovery

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use calltree_core::GraphError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::debug;

use crate::config::IndexerConfig;
use crate::error::{IndexError, Result};

/// The set of source units, keyed by symbol (file stem).
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    units: BTreeMap<String, PathBuf>,
}

impl Corpus {
    /// List the units directly under the configured source directory.
    pub fn discover(config: &IndexerConfig) -> Result<Self> {
        let matcher = build_matcher(&config.patterns)?;
        let source_dir = config.source_path();
        if !source_dir.is_dir() {
            return Err(IndexError::io(
                &source_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "source directory not found"),
            ));
        }

        let mut units: BTreeMap<String, PathBuf> = BTreeMap::new();
        let walker = WalkBuilder::new(&source_dir)
            .max_depth(Some(1))
            .standard_filters(false)
            .hidden(true)
            .build();

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.into_path();
            let Some(name) = path.file_name() else {
                continue;
            };
            if !matcher.is_match(name) {
                continue;
            }
            let Some(symbol) = symbol_of(&path) else {
                continue;
            };

            match units.entry(symbol) {
                Entry::Vacant(slot) => {
                    slot.insert(path);
                }
                Entry::Occupied(slot) => {
                    return Err(IndexError::DuplicateSymbol {
                        symbol: slot.key().clone(),
                        first: slot.get().clone(),
                        second: path,
                    });
                }
            }
        }

        debug!("Discovered {} units in {}", units.len(), source_dir.display());
        Ok(Corpus { units })
    }

    /// Symbols in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// (symbol, path) pairs in symbol order.
    pub fn units(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.units
            .iter()
            .map(|(symbol, path)| (symbol.as_str(), path.as_path()))
    }

    pub fn path_of(&self, symbol: &str) -> Option<&Path> {
        self.units.get(symbol).map(PathBuf::as_path)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.units.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Fail fast on a principal that names no unit.
    pub fn require(&self, principal: &str) -> Result<()> {
        if self.contains(principal) {
            Ok(())
        } else {
            Err(GraphError::unknown_principal(principal).into())
        }
    }
}

fn build_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// File name up to the first dot.
fn symbol_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.split('.').next()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
