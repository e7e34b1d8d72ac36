//! Edge index construction
//!
//! For each symbol S not yet indexed, every other unit is scanned for
//! mentions of S. The callers found become S's inbound list, and S is
//! appended to each caller's outbound list. Symbols are visited in sorted
//! order so the written files do not depend on directory order.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::IndexerConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::scanner::{ReferenceScanner, SymbolPattern, read_unit};

/// What a build did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Symbols scanned in this run.
    pub indexed: usize,
    /// Symbols left alone because their inbound list already existed.
    pub skipped: usize,
    /// Caller→callee pairs recorded in this run.
    pub edges: usize,
}

/// Build or extend the edge index for the corpus described by `config`.
///
/// With `force`, every index file is removed first and the whole corpus is
/// rescanned.
pub fn build_edge_index(config: &IndexerConfig, force: bool) -> Result<BuildSummary> {
    let start = Instant::now();
    let corpus = Corpus::discover(config)?;
    let store = config.store();
    let scanner = ReferenceScanner::from_config(config);

    store.ensure_dir()?;
    if force {
        let removed = store.clear()?;
        info!("Cleared {} index files for a full rebuild", removed);
    }

    // Unit texts, read on the first symbol that needs scanning.
    let mut texts: Option<Vec<(&str, String)>> = None;

    let mut summary = BuildSummary::default();
    for symbol in corpus.symbols() {
        if !force && store.is_indexed(symbol) {
            summary.skipped += 1;
            continue;
        }

        store.touch_outbound(symbol)?;

        let pattern = SymbolPattern::new(symbol)?;
        if texts.is_none() {
            texts = Some(load_units(&corpus)?);
        }
        let callers: Vec<String> = texts
            .iter()
            .flatten()
            .filter(|(caller, text)| {
                *caller != symbol && scanner.mentions_in_text(text, &pattern)
            })
            .map(|(caller, _)| caller.to_string())
            .collect();

        store.write_inbound(symbol, &callers)?;
        for caller in &callers {
            if store.append_outbound(caller, symbol)? {
                summary.edges += 1;
            }
        }

        debug!("Indexed {} ({} callers)", symbol, callers.len());
        summary.indexed += 1;
    }

    if summary.indexed > 0 {
        store.write_manifest(corpus.len())?;
    }

    info!(
        "Edge index built in {:?}: {} indexed, {} skipped, {} edges",
        start.elapsed(),
        summary.indexed,
        summary.skipped,
        summary.edges
    );
    Ok(summary)
}

fn load_units(corpus: &Corpus) -> Result<Vec<(&str, String)>> {
    let texts = corpus
        .units()
        .map(|(symbol, path)| Ok((symbol, read_unit(path)?)))
        .collect::<Result<Vec<_>>>()?;
    debug!("Read {} units", texts.len());
    Ok(texts)
}
