//! CLI command implementations

use anyhow::{Context, bail};
use calltree_core::{Polarity, REPORT_WIDTH, depth_limit, graph_sizes, render_size_report};
use calltree_indexer::{Corpus, IndexerConfig, build_edge_index, query};
use std::fs;
use std::path::{Path, PathBuf};

fn load_config(root: &Path) -> anyhow::Result<IndexerConfig> {
    IndexerConfig::load(root)
        .with_context(|| format!("Failed to load configuration from {}", root.display()))
}

pub fn index(root: &Path, force: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    tracing::info!("Indexing corpus: {}", config.source_path().display());

    let summary = build_edge_index(&config, force).context("Failed to build the edge index")?;

    println!(
        "Indexed {} symbols ({} already indexed), {} edges recorded",
        summary.indexed, summary.skipped, summary.edges
    );
    Ok(())
}

pub fn graph(
    root: &Path,
    principal: &str,
    polarity: Polarity,
    max_depth: i64,
    json: bool,
    flip: bool,
) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let mut layered = query(&config, principal, polarity, depth_limit(max_depth))
        .with_context(|| format!("Failed to build the {} graph of '{}'", polarity, principal))?;
    if flip {
        layered = layered.flipped();
    }

    if json {
        println!("{}", layered.to_json()?);
    } else {
        print!("{}", layered.to_text());
    }
    Ok(())
}

pub fn sizes(root: &Path, sort_by: Polarity, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(root)?;
    if !config.index_path().is_dir() {
        bail!(
            "No edge index at {}; run `calltree index` first",
            config.index_path().display()
        );
    }

    let corpus = Corpus::discover(&config)?;
    let symbols: Vec<String> = corpus.symbols().map(str::to_string).collect();
    tracing::info!("Measuring graph sizes for {} symbols", symbols.len());

    let sizes = graph_sizes(&config.store(), &symbols)?;
    let report = render_size_report(&sizes, sort_by, REPORT_WIDTH);

    match output {
        Some(path) => {
            fs::write(&path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => print!("{}", report),
    }
    Ok(())
}

pub fn clear(root: &Path) -> anyhow::Result<()> {
    let config = load_config(root)?;
    tracing::info!("Clearing index: {}", config.index_path().display());

    config.store().remove_all()?;

    tracing::info!("Index cleared");
    Ok(())
}
