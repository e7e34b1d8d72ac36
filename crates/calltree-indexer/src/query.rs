//! One-call graph query over a built index

use calltree_core::{LayeredGraph, Polarity, compute_layers, prune_to_depth, traverse};
use tracing::info;

use crate::config::IndexerConfig;
use crate::corpus::Corpus;
use crate::error::Result;

/// Check the principal, traverse, drop back edges, prune and layer.
///
/// Back edges into (root) or out of (leaf) the principal are removed before
/// layering so a recursive principal still sits at the end of its hierarchy.
pub fn query(
    config: &IndexerConfig,
    principal: &str,
    polarity: Polarity,
    max_depth: Option<usize>,
) -> Result<LayeredGraph> {
    Corpus::discover(config)?.require(principal)?;

    let store = config.store();
    let mut graph = traverse(&store, principal, polarity)?;
    graph.strip_back_edges();
    let graph = prune_to_depth(graph, principal, polarity, max_depth)?;
    let layers = compute_layers(&graph, polarity)?;

    info!(
        principal,
        %polarity,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Query complete"
    );
    Ok(LayeredGraph::new(&graph, &layers))
}
