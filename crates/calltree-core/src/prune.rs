//! Depth-bounded pruning around the principal

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::CallGraph;
use crate::model::Polarity;

/// Remove every node farther than `max_depth` hops from `principal`.
///
/// Distance is measured on the graph oriented so the principal is the source:
/// along callees for `Root`, along callers for `Leaf`. Nodes the principal
/// cannot reach are dropped too. `None` keeps the graph as it is.
pub fn prune_to_depth(
    mut graph: CallGraph,
    principal: &str,
    polarity: Polarity,
    max_depth: Option<usize>,
) -> Result<CallGraph> {
    if !graph.contains_node(principal) {
        return Err(GraphError::unknown_principal(principal));
    }
    let Some(max_depth) = max_depth else {
        return Ok(graph);
    };

    let distances = graph.distances_from(&[principal], polarity.outward());
    let doomed: Vec<String> = graph
        .nodes()
        .filter(|node| distances.get(*node).is_none_or(|&d| d > max_depth))
        .map(str::to_string)
        .collect();

    for node in &doomed {
        graph.remove_node(node);
    }

    debug!(
        principal,
        max_depth,
        removed = doomed.len(),
        kept = graph.node_count(),
        "pruned graph"
    );
    Ok(graph)
}

/// Interpret the signed depth convention where any negative value means
/// "unbounded".
pub fn depth_limit(raw: i64) -> Option<usize> {
    usize::try_from(raw).ok()
}
