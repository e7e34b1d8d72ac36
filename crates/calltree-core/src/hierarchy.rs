//! Layer assignment for call graphs
//!
//! Two strategies, picked by polarity:
//!
//! - `Leaf`: peel terminal nodes (no incoming edge) layer by layer until the
//!   graph is empty. A layer is the longest path from any terminal node.
//! - `Root`: breadth-first distance from the principal. A layer is the
//!   shortest path from the principal.
//!
//! The two disagree on graphs with paths of different lengths to one node;
//! they are kept separate on purpose.

use std::collections::{BTreeMap, HashMap};

use petgraph::Direction;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{GraphError, Result};
use crate::graph::CallGraph;
use crate::model::Polarity;

/// Node → layer mapping produced by [`compute_layers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layers {
    layers: BTreeMap<String, usize>,
}

impl Layers {
    pub fn get(&self, node: &str) -> Option<usize> {
        self.layers.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn max_layer(&self) -> Option<usize> {
        self.layers.values().copied().max()
    }

    /// Iterate in node-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.layers.iter().map(|(name, &layer)| (name.as_str(), layer))
    }

    /// Nodes grouped by layer, each group sorted by name.
    pub fn by_layer(&self) -> BTreeMap<usize, Vec<String>> {
        let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (name, &layer) in &self.layers {
            groups.entry(layer).or_default().push(name.clone());
        }
        groups
    }

    /// Display-time reversal: `layer` becomes `max - layer`.
    pub fn reversed(&self) -> Layers {
        let max = self.max_layer().unwrap_or(0);
        Layers {
            layers: self
                .layers
                .iter()
                .map(|(name, &layer)| (name.clone(), max - layer))
                .collect(),
        }
    }
}

impl FromIterator<(String, usize)> for Layers {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Layers {
            layers: iter.into_iter().collect(),
        }
    }
}

/// Assign every node of `graph` a layer consistent with edge direction.
pub fn compute_layers(graph: &CallGraph, polarity: Polarity) -> Result<Layers> {
    let layers = match polarity {
        Polarity::Leaf => peel_layers(graph)?,
        Polarity::Root => distance_layers(graph)?,
    };
    debug!(
        %polarity,
        nodes = layers.len(),
        depth = layers.max_layer().unwrap_or(0),
        "layers computed"
    );
    Ok(layers)
}

/// Kahn-style peeling. Fails with `CycleDetected` when a pass removes nothing.
fn peel_layers(graph: &CallGraph) -> Result<Layers> {
    let mut in_degree: HashMap<&str, usize> = graph
        .nodes()
        .map(|node| (node, graph.in_degree(node)))
        .collect();
    let mut frontier: Vec<&str> = in_degree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(&node, _)| node)
        .collect();
    frontier.sort_unstable();

    let mut layers: BTreeMap<String, usize> = BTreeMap::new();
    let mut layer = 0;

    while !frontier.is_empty() {
        let mut next: Vec<&str> = Vec::new();
        for &node in &frontier {
            layers.insert(node.to_string(), layer);
            for callee in graph.neighbors(node, Direction::Outgoing) {
                if let Some(degree) = in_degree.get_mut(callee) {
                    *degree -= 1;
                    if *degree == 0 {
                        next.push(callee);
                    }
                }
            }
        }
        next.sort_unstable();
        next.dedup();
        frontier = next;
        layer += 1;
    }

    if layers.len() < graph.node_count() {
        let remaining: Vec<String> = graph
            .node_set()
            .into_iter()
            .filter(|node| !layers.contains_key(node))
            .collect();
        return Err(GraphError::CycleDetected { remaining });
    }

    Ok(Layers { layers })
}

/// Shortest distance from the principal, or from every in-degree-zero node
/// (minimum across them) when the graph has no principal.
fn distance_layers(graph: &CallGraph) -> Result<Layers> {
    let sources: Vec<&str> = match graph.principal() {
        Some(principal) => vec![principal],
        None => {
            let mut zero: Vec<&str> = graph
                .nodes()
                .filter(|node| graph.in_degree(node) == 0)
                .collect();
            zero.sort_unstable();
            zero
        }
    };
    if sources.len() > 1 {
        warn!(
            "Root layering has {} sources ({}), using the minimum distance",
            sources.len(),
            sources.join(", ")
        );
    }

    let distances = graph.distances_from(&sources, Direction::Outgoing);
    if distances.len() < graph.node_count() {
        let nodes: Vec<String> = graph
            .node_set()
            .into_iter()
            .filter(|node| !distances.contains_key(node))
            .collect();
        return Err(GraphError::Unrooted { nodes });
    }

    Ok(distances.into_iter().collect())
}
