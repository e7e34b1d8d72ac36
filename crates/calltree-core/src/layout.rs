//! Hand-off structure for external renderers

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::CallGraph;
use crate::hierarchy::Layers;
use crate::model::Polarity;

/// A node with its layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayeredNode {
    pub name: String,
    pub layer: usize,
}

/// A caller→callee pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LayeredEdge {
    pub caller: String,
    pub callee: String,
}

/// A finalised graph plus layer mapping, ready for coordinate placement.
///
/// Nodes are ordered by (layer, name) and edges by (caller, callee) so the
/// output is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayeredGraph {
    pub principal: Option<String>,
    pub polarity: Option<Polarity>,
    pub nodes: Vec<LayeredNode>,
    pub edges: Vec<LayeredEdge>,
}

impl LayeredGraph {
    /// Pair `graph` with `layers`. Nodes missing from `layers` are skipped.
    pub fn new(graph: &CallGraph, layers: &Layers) -> Self {
        let mut nodes: Vec<LayeredNode> = graph
            .nodes()
            .filter_map(|name| {
                layers.get(name).map(|layer| LayeredNode {
                    name: name.to_string(),
                    layer,
                })
            })
            .collect();
        nodes.sort_by(|a, b| a.layer.cmp(&b.layer).then_with(|| a.name.cmp(&b.name)));

        let edges: Vec<LayeredEdge> = graph
            .edge_set()
            .into_iter()
            .map(|(caller, callee)| LayeredEdge { caller, callee })
            .collect();

        LayeredGraph {
            principal: graph.principal().map(str::to_string),
            polarity: graph.polarity(),
            nodes,
            edges,
        }
    }

    /// Display-time reversal of every layer (see [`Layers::reversed`]).
    pub fn flipped(&self) -> Self {
        let layers: Layers = self
            .nodes
            .iter()
            .map(|node| (node.name.clone(), node.layer))
            .collect();
        let layers = layers.reversed();

        let mut nodes: Vec<LayeredNode> = self
            .nodes
            .iter()
            .filter_map(|node| {
                layers.get(&node.name).map(|layer| LayeredNode {
                    name: node.name.clone(),
                    layer,
                })
            })
            .collect();
        nodes.sort_by(|a, b| a.layer.cmp(&b.layer).then_with(|| a.name.cmp(&b.name)));

        LayeredGraph {
            nodes,
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::Serialization(e.to_string()))
    }

    /// Plain-text listing: one line per layer, then one line per edge.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let mut current: Option<usize> = None;
        for node in &self.nodes {
            if current != Some(node.layer) {
                if current.is_some() {
                    out.push('\n');
                }
                out.push_str(&format!("layer {}:", node.layer));
                current = Some(node.layer);
            }
            out.push(' ');
            out.push_str(&node.name);
        }
        if !self.nodes.is_empty() {
            out.push('\n');
        }
        for edge in &self.edges {
            out.push_str(&format!("{} -> {}\n", edge.caller, edge.callee));
        }
        out
    }
}
