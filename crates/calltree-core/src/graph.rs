//! Call graph wrapper over petgraph::StableDiGraph, keyed by symbol name

use std::collections::{BTreeSet, HashMap, VecDeque};

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use crate::model::Polarity;

/// A directed caller→callee graph built around one principal symbol.
///
/// Nodes and edges are de-duplicated by name, so adding the same edge twice
/// leaves the graph unchanged. Removing a node drops its incident edges.
#[derive(Clone)]
pub struct CallGraph {
    inner: StableDiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
    principal: Option<String>,
    polarity: Option<Polarity>,
}

impl std::fmt::Debug for CallGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallGraph")
            .field("principal", &self.principal)
            .field("polarity", &self.polarity)
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl CallGraph {
    pub fn new() -> Self {
        CallGraph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
            principal: None,
            polarity: None,
        }
    }

    /// A graph holding only `principal`, remembered as the query centre.
    pub fn centred_on(principal: &str, polarity: Polarity) -> Self {
        let mut graph = Self::new();
        graph.add_node(principal);
        graph.principal = Some(principal.to_string());
        graph.polarity = Some(polarity);
        graph
    }

    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    pub fn polarity(&self) -> Option<Polarity> {
        self.polarity
    }

    /// Add a node if absent. Returns its index either way.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.inner.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Add a caller→callee edge, creating missing endpoints.
    /// Returns false when the edge was already present.
    pub fn add_edge(&mut self, caller: &str, callee: &str) -> bool {
        let from = self.add_node(caller);
        let to = self.add_node(callee);
        if self.inner.find_edge(from, to).is_some() {
            return false;
        }
        self.inner.add_edge(from, to, ());
        true
    }

    /// Drop every edge whose endpoints coincide. Returns how many went.
    pub fn remove_self_loops(&mut self) -> usize {
        let loops: Vec<EdgeIndex> = self
            .inner
            .edge_indices()
            .filter(|&e| self.inner.edge_endpoints(e).is_some_and(|(a, b)| a == b))
            .collect();
        for &edge in &loops {
            self.inner.remove_edge(edge);
        }
        loops.len()
    }

    /// Drop edges that lead back into the principal against the query
    /// direction (into it for `Root`, out of it for `Leaf`), so the principal
    /// becomes the unique source or sink for display.
    pub fn strip_back_edges(&mut self) -> usize {
        let (Some(principal), Some(polarity)) = (self.principal.as_deref(), self.polarity) else {
            return 0;
        };
        let Some(&idx) = self.index.get(principal) else {
            return 0;
        };
        let back = polarity.outward().opposite();
        let edges: Vec<EdgeIndex> = self
            .inner
            .edges_directed(idx, back)
            .map(|e| e.id())
            .collect();
        for &edge in &edges {
            self.inner.remove_edge(edge);
        }
        edges.len()
    }

    /// Remove a node and all its incident edges.
    pub fn remove_node(&mut self, name: &str) -> bool {
        match self.index.remove(name) {
            Some(idx) => self.inner.remove_node(idx).is_some(),
            None => false,
        }
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn has_edge(&self, caller: &str, callee: &str) -> bool {
        match (self.index.get(caller), self.index.get(callee)) {
            (Some(&a), Some(&b)) => self.inner.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Iterate over node names (unspecified order).
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.inner
            .node_indices()
            .map(move |idx| self.inner[idx].as_str())
    }

    /// Iterate over (caller, callee) pairs (unspecified order).
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.edge_indices().filter_map(move |e| {
            let (a, b) = self.inner.edge_endpoints(e)?;
            Some((self.inner[a].as_str(), self.inner[b].as_str()))
        })
    }

    /// Node names, sorted.
    pub fn node_set(&self) -> BTreeSet<String> {
        self.nodes().map(str::to_string).collect()
    }

    /// Edges as sorted owned pairs.
    pub fn edge_set(&self) -> BTreeSet<(String, String)> {
        self.edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    /// Neighbours of `name` in one direction (`Outgoing` = callees).
    pub fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        match self.index.get(name) {
            Some(&idx) => self
                .inner
                .neighbors_directed(idx, direction)
                .map(|n| self.inner[n].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.neighbors(name, Direction::Incoming).len()
    }

    /// Breadth-first hop counts from `sources`, following `direction`.
    /// Unreachable nodes are absent from the result.
    pub fn distances_from(&self, sources: &[&str], direction: Direction) -> HashMap<String, usize> {
        let mut dist: HashMap<String, usize> = HashMap::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();

        for source in sources {
            if let Some(&idx) = self.index.get(*source) {
                if !dist.contains_key(*source) {
                    dist.insert(source.to_string(), 0);
                    queue.push_back(idx);
                }
            }
        }

        while let Some(idx) = queue.pop_front() {
            let here = dist[&self.inner[idx]];
            for next in self.inner.neighbors_directed(idx, direction) {
                let name = &self.inner[next];
                if !dist.contains_key(name) {
                    dist.insert(name.clone(), here + 1);
                    queue.push_back(next);
                }
            }
        }

        dist
    }
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::new()
    }
}
