//! Calltree Core — call graph model, edge index store, traversal and layering

pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod layout;
pub mod model;
pub mod prune;
pub mod sizes;
pub mod store;
pub mod traversal;


pub use error::{GraphError, Result};
pub use graph::CallGraph;
pub use hierarchy::{Layers, compute_layers};
pub use layout::{LayeredEdge, LayeredGraph, LayeredNode};
pub use model::Polarity;
pub use prune::{depth_limit, prune_to_depth};
pub use sizes::{GraphSize, REPORT_WIDTH, graph_sizes, render_size_report, scale_factor};
pub use store::{EdgeStore, INDEX_DIR, MANIFEST, Manifest};
pub use traversal::{RelativeSource, traverse};
