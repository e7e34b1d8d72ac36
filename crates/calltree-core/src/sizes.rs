//! Per-symbol graph size statistics and the dotted size report

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::model::Polarity;
use crate::traversal::{RelativeSource, traverse};

/// Widest row the report tries to fit.
pub const REPORT_WIDTH: usize = 250;

const ROOT_LABEL: &str = "SIZE ROOT GRAPH";
const NAME_LABEL: &str = "FUNCTION";
const LEAF_LABEL: &str = "SIZE LEAF GRAPH";

/// Node counts of a symbol's root graph and leaf graph (each at least 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSize {
    pub symbol: String,
    pub as_root: usize,
    pub as_leaf: usize,
}

impl GraphSize {
    pub fn get(&self, polarity: Polarity) -> usize {
        match polarity {
            Polarity::Root => self.as_root,
            Polarity::Leaf => self.as_leaf,
        }
    }
}

/// Traverse both polarities for every symbol.
pub fn graph_sizes<S>(source: &S, symbols: &[String]) -> Result<Vec<GraphSize>>
where
    S: RelativeSource + ?Sized,
{
    symbols
        .iter()
        .map(|symbol| {
            let as_root = traverse(source, symbol, Polarity::Root)?.node_count().max(1);
            let as_leaf = traverse(source, symbol, Polarity::Leaf)?.node_count().max(1);
            debug!(symbol = %symbol, as_root, as_leaf, "measured graph sizes");
            Ok(GraphSize {
                symbol: symbol.clone(),
                as_root,
                as_leaf,
            })
        })
        .collect()
}

/// Smallest integer divisor that makes the widest row fit in `width`.
pub fn scale_factor(sizes: &[GraphSize], width: usize) -> usize {
    let max_root = sizes.iter().map(|s| s.as_root).max().unwrap_or(0);
    let max_leaf = sizes.iter().map(|s| s.as_leaf).max().unwrap_or(0);
    let max_name = sizes.iter().map(|s| s.symbol.len()).max().unwrap_or(0);
    let ceiling = max_root.max(max_leaf).max(1);

    let mut scale = 1;
    while max_root / scale + max_leaf / scale + max_name > width && scale < ceiling {
        scale += 1;
    }
    scale
}

/// Render the dotted report, largest `sort_by` graphs first.
pub fn render_size_report(sizes: &[GraphSize], sort_by: Polarity, width: usize) -> String {
    let scale = scale_factor(sizes, width);

    let mut sorted: Vec<&GraphSize> = sizes.iter().collect();
    sorted.sort_by(|a, b| {
        b.get(sort_by)
            .cmp(&a.get(sort_by))
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let root_col = sizes
        .iter()
        .map(|s| s.as_root / scale)
        .max()
        .unwrap_or(0)
        .max(ROOT_LABEL.len());
    let name_col = sizes
        .iter()
        .map(|s| s.symbol.len())
        .max()
        .unwrap_or(0)
        .max(NAME_LABEL.len());

    let mut out = String::new();
    out.push_str("Size root graph: symbols reachable from FUNCTION as the root\n");
    out.push_str("Size leaf graph: symbols reaching FUNCTION as the leaf\n\n");
    out.push_str(&format!(
        "Scale factor: {scale} (each dot represents {scale} symbols)\n"
    ));
    out.push_str(&format!("Sorted by size of the {sort_by} graph\n\n"));
    out.push_str(&row(ROOT_LABEL, NAME_LABEL, LEAF_LABEL, root_col, name_col));
    out.push('\n');

    for size in sorted {
        let root_dots = ".".repeat(size.as_root / scale);
        let leaf_dots = ".".repeat(size.as_leaf / scale);
        out.push_str(&row(&root_dots, &size.symbol, &leaf_dots, root_col, name_col));
    }
    out
}

fn row(root: &str, name: &str, leaf: &str, root_col: usize, name_col: usize) -> String {
    let line = format!("{root:>root_col$} {name:<name_col$} {leaf}");
    format!("{}\n", line.trim_end())
}
