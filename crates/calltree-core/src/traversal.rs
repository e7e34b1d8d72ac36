//! Graph expansion from a principal node over an edge index

use std::collections::{HashSet, VecDeque};

use tracing::{debug, warn};

use crate::error::Result;
use crate::graph::CallGraph;
use crate::model::Polarity;

/// Anything that can answer "who are this symbol's relatives?".
///
/// `Leaf` asks for callers, `Root` for callees. Implementations return
/// `GraphError::NotFound` for symbols that were never indexed.
pub trait RelativeSource {
    fn relatives(&self, symbol: &str, polarity: Polarity) -> Result<Vec<String>>;
}

/// Build the full graph reachable from `principal` in `polarity`.
///
/// `Leaf` adds relative→current edges (callers point at their callee),
/// `Root` adds current→relative edges. Self-loops are stripped. A symbol
/// without an index entry contributes no relatives; any other error aborts
/// the whole traversal.
pub fn traverse<S>(source: &S, principal: &str, polarity: Polarity) -> Result<CallGraph>
where
    S: RelativeSource + ?Sized,
{
    let mut graph = CallGraph::centred_on(principal, polarity);
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::from([principal.to_string()]);

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }

        let relatives = match source.relatives(&current, polarity) {
            Ok(relatives) => relatives,
            Err(e) if e.is_not_found() => {
                warn!("No index entry for '{}', treating as having no relatives", current);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        for relative in &relatives {
            if *relative == current {
                continue;
            }
            let (caller, callee) = polarity.orient(&current, relative);
            graph.add_edge(caller, callee);
            if !visited.contains(relative) {
                queue.push_back(relative.clone());
            }
        }
    }

    debug!(
        principal,
        %polarity,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "traversal complete"
    );
    Ok(graph)
}
