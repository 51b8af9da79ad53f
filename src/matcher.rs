//! Maximum-cardinality and perfect matchings by repeated augmentation.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::BipartiteGraph;
use crate::matching::BipartiteGraphMatching;
use crate::search::{find_augmenting_path, AlternatingTree, SearchOutcome};

/// Maximum-cardinality matching of `graph`, which may be imperfect.
pub fn max_cardinality_matching(graph: &BipartiteGraph) -> Result<BipartiteGraphMatching> {
    let mut matching = BipartiteGraphMatching::new(graph.order());
    augment_to_maximum(graph, &mut matching)?;
    debug!(
        order = graph.order(),
        cardinality = matching.cardinality(),
        "maximum matching found"
    );
    Ok(matching)
}

/// Perfect matching of `graph`.
///
/// Fails with [`Error::PerfectMatchingNotExists`] carrying a set of left
/// vertices that violates Hall's condition.
pub fn perfect_matching(graph: &BipartiteGraph) -> Result<BipartiteGraphMatching> {
    let mut matching = BipartiteGraphMatching::new(graph.order());
    if let Some(tree) = augment_to_maximum(graph, &mut matching)? {
        debug!(
            order = graph.order(),
            cardinality = matching.cardinality(),
            "no perfect matching"
        );
        return Err(Error::PerfectMatchingNotExists {
            cardinality: matching.cardinality(),
            order: graph.order(),
            hall_violator: tree.left().collect(),
        });
    }
    Ok(matching)
}

/// Grows `matching` along augmenting paths from all uncovered left
/// vertices until none remains.
///
/// Returns the tree of the last failed search, or `None` when the
/// matching ended up perfect.
pub fn augment_to_maximum(
    graph: &BipartiteGraph,
    matching: &mut BipartiteGraphMatching,
) -> Result<Option<AlternatingTree>> {
    let mut roots = Vec::with_capacity(graph.order());
    loop {
        roots.clear();
        roots.extend(matching.uncovered_left());
        if roots.is_empty() {
            return Ok(None);
        }

        match find_augmenting_path(graph, matching, &roots)? {
            SearchOutcome::Found(path) => {
                trace!(
                    length = path.len(),
                    cardinality = matching.cardinality(),
                    "augmenting"
                );
                path.apply(matching)?;
            }
            SearchOutcome::Exhausted(tree) => return Ok(Some(tree)),
        }
    }
}
