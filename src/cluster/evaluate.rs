//! Clustering evaluator.
//!
//! A *mistake* is a positive edge whose endpoints land in different clusters, or a
//! negative edge whose endpoints land in the same cluster. Unknown pairs never count.
//!
//! ```text
//! mistakes(P) = |{ (u,v) ∈ E+ : P(u) ≠ P(v) }| + |{ (u,v) ∈ E- : P(u) = P(v) }|
//! ```
//!
//! Evaluation is O(|E_known|) and never mutates its input.

use crate::error::{Error, Result};
use crate::graph::{Sign, SignedGraph, Vertex};
use crate::partition::{ClusterId, Partition};

/// Count disagreements between `partition` and the edge signs of `graph`.
///
/// Assignments for vertices that are not part of `graph` are ignored.
///
/// # Errors
///
/// [`Error::MissingAssignment`] if some vertex of `graph` has no cluster
/// (the first such vertex in input order is reported).
pub fn count_mistakes<V: Vertex>(
    graph: &SignedGraph<V>,
    partition: &Partition<V>,
) -> Result<usize> {
    let labels = labels_by_position(graph, partition)?;
    Ok(count_mistakes_by_position(graph, &labels))
}

/// True iff every vertex of `graph` has an assignment in `partition`.
///
/// Extra keys in `partition` do not make it invalid.
pub fn validate_clustering<V: Vertex>(graph: &SignedGraph<V>, partition: &Partition<V>) -> bool {
    graph.vertices().iter().all(|v| partition.contains(v))
}

/// Resolve a partition into a label vector indexed by vertex position.
pub(crate) fn labels_by_position<V: Vertex>(
    graph: &SignedGraph<V>,
    partition: &Partition<V>,
) -> Result<Vec<ClusterId>> {
    graph
        .vertices()
        .iter()
        .map(|v| {
            partition.get(v).ok_or_else(|| Error::MissingAssignment {
                vertex: format!("{v:?}"),
            })
        })
        .collect()
}

/// Mistake count for a total label vector indexed by vertex position.
pub(crate) fn count_mistakes_by_position<V>(graph: &SignedGraph<V>, labels: &[ClusterId]) -> usize
where
    V: Vertex,
{
    graph
        .edges()
        .iter()
        .filter(|e| {
            let (a, b) = e.ends;
            let together = labels[a] == labels[b];
            match e.sign {
                Sign::Positive => !together,
                Sign::Negative => together,
            }
        })
        .count()
}
