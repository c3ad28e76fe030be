//! Greedy merge search driven by vertex pairs.
//!
//! Same move set and acceptance rule as [`GreedyMerge`](super::GreedyMerge): move one
//! whole cluster into another when that strictly lowers the mistake count. The
//! difference is traversal: every ordered vertex pair `(u, v)` is visited in input
//! order, and the candidate is "move `u`'s current cluster into `v`'s current cluster".
//! The owning clusters are looked up again for every pair, so merges committed earlier
//! in the pass are visible immediately.
//!
//! Because ties are broken by a different order, the two strategies can settle in
//! different local optima on the same graph. A pass costs O(n²) candidate lookups.

use tracing::{debug, trace, warn};

use super::evaluate;
use super::traits::CorrelationClusterer;
use super::util::ClusterState;
use crate::graph::{SignedGraph, Vertex};
use crate::partition::ClusteringResult;

/// Greedy merge search over ordered vertex pairs.
///
/// Cluster ids are vertex positions, as in [`GreedyMerge`](super::GreedyMerge).
#[derive(Debug, Clone, Default)]
pub struct VertexGreedy {
    max_passes: Option<usize>,
}

impl VertexGreedy {
    /// Create a vertex-pair greedy search with the default pass cap (`|V|²`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cap on outer passes (`None` restores the `|V|²` default).
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }
}

impl CorrelationClusterer for VertexGreedy {
    fn cluster<V: Vertex>(&self, graph: &SignedGraph<V>) -> ClusteringResult<V> {
        let n = graph.vertex_count();
        let mut state = ClusterState::singletons(n);
        let mut mistakes = evaluate::count_mistakes_by_position(graph, &state.labels);
        let mut history = vec![mistakes];

        if n == 0 {
            return ClusteringResult::new(state.to_partition(graph), 0, 0, true, history);
        }

        let cap = self.max_passes.unwrap_or(n.saturating_mul(n));
        let mut passes = 0;
        let mut changed = true;

        while changed && passes < cap {
            changed = false;
            passes += 1;

            for u in 0..n {
                for v in 0..n {
                    if u == v {
                        continue;
                    }
                    let (from, into) = (state.label(u), state.label(v));
                    if from == into {
                        continue;
                    }
                    let delta = state.merge_delta(graph, from, into);
                    if delta < 0 {
                        state.merge(from, into);
                        mistakes = mistakes.saturating_sub(delta.unsigned_abs());
                        history.push(mistakes);
                        changed = true;
                        trace!(u, v, from, into, mistakes, "accepted vertex-pair merge");
                    }
                }
            }

            debug!(
                pass = passes,
                clusters = state.cluster_count(),
                mistakes,
                changed,
                "vertex-pair greedy pass"
            );
        }

        let converged = !changed;
        if !converged {
            warn!(
                passes,
                mistakes, "vertex-pair greedy stopped at pass cap before converging"
            );
        }

        let final_mistakes = evaluate::count_mistakes_by_position(graph, &state.labels);
        debug_assert_eq!(final_mistakes, mistakes);

        ClusteringResult::new(
            state.to_partition(graph),
            final_mistakes,
            passes,
            converged,
            history,
        )
    }

    fn max_passes(&self) -> Option<usize> {
        self.max_passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::GreedyMerge;

    #[test]
    fn test_positive_path_merges_all() {
        let g = SignedGraph::new([0, 1, 2], [(0, 1), (1, 2)], []).unwrap();
        let r = VertexGreedy::new().cluster(&g);
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 1);
    }

    #[test]
    fn test_negative_edge_keeps_apart() {
        let g = SignedGraph::new([0, 1, 2], [(0, 1)], [(1, 2)]).unwrap();
        let r = VertexGreedy::new().cluster(&g);
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 2);
    }

    #[test]
    fn test_empty_and_single() {
        let g = SignedGraph::<u32>::new([], [], []).unwrap();
        let r = VertexGreedy::new().cluster(&g);
        assert_eq!((r.mistakes(), r.cluster_count()), (0, 0));

        let g = SignedGraph::<u32>::new([3], [], []).unwrap();
        let r = VertexGreedy::new().cluster(&g);
        assert_eq!((r.mistakes(), r.cluster_count()), (0, 1));
    }

    #[test]
    fn test_first_vertex_moves_toward_second() {
        let g = SignedGraph::new([5, 9], [(5, 9)], []).unwrap();
        let r = VertexGreedy::new().cluster(&g);
        // u = 5 is visited first, so its cluster (0) moves into 9's cluster (1).
        assert_eq!(r.partition().get(&5), Some(1));
        assert_eq!(r.partition().get(&9), Some(1));
    }

    #[test]
    fn test_traversal_differs_from_cluster_pairs() {
        let pos = [(0, 2), (0, 3), (1, 3), (2, 3)];
        let neg = [(0, 1), (1, 2)];
        let g = SignedGraph::new(0..4u32, pos, neg).unwrap();

        let a = GreedyMerge::new().cluster(&g);
        assert_eq!(a.mistakes(), 2);
        assert_eq!(a.partition().same_cluster(&0, &2), Some(true));
        assert_eq!(a.partition().same_cluster(&1, &3), Some(true));

        let b = VertexGreedy::new().cluster(&g);
        assert_eq!(b.mistakes(), 1);
        let groups: Vec<Vec<u32>> = b.partition().clusters().into_values().collect();
        assert_eq!(groups, vec![vec![1], vec![0, 2, 3]]);
    }

    #[test]
    fn test_pass_cap_returns_best_so_far() {
        let g = SignedGraph::new(0..4u32, [(0, 1), (1, 2), (2, 3)], []).unwrap();

        let capped = VertexGreedy::new().with_max_passes(Some(1));
        assert_eq!(capped.max_passes(), Some(1));
        let r = capped.cluster(&g);
        assert_eq!(r.passes(), 1);
        assert!(!r.converged());
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 1);

        let r = VertexGreedy::new().with_max_passes(Some(0)).cluster(&g);
        assert_eq!(r.passes(), 0);
        assert!(!r.converged());
        assert_eq!(r.mistakes(), 3);
        assert_eq!(r.cluster_count(), 4);

        let r = VertexGreedy::new().cluster(&g);
        assert_eq!(r.passes(), 2);
        assert!(r.converged());
    }

    #[test]
    fn test_history_strictly_decreasing() {
        let pos = [(0, 1), (1, 2), (2, 3), (3, 0), (4, 5)];
        let neg = [(0, 2), (1, 4), (3, 5)];
        let g = SignedGraph::new(0..6u32, pos, neg).unwrap();
        let r = VertexGreedy::new().cluster(&g);
        assert!(r.history().windows(2).all(|w| w[1] < w[0]));
        assert_eq!(*r.history().last().unwrap(), r.mistakes());
        assert!(r.converged());
    }
}
