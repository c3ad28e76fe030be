//! Greedy cluster-merge local search.
//!
//! # The Algorithm
//!
//! Start from the all-singletons partition. In each pass:
//!
//! 1. Snapshot the distinct cluster ids, ordered by first appearance over the vertex list.
//! 2. For every pair `(A, B)` of that snapshot with `A` before `B`, consider moving every
//!    vertex of `A` into `B`.
//! 3. If the move strictly lowers the mistake count, commit it immediately and keep
//!    scanning the remaining pairs against the updated partition.
//!
//! Stop after a pass without an accepted merge, or when the pass cap is reached.
//!
//! ## Tie-breaking
//!
//! Acceptance is first-strict-improvement, so among equally good merges the one that
//! appears first in the enumeration wins. Enumeration order is the first-seen order
//! of cluster ids over the vertex list, with the earlier cluster absorbed into the
//! later one.
//!
//! ## Termination
//!
//! The mistake count is a non-negative integer that strictly decreases with every
//! accepted merge, so the search always terminates. The pass cap (default `|V|²`)
//! only bounds worst-case enumeration cost; hitting it returns the best partition so
//! far with `converged() == false`.
//!
//! ## Complexity
//!
//! A pass visits O(k²) cluster pairs for `k` current clusters. Each candidate is scored
//! from the edges between the two clusters only, in O(deg(A)), instead of recounting
//! all known edges.
//!
//! This is a hill-climbing heuristic: it finds a local optimum, not a global one.

use tracing::{debug, trace, warn};

use super::evaluate;
use super::traits::CorrelationClusterer;
use super::util::ClusterState;
use crate::graph::{SignedGraph, Vertex};
use crate::partition::ClusteringResult;

/// Greedy merge search over pairs of clusters.
///
/// Cluster ids in the result are vertex *positions*, not vertex values: the starting
/// singleton of the `i`-th input vertex is cluster `i`, and a merged cluster keeps the
/// id of the cluster it was merged into.
#[derive(Debug, Clone, Default)]
pub struct GreedyMerge {
    /// Cap on outer passes; `None` means `|V|²`.
    max_passes: Option<usize>,
}

impl GreedyMerge {
    /// Create a greedy merger with the default pass cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cap on outer passes (`None` restores the `|V|²` default).
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }
}

impl CorrelationClusterer for GreedyMerge {
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
        let mut improved = true;

        while improved && passes < cap {
            improved = false;
            passes += 1;

            let clusters = state.active_clusters();
            for i in 0..clusters.len() {
                for j in (i + 1)..clusters.len() {
                    let (from, into) = (clusters[i], clusters[j]);
                    let delta = state.merge_delta(graph, from, into);
                    if delta < 0 {
                        state.merge(from, into);
                        mistakes = mistakes.saturating_sub(delta.unsigned_abs());
                        history.push(mistakes);
                        improved = true;
                        trace!(from, into, mistakes, "accepted cluster merge");
                    }
                }
            }

            debug!(
                pass = passes,
                clusters = state.cluster_count(),
                mistakes,
                improved,
                "greedy merge pass"
            );
        }

        let converged = !improved;
        if !converged {
            warn!(
                passes,
                mistakes, "greedy merge stopped at pass cap before converging"
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
    use crate::partition::Partition;

    #[test]
    fn test_positive_path_merges_all() {
        let g = SignedGraph::new([0, 1, 2], [(0, 1), (1, 2)], []).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 1);
        assert!(r.converged());
    }

    #[test]
    fn test_negative_edge_keeps_apart() {
        let g = SignedGraph::new([0, 1, 2], [(0, 1)], [(1, 2)]).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 2);
        let p = r.partition();
        assert_eq!(p.same_cluster(&0, &1), Some(true));
        assert_eq!(p.same_cluster(&1, &2), Some(false));
    }

    #[test]
    fn test_empty_graph() {
        let g = SignedGraph::<u32>::new([], [], []).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 0);
        assert_eq!(r.passes(), 0);
        assert!(r.partition().is_empty());
    }

    #[test]
    fn test_single_vertex() {
        let g = SignedGraph::new([7], Vec::<(u32, u32)>::new(), []).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 1);
        assert_eq!(r.partition().get(&7), Some(0));
    }

    #[test]
    fn test_no_edges_single_pass() {
        let g = SignedGraph::<u32>::new([0, 1, 2, 3], [], []).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 4);
        assert_eq!(r.passes(), 1);
        assert!(r.converged());
    }

    #[test]
    fn test_two_cliques() {
        let pos = [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)];
        let neg = [(0, 3), (1, 4), (2, 5), (0, 5)];
        let g = SignedGraph::new(0..6u32, pos, neg).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        assert_eq!(r.mistakes(), 0);
        assert_eq!(r.cluster_count(), 2);
        let groups: Vec<Vec<u32>> = r.partition().clusters().into_values().collect();
        assert!(groups.contains(&vec![0, 1, 2]));
        assert!(groups.contains(&vec![3, 4, 5]));
    }

    #[test]
    fn test_history_strictly_decreasing() {
        let pos = [(0, 1), (1, 2), (2, 3), (3, 0), (4, 5)];
        let neg = [(0, 2), (1, 4), (3, 5)];
        let g = SignedGraph::new(0..6u32, pos, neg).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        let h = r.history();
        assert_eq!(h[0], 5);
        assert!(h.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(*h.last().unwrap(), r.mistakes());
        let singles = Partition::singletons(g.vertices());
        assert!(r.mistakes() <= evaluate::count_mistakes(&g, &singles).unwrap());
    }

    #[test]
    fn test_pass_cap_returns_best_so_far() {
        // Chain 0-1-2-3: the first pass already merges everything, so a one-pass cap
        // stops before the confirming pass.
        let g = SignedGraph::new(0..4u32, [(0, 1), (1, 2), (2, 3)], []).unwrap();
        let capped = GreedyMerge::new().with_max_passes(Some(1));
        assert_eq!(capped.max_passes(), Some(1));
        let r = capped.cluster(&g);
        assert_eq!(r.passes(), 1);
        assert!(!r.converged());
        assert_eq!(r.mistakes(), 0);

        let r = GreedyMerge::new().with_max_passes(Some(0)).cluster(&g);
        assert_eq!(r.passes(), 0);
        assert_eq!(r.cluster_count(), 4);
        assert_eq!(r.mistakes(), 3);
    }

    #[test]
    fn test_deterministic() {
        let pos = [(0, 1), (2, 3), (1, 2)];
        let neg = [(0, 3), (0, 2)];
        let g = SignedGraph::new(0..4u32, pos, neg).unwrap();
        let m = GreedyMerge::new();
        let a = m.cluster(&g);
        let b = m.cluster(&g);
        assert_eq!(a.mistakes(), b.mistakes());
        assert_eq!(a.partition(), b.partition());
    }

    #[test]
    fn test_earlier_cluster_absorbed_into_later() {
        let g = SignedGraph::new(["a", "b"], [("a", "b")], []).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        assert_eq!(r.partition().get(&"a"), Some(1));
        assert_eq!(r.partition().get(&"b"), Some(1));
    }

    #[test]
    fn test_cluster_ids_are_positions() {
        let g = SignedGraph::new([30u32, 10, 20], [(30, 20)], [(10, 20)]).unwrap();
        let r = GreedyMerge::new().cluster(&g);
        assert_eq!(r.partition().get(&10), Some(1));
        assert_eq!(r.partition().get(&30), Some(2));
        assert_eq!(r.partition().get(&20), Some(2));
    }
}
