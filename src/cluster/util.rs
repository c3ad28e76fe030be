use crate::graph::{Sign, SignedGraph, Vertex};
use crate::partition::{ClusterId, Partition};

/// Working partition of a greedy run, indexed by vertex position.
///
/// Cluster ids live in `0..n`: the singleton start gives vertex `i` cluster `i`,
/// and merging never invents new ids. `members[c]` is empty once `c` has been
/// merged away.
#[derive(Clone, Debug)]
pub(crate) struct ClusterState {
    pub(crate) labels: Vec<ClusterId>,
    pub(crate) members: Vec<Vec<usize>>,
}

impl ClusterState {
    pub(crate) fn singletons(n: usize) -> Self {
        Self {
            labels: (0..n).collect(),
            members: (0..n).map(|i| vec![i]).collect(),
        }
    }

    pub(crate) fn label(&self, pos: usize) -> ClusterId {
        self.labels[pos]
    }

    /// Distinct cluster ids in first-seen order over vertex positions.
    pub(crate) fn active_clusters(&self) -> Vec<ClusterId> {
        let mut seen = vec![false; self.members.len()];
        let mut out = Vec::new();
        for &c in &self.labels {
            if !seen[c] {
                seen[c] = true;
                out.push(c);
            }
        }
        out
    }

    pub(crate) fn cluster_count(&self) -> usize {
        self.members.iter().filter(|m| !m.is_empty()).count()
    }

    /// Change in mistake count if every vertex of cluster `from` moved into `into`.
    ///
    /// Only edges running between the two clusters change status: a positive one
    /// stops being a mistake, a negative one becomes one.
    pub(crate) fn merge_delta<V: Vertex>(
        &self,
        graph: &SignedGraph<V>,
        from: ClusterId,
        into: ClusterId,
    ) -> isize {
        if from == into {
            return 0;
        }
        let mut delta = 0isize;
        for &u in &self.members[from] {
            for &(w, sign) in graph.neighbors(u) {
                if self.labels[w] == into {
                    delta += match sign {
                        Sign::Positive => -1,
                        Sign::Negative => 1,
                    };
                }
            }
        }
        delta
    }

    /// Relabel every vertex of `from` to `into`.
    pub(crate) fn merge(&mut self, from: ClusterId, into: ClusterId) {
        if from == into {
            return;
        }
        let moved = std::mem::take(&mut self.members[from]);
        for &u in &moved {
            self.labels[u] = into;
        }
        self.members[into].extend(moved);
    }

    /// Snapshot the working labels as a public partition.
    pub(crate) fn to_partition<V: Vertex>(&self, graph: &SignedGraph<V>) -> Partition<V> {
        graph
            .vertices()
            .iter()
            .zip(self.labels.iter())
            .map(|(v, &c)| (v.clone(), c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_moves_members() {
        let mut s = ClusterState::singletons(4);
        s.merge(0, 2);
        assert_eq!(s.labels, vec![2, 1, 2, 3]);
        assert!(s.members[0].is_empty());
        assert_eq!(s.cluster_count(), 3);
        assert_eq!(s.active_clusters(), vec![2, 1, 3]);
        s.merge(2, 2);
        assert_eq!(s.cluster_count(), 3);
    }

    #[test]
    fn test_merge_delta() {
        let g = SignedGraph::new([0, 1, 2], [(0, 1)], [(1, 2)]).unwrap();
        let s = ClusterState::singletons(3);
        assert_eq!(s.merge_delta(&g, 0, 1), -1);
        assert_eq!(s.merge_delta(&g, 2, 1), 1);
        assert_eq!(s.merge_delta(&g, 0, 2), 0);
        assert_eq!(s.merge_delta(&g, 1, 1), 0);
    }
}
