//! Partitions (vertex -> cluster id maps) and clustering results.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Cluster identifier. Ids are opaque: they need not be contiguous or ordered.
pub type ClusterId = usize;

/// Assignment of vertices to clusters.
///
/// Two vertices are in the same cluster iff their ids compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(
        serialize = "V: Serialize + Eq + Hash",
        deserialize = "V: Deserialize<'de> + Eq + Hash"
    )
)]
pub struct Partition<V> {
    assignment: HashMap<V, ClusterId>,
}

impl<V: Eq + Hash> PartialEq for Partition<V> {
    fn eq(&self, other: &Self) -> bool {
        self.assignment == other.assignment
    }
}

impl<V: Eq + Hash> Eq for Partition<V> {}

impl<V: Eq + Hash> Default for Partition<V> {
    fn default() -> Self {
        Self {
            assignment: HashMap::new(),
        }
    }
}

impl<V: Clone + Eq + Hash + Ord> Partition<V> {
    /// Empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every vertex in its own cluster; the cluster id is the vertex's position.
    pub fn singletons<'a>(vertices: impl IntoIterator<Item = &'a V>) -> Self
    where
        V: 'a,
    {
        vertices
            .into_iter()
            .enumerate()
            .map(|(pos, v)| (v.clone(), pos))
            .collect()
    }

    /// Every vertex in cluster `0`.
    pub fn single_cluster<'a>(vertices: impl IntoIterator<Item = &'a V>) -> Self
    where
        V: 'a,
    {
        vertices.into_iter().map(|v| (v.clone(), 0)).collect()
    }

    /// Assign `vertex` to `cluster`, returning its previous cluster.
    pub fn insert(&mut self, vertex: V, cluster: ClusterId) -> Option<ClusterId> {
        self.assignment.insert(vertex, cluster)
    }

    /// Cluster of `vertex`.
    pub fn get(&self, vertex: &V) -> Option<ClusterId> {
        self.assignment.get(vertex).copied()
    }

    /// Whether `vertex` has an assignment.
    pub fn contains(&self, vertex: &V) -> bool {
        self.assignment.contains_key(vertex)
    }

    /// `Some(true)` if both vertices are assigned to the same cluster,
    /// `None` if either is unassigned.
    pub fn same_cluster(&self, u: &V, v: &V) -> Option<bool> {
        Some(self.get(u)? == self.get(v)?)
    }

    /// Number of assigned vertices.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Whether no vertex is assigned.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Iterate over `(vertex, cluster)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, ClusterId)> {
        self.assignment.iter().map(|(v, &c)| (v, c))
    }

    /// Number of distinct cluster ids in use.
    pub fn cluster_count(&self) -> usize {
        self.assignment.values().collect::<HashSet<_>>().len()
    }

    /// Group vertices by cluster: `cluster id -> sorted members`.
    pub fn clusters(&self) -> BTreeMap<ClusterId, Vec<V>> {
        let mut out: BTreeMap<ClusterId, Vec<V>> = BTreeMap::new();
        for (v, &c) in &self.assignment {
            out.entry(c).or_default().push(v.clone());
        }
        for members in out.values_mut() {
            members.sort();
        }
        out
    }
}

impl<V: Eq + Hash> FromIterator<(V, ClusterId)> for Partition<V> {
    fn from_iter<T: IntoIterator<Item = (V, ClusterId)>>(iter: T) -> Self {
        Self {
            assignment: iter.into_iter().collect(),
        }
    }
}

/// Snapshot produced by a clustering run.
///
/// Mistakes and cluster count are computed from the partition when the snapshot is
/// built, and the fields are read-only, so they cannot drift apart.
#[derive(Debug, Clone)]
pub struct ClusteringResult<V> {
    partition: Partition<V>,
    mistakes: usize,
    cluster_count: usize,
    passes: usize,
    converged: bool,
    history: Vec<usize>,
}

impl<V: Clone + Eq + Hash + Ord> ClusteringResult<V> {
    pub(crate) fn new(
        partition: Partition<V>,
        mistakes: usize,
        passes: usize,
        converged: bool,
        history: Vec<usize>,
    ) -> Self {
        let cluster_count = partition.cluster_count();
        Self {
            partition,
            mistakes,
            cluster_count,
            passes,
            converged,
            history,
        }
    }

    /// Final partition.
    pub fn partition(&self) -> &Partition<V> {
        &self.partition
    }

    /// Consume the result, returning the partition.
    pub fn into_partition(self) -> Partition<V> {
        self.partition
    }

    /// Number of disagreements between the partition and the edge signs.
    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    /// Number of distinct clusters in the partition.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Number of outer passes performed.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// False if the pass cap stopped the search while merges were still improving.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Mistake count of the starting partition followed by the count after every
    /// accepted merge. Strictly decreasing.
    pub fn history(&self) -> &[usize] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_and_single_cluster() {
        let vertices = vec![10, 20, 30];
        let p = Partition::singletons(&vertices);
        assert_eq!(p.len(), 3);
        assert_eq!(p.cluster_count(), 3);
        assert_eq!(p.get(&20), Some(1));

        let q = Partition::single_cluster(&vertices);
        assert_eq!(q.cluster_count(), 1);
        assert_eq!(q.same_cluster(&10, &30), Some(true));
        assert_eq!(q.same_cluster(&10, &99), None);
    }

    #[test]
    fn test_clusters_grouping() {
        let p: Partition<u32> = [(3, 7), (1, 7), (2, 4)].into_iter().collect();
        let groups = p.clusters();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&7], vec![1, 3]);
        assert_eq!(groups[&4], vec![2]);
    }

    #[test]
    fn test_empty_partition() {
        let p: Partition<u32> = Partition::new();
        assert!(p.is_empty());
        assert_eq!(p.cluster_count(), 0);
        assert!(p.clusters().is_empty());
    }

    #[test]
    fn test_insert_reassigns() {
        let mut p = Partition::new();
        assert_eq!(p.insert("a", 0), None);
        assert_eq!(p.insert("a", 2), Some(0));
        assert_eq!(p.get(&"a"), Some(2));
        assert!(p.contains(&"a"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let p: Partition<u32> = [(1, 0), (2, 0), (3, 1)].into_iter().collect();
        let json = serde_json::to_string(&p).unwrap();
        let back: Partition<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn test_result_counts_from_partition() {
        let p: Partition<u32> = [(1, 5), (2, 5), (3, 9)].into_iter().collect();
        let r = ClusteringResult::new(p, 1, 2, true, vec![3, 1]);
        assert_eq!(r.cluster_count(), 2);
        assert_eq!(r.mistakes(), 1);
        assert_eq!(r.history(), &[3, 1]);
        assert!(r.converged());
    }
}
