use crate::graph::{SignedGraph, Vertex};
use crate::partition::ClusteringResult;

/// Common interface for correlation clustering strategies.
pub trait CorrelationClusterer {
    /// Partition the vertices of `graph`, returning the final partition with its
    /// mistake and cluster counts.
    fn cluster<V: Vertex>(&self, graph: &SignedGraph<V>) -> ClusteringResult<V>;

    /// The configured cap on outer passes, if any.
    ///
    /// `None` means the default cap of `|V|²`.
    fn max_passes(&self) -> Option<usize>;
}
