//! One-stop API over a signed graph: evaluation, both greedy strategies, and the
//! LP relaxation.

use std::collections::BTreeMap;
use std::fmt::Display;

use super::evaluate;
use super::greedy::GreedyMerge;
use super::lp::{LpFormulation, LpRelaxation, LpSolution};
use super::traits::CorrelationClusterer;
use super::vertex_greedy::VertexGreedy;
use crate::error::Result;
use crate::graph::{GraphStats, SignedGraph, Vertex};
use crate::partition::{ClusterId, ClusteringResult, Partition};

/// Correlation clustering over an owned, immutable signed graph.
///
/// Every run works on private state and returns a fresh snapshot, so repeated
/// calls on the same instance give the same answer and separate instances can be
/// used from different threads.
#[derive(Debug, Clone)]
pub struct CorrelationClustering<V> {
    graph: SignedGraph<V>,
    max_passes: Option<usize>,
}

impl<V: Vertex> CorrelationClustering<V> {
    /// Build the signed graph and wrap it.
    ///
    /// # Errors
    ///
    /// Any construction error of [`SignedGraph::new`].
    pub fn new<I, P, N>(vertices: I, positive_edges: P, negative_edges: N) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        P: IntoIterator<Item = (V, V)>,
        N: IntoIterator<Item = (V, V)>,
    {
        SignedGraph::new(vertices, positive_edges, negative_edges).map(Self::from_graph)
    }

    /// Wrap an existing graph.
    pub fn from_graph(graph: SignedGraph<V>) -> Self {
        Self {
            graph,
            max_passes: None,
        }
    }

    /// Cap the outer passes of both greedy strategies (`None` = `|V|²`).
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// The underlying graph.
    pub fn graph(&self) -> &SignedGraph<V> {
        &self.graph
    }

    /// Mistakes made by `partition`. See [`evaluate::count_mistakes`].
    pub fn count_mistakes(&self, partition: &Partition<V>) -> Result<usize> {
        evaluate::count_mistakes(&self.graph, partition)
    }

    /// Run the cluster-pair greedy search.
    pub fn greedy_cluster(&self) -> ClusteringResult<V> {
        GreedyMerge::new()
            .with_max_passes(self.max_passes)
            .cluster(&self.graph)
    }

    /// Run the vertex-pair greedy search.
    pub fn simple_greedy_cluster(&self) -> ClusteringResult<V> {
        VertexGreedy::new()
            .with_max_passes(self.max_passes)
            .cluster(&self.graph)
    }

    /// Group the vertices of `partition` by cluster id.
    pub fn clusters_as_arrays(&self, partition: &Partition<V>) -> BTreeMap<ClusterId, Vec<V>> {
        partition.clusters()
    }

    /// True iff every vertex of the graph is assigned by `partition`.
    pub fn validate_clustering(&self, partition: &Partition<V>) -> bool {
        evaluate::validate_clustering(&self.graph, partition)
    }

    /// Vertex and edge counts.
    pub fn graph_stats(&self) -> GraphStats {
        self.graph.stats()
    }
}

impl<V: Vertex + Display> CorrelationClustering<V> {
    /// LP relaxation builder over this graph (default rounding threshold).
    pub fn lp(&self) -> LpRelaxation<'_, V> {
        LpRelaxation::new(&self.graph)
    }

    /// Build the LP relaxation.
    pub fn formulate_lp(&self) -> LpFormulation {
        self.lp().formulate()
    }

    /// Round an externally computed LP solution to a partition.
    pub fn interpret_solution(&self, solution: &LpSolution) -> Result<Partition<V>> {
        self.lp().interpret_solution(solution)
    }
}
