//! Correlation clustering for signed graphs.
//!
//! `corrclust` partitions the vertices of a signed graph (edges marked "similar" or
//! "dissimilar") so that as few edges as possible disagree with the partition.
//!
//! The primary public API is under [`cluster`], which provides:
//! - a mistake evaluator for arbitrary partitions
//! - two greedy local-search strategies (cluster-pair and vertex-pair merging)
//! - an LP relaxation formulator with threshold rounding (no solver included)
//!
//! ```rust
//! use corrclust::CorrelationClustering;
//!
//! let cc = CorrelationClustering::new([0, 1, 2], [(0, 1), (1, 2)], []).unwrap();
//! let result = cc.greedy_cluster();
//! assert_eq!(result.mistakes(), 0);
//! assert_eq!(result.cluster_count(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod graph;
pub mod partition;

pub use cluster::{
    CorrelationClusterer, CorrelationClustering, GreedyMerge, LpFormulation, LpRelaxation,
    LpSolution, VertexGreedy,
};
pub use error::{Error, Result};
pub use graph::{EdgeKey, GraphStats, Sign, SignedGraph, Vertex};
pub use partition::{ClusterId, ClusteringResult, Partition};
