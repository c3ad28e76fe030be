//! Correlation clustering of signed graphs.
//!
//! Given a graph whose known edges say "together" (+) or "apart" (−), find a
//! partition of the vertices that disagrees with as few edges as possible. The
//! number of clusters is not fixed in advance; it falls out of the optimization.
//!
//! ## Objective
//!
//! ```text
//! mistakes(P) = #{ + edges cut by P } + #{ − edges kept inside a cluster of P }
//! ```
//!
//! Minimizing this exactly is NP-hard, so this module offers heuristics and a
//! relaxation rather than an exact solver.
//!
//! ## Strategies (implemented)
//!
//! ### Greedy cluster merging
//!
//! [`GreedyMerge`] starts from singletons and repeatedly merges two clusters whenever
//! that strictly lowers the mistake count, scanning cluster pairs.
//!
//! ### Greedy vertex-pair merging
//!
//! [`VertexGreedy`] uses the same moves but scans vertex pairs. It breaks ties in a
//! different order and can end in a different local optimum.
//!
//! ### LP relaxation
//!
//! [`LpRelaxation`] builds the standard metric relaxation (one `[0, 1]` variable per
//! known edge, triangle inequalities over fully known triples) for an external
//! solver, and rounds a returned solution back into a partition by thresholding.
//!
//! ## Usage
//!
//! ```rust
//! use corrclust::cluster::{CorrelationClusterer, GreedyMerge};
//! use corrclust::SignedGraph;
//!
//! let graph = SignedGraph::new([0, 1, 2], [(0, 1)], [(1, 2)]).unwrap();
//!
//! let result = GreedyMerge::new().cluster(&graph);
//! assert_eq!(result.mistakes(), 0);
//! assert_eq!(result.cluster_count(), 2);
//! assert_eq!(result.partition().same_cluster(&0, &1), Some(true));
//! ```

mod correlation;
pub mod evaluate;
mod greedy;
mod lp;
mod traits;
mod util;
mod vertex_greedy;

pub use correlation::CorrelationClustering;
pub use evaluate::{count_mistakes, validate_clustering};
pub use greedy::GreedyMerge;
pub use lp::{ConstraintSense, LpConstraint, LpFormulation, LpRelaxation, LpSolution, LpVariable};
pub use traits::CorrelationClusterer;
pub use vertex_greedy::VertexGreedy;
