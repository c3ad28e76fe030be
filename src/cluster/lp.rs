//! LP relaxation of correlation clustering.
//!
//! Each known edge `{i, j}` gets a variable `z_ij ∈ [0, 1]`, read as a distance:
//! `0` = same cluster, `1` = different clusters. Mistakes become
//!
//! ```text
//! Σ_{ij ∈ E+} z_ij + Σ_{ij ∈ E-} (1 - z_ij)  =  Σ_{E+} z_ij - Σ_{E-} z_ij + |E-|
//! ```
//!
//! so the formulation minimizes `Σ_{E+} z_ij - Σ_{E-} z_ij` and reports `|E-|` as a
//! constant offset. For every triple `i < j < k` (input order) whose three pairs are
//! all known, the triangle inequalities
//!
//! ```text
//! z_ij - z_ik - z_jk <= 0
//! z_ik - z_ij - z_jk <= 0
//! z_jk - z_ij - z_ik <= 0
//! ```
//!
//! keep the fractional distances metric. Triples with an unknown pair are skipped.
//!
//! This module only *builds* the program. Solving it is left to an external LP
//! solver: serialize the [`LpFormulation`], solve it elsewhere, and feed the
//! variable values back through [`LpRelaxation::interpret_solution`].
//!
//! ## Rounding
//!
//! [`LpRelaxation::interpret_solution`] uses plain threshold rounding: each
//! unassigned vertex (in input order) opens a new cluster and pulls in every other
//! vertex whose distance to it is below the threshold, including vertices that an
//! earlier cluster had already claimed. This is a heuristic with no approximation
//! guarantee.

use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{EdgeKey, SignedGraph, Vertex};
use crate::partition::{ClusterId, Partition};

/// Values returned by an LP solver: variable name -> value in `[0, 1]`.
pub type LpSolution = HashMap<String, f64>;

/// Relation between a constraint's left-hand side and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// `lhs <= rhs`
    LessOrEqual,
}

impl Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintSense::LessOrEqual => f.write_str("<="),
        }
    }
}

/// A bounded decision variable with its objective coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpVariable {
    /// Deterministic name, `z_<low>_<high>` from the canonical vertex pair
    /// (see [`LpRelaxation::variable_name`]).
    pub name: String,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Objective coefficient.
    pub objective: f64,
}

/// A sparse linear constraint `Σ coef * x[var] <sense> rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpConstraint {
    /// `(variable index, coefficient)` pairs.
    pub terms: Vec<(usize, f64)>,
    /// Constraint sense.
    pub sense: ConstraintSense,
    /// Right-hand side.
    pub rhs: f64,
}

/// A complete minimization program, ready to hand to a solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpFormulation {
    variables: Vec<LpVariable>,
    constraints: Vec<LpConstraint>,
    objective_offset: f64,
}

impl LpFormulation {
    /// Variables in edge discovery order.
    pub fn variables(&self) -> &[LpVariable] {
        &self.variables
    }

    /// Constraints in triple order.
    pub fn constraints(&self) -> &[LpConstraint] {
        &self.constraints
    }

    /// Variable names.
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }

    /// Index of the variable called `name`.
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }

    /// Objective coefficients, one per variable.
    pub fn objective(&self) -> Vec<f64> {
        self.variables.iter().map(|v| v.objective).collect()
    }

    /// Constant to add to the objective to obtain the mistake count (`|E-|`).
    pub fn objective_offset(&self) -> f64 {
        self.objective_offset
    }

    /// `(lower, upper)` bounds, one per variable.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        self.variables.iter().map(|v| (v.lower, v.upper)).collect()
    }

    /// Dense constraint matrix: one row per constraint, one column per variable.
    pub fn constraint_matrix(&self) -> Vec<Vec<f64>> {
        self.constraints
            .iter()
            .map(|c| {
                let mut row = vec![0.0; self.variables.len()];
                for &(idx, coef) in &c.terms {
                    row[idx] += coef;
                }
                row
            })
            .collect()
    }

    /// Right-hand sides, one per constraint.
    pub fn rhs(&self) -> Vec<f64> {
        self.constraints.iter().map(|c| c.rhs).collect()
    }

    /// Constraint senses, one per constraint.
    pub fn senses(&self) -> Vec<ConstraintSense> {
        self.constraints.iter().map(|c| c.sense).collect()
    }

    /// Objective value of `solution`, offset included.
    ///
    /// For a 0/1 solution that encodes a partition this equals the partition's
    /// mistake count.
    ///
    /// # Errors
    ///
    /// [`Error::MissingVariable`] if a variable has no value, [`Error::OutOfBounds`]
    /// if a value lies outside its bounds.
    pub fn objective_value(&self, solution: &LpSolution) -> Result<f64> {
        let mut total = self.objective_offset;
        for var in &self.variables {
            let value = *solution
                .get(&var.name)
                .ok_or_else(|| Error::MissingVariable {
                    variable: var.name.clone(),
                })?;
            check_bounds(&var.name, value, var.lower, var.upper)?;
            total += var.objective * value;
        }
        Ok(total)
    }
}

fn check_bounds(name: &str, value: f64, lower: f64, upper: f64) -> Result<()> {
    if (lower..=upper).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfBounds {
            variable: name.to_string(),
            value,
        })
    }
}

/// Builds the LP relaxation of a signed graph and rounds solutions back to partitions.
#[derive(Debug, Clone)]
pub struct LpRelaxation<'g, V> {
    graph: &'g SignedGraph<V>,
    threshold: f64,
}

impl<'g, V: Vertex + Display> LpRelaxation<'g, V> {
    /// Create a formulator over `graph` with rounding threshold `0.5`.
    pub fn new(graph: &'g SignedGraph<V>) -> Self {
        Self {
            graph,
            threshold: 0.5,
        }
    }

    /// Set the rounding threshold: pairs with `z < threshold` are put together.
    ///
    /// Must lie in `(0, 1]`; checked by [`interpret_solution`](Self::interpret_solution).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Variable name for the pair `{u, v}`: `z_<low>_<high>` in vertex order.
    ///
    /// `\` and `_` inside a rendered endpoint are written as `\\` and `\_`, so the
    /// two separators are the only bare underscores and distinct pairs never share
    /// a name.
    pub fn variable_name(u: &V, v: &V) -> String {
        let key = EdgeKey::new(u, v);
        Self::oriented_name(key.low(), key.high())
    }

    fn oriented_name(u: &V, v: &V) -> String {
        format!("z_{}_{}", escape(u), escape(v))
    }

    /// Build the relaxation.
    pub fn formulate(&self) -> LpFormulation {
        let graph = self.graph;

        let variables: Vec<LpVariable> = graph
            .edges()
            .iter()
            .map(|e| LpVariable {
                name: Self::variable_name(e.key.low(), e.key.high()),
                lower: 0.0,
                upper: 1.0,
                objective: f64::from(e.sign.weight()),
            })
            .collect();

        let n = graph.vertex_count();
        let mut constraints = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let Some(ij) = graph.edge_id(i, j) else {
                    continue;
                };
                for k in (j + 1)..n {
                    let (Some(ik), Some(jk)) = (graph.edge_id(i, k), graph.edge_id(j, k)) else {
                        continue;
                    };
                    for (a, b, c) in [(ij, ik, jk), (ik, ij, jk), (jk, ij, ik)] {
                        constraints.push(LpConstraint {
                            terms: vec![(a, 1.0), (b, -1.0), (c, -1.0)],
                            sense: ConstraintSense::LessOrEqual,
                            rhs: 0.0,
                        });
                    }
                }
            }
        }

        let objective_offset = graph.stats().negative_edge_count as f64;
        debug!(
            variables = variables.len(),
            constraints = constraints.len(),
            objective_offset,
            "formulated LP relaxation"
        );

        LpFormulation {
            variables,
            constraints,
            objective_offset,
        }
    }

    /// Round a (fractional) solution to a partition.
    ///
    /// Only known edges are consulted; a pair without an edge, or an edge without a
    /// value in `solution`, never pulls vertices together. A value may be given under
    /// either orientation, `z_u_v` or `z_v_u`.
    /// Cluster ids are handed out from `0` in the order clusters are opened; a vertex
    /// reclaimed by a later cluster can leave an earlier id unused.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if the threshold is not in `(0, 1]`.
    /// - [`Error::OutOfBounds`] if any value in `solution` is outside `[0, 1]` or NaN.
    ///   The whole map is checked before rounding starts.
    pub fn interpret_solution(&self, solution: &LpSolution) -> Result<Partition<V>> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "threshold",
                message: "must lie in (0, 1]",
            });
        }

        let values = self.edge_values(solution)?;
        let vertices = self.graph.vertices();
        let n = vertices.len();
        let mut labels: Vec<Option<ClusterId>> = vec![None; n];
        let mut next: ClusterId = 0;

        for i in 0..n {
            if labels[i].is_some() {
                continue;
            }
            labels[i] = Some(next);
            for j in 0..n {
                if i == j {
                    continue;
                }
                let z = self.graph.edge_id(i, j).and_then(|id| values[id]);
                if let Some(z) = z {
                    if z < self.threshold {
                        labels[j] = Some(next);
                    }
                }
            }
            next += 1;
        }

        Ok(vertices
            .iter()
            .zip(labels)
            .filter_map(|(v, c)| c.map(|c| (v.clone(), c)))
            .collect())
    }

    /// 0/1 solution encoding `partition`: `z = 0` inside a cluster, `1` across.
    ///
    /// # Errors
    ///
    /// [`Error::MissingAssignment`] if an edge endpoint is unassigned.
    pub fn indicator_solution(&self, partition: &Partition<V>) -> Result<LpSolution> {
        let cluster_of = |v: &V| {
            partition.get(v).ok_or_else(|| Error::MissingAssignment {
                vertex: format!("{v:?}"),
            })
        };
        let mut solution = LpSolution::with_capacity(self.graph.edges().len());
        for e in self.graph.edges() {
            let together = cluster_of(e.key.low())? == cluster_of(e.key.high())?;
            let z = if together { 0.0 } else { 1.0 };
            solution.insert(Self::variable_name(e.key.low(), e.key.high()), z);
        }
        Ok(solution)
    }

    /// Bounds-check every entry of `solution`, then resolve one value per edge id.
    fn edge_values(&self, solution: &LpSolution) -> Result<Vec<Option<f64>>> {
        let mut names: Vec<&String> = solution.keys().collect();
        names.sort();
        for name in names {
            check_bounds(name, solution[name], 0.0, 1.0)?;
        }

        Ok(self
            .graph
            .edges()
            .iter()
            .map(|e| {
                let (low, high) = (e.key.low(), e.key.high());
                solution
                    .get(&Self::oriented_name(low, high))
                    .or_else(|| solution.get(&Self::oriented_name(high, low)))
                    .copied()
            })
            .collect())
    }
}

fn escape(v: &impl Display) -> String {
    v.to_string().replace('\\', "\\\\").replace('_', "\\_")
}
