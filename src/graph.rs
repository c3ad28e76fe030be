//! Signed graph model.
//!
//! A signed graph stores a vertex list and two disjoint edge sets: positive edges
//! ("these two belong together") and negative edges ("these two belong apart").
//! A pair of vertices that appears in neither set is *unknown*; evaluation ignores it.
//! Partial graphs are fully supported.
//!
//! Vertices keep their input order. That order is observable: it fixes how the greedy
//! engines enumerate candidates and how LP triangle constraints are emitted.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bound satisfied by vertex identifiers.
///
/// Any cloneable, totally ordered, hashable key works (integers, strings, tuples...).
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Vertex for T {}

/// Sign carried by a known edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// The endpoints are similar and should share a cluster.
    Positive,
    /// The endpoints are dissimilar and should be separated.
    Negative,
}

impl Sign {
    /// `+1` for positive edges, `-1` for negative edges.
    pub fn weight(self) -> i8 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

/// Canonical key of an unordered vertex pair.
///
/// `EdgeKey::new(u, v)` and `EdgeKey::new(v, u)` are equal: the endpoints are stored
/// in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey<V> {
    low: V,
    high: V,
}

impl<V: Ord> EdgeKey<V> {
    /// Normalize `(u, v)` into canonical order.
    pub fn new(u: V, v: V) -> Self {
        if u <= v {
            Self { low: u, high: v }
        } else {
            Self { low: v, high: u }
        }
    }

    /// The smaller endpoint.
    pub fn low(&self) -> &V {
        &self.low
    }

    /// The larger endpoint.
    pub fn high(&self) -> &V {
        &self.high
    }

    /// Consume the key, returning `(low, high)`.
    pub fn into_pair(self) -> (V, V) {
        (self.low, self.high)
    }
}

/// A known edge of a [`SignedGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<V> {
    /// Canonical endpoint pair.
    pub key: EdgeKey<V>,
    /// Edge sign.
    pub sign: Sign,
    /// Endpoint positions in the vertex list.
    pub(crate) ends: (usize, usize),
}

/// Summary counts for a signed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of distinct positive edges.
    pub positive_edge_count: usize,
    /// Number of distinct negative edges.
    pub negative_edge_count: usize,
}

impl GraphStats {
    /// Number of known edges (positive plus negative).
    pub fn total_edge_count(&self) -> usize {
        self.positive_edge_count + self.negative_edge_count
    }
}

/// Immutable signed graph over vertices of type `V`.
#[derive(Debug, Clone)]
pub struct SignedGraph<V> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    /// Known edges in discovery order: positive input first, then negative input.
    edges: Vec<Edge<V>>,
    /// `(min_pos, max_pos) -> edge id`.
    lookup: HashMap<(usize, usize), usize>,
    /// `vertex position -> [(neighbor position, sign)]`.
    adjacency: Vec<Vec<(usize, Sign)>>,
    positive_count: usize,
}

impl<V: Vertex> SignedGraph<V> {
    /// Build a signed graph.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateVertex`] if `vertices` repeats an identifier.
    /// - [`Error::SelfLoop`] if an edge joins a vertex to itself.
    /// - [`Error::UnknownVertex`] if an edge mentions a vertex not in `vertices`.
    /// - [`Error::ConflictingSign`] if a pair is listed as both positive and negative.
    ///
    /// Repeating a pair within the same sign list is accepted; the first occurrence
    /// fixes the edge's position in discovery order.
    pub fn new<I, P, N>(vertices: I, positive_edges: P, negative_edges: N) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        P: IntoIterator<Item = (V, V)>,
        N: IntoIterator<Item = (V, V)>,
    {
        let vertices: Vec<V> = vertices.into_iter().collect();
        let mut index = HashMap::with_capacity(vertices.len());
        for (pos, v) in vertices.iter().enumerate() {
            if index.insert(v.clone(), pos).is_some() {
                return Err(Error::DuplicateVertex {
                    vertex: format!("{v:?}"),
                });
            }
        }

        let mut graph = Self {
            adjacency: vec![Vec::new(); vertices.len()],
            vertices,
            index,
            edges: Vec::new(),
            lookup: HashMap::new(),
            positive_count: 0,
        };

        for (u, v) in positive_edges {
            graph.insert_edge(u, v, Sign::Positive)?;
        }
        for (u, v) in negative_edges {
            graph.insert_edge(u, v, Sign::Negative)?;
        }

        Ok(graph)
    }

    fn insert_edge(&mut self, u: V, v: V, sign: Sign) -> Result<()> {
        if u == v {
            return Err(Error::SelfLoop {
                vertex: format!("{u:?}"),
            });
        }
        let a = self.position_or_err(&u)?;
        let b = self.position_or_err(&v)?;
        let pair = (a.min(b), a.max(b));

        if let Some(&id) = self.lookup.get(&pair) {
            if self.edges[id].sign != sign {
                return Err(Error::ConflictingSign {
                    edge: format!("{:?}", EdgeKey::new(u, v).into_pair()),
                });
            }
            return Ok(());
        }

        let id = self.edges.len();
        self.lookup.insert(pair, id);
        self.adjacency[a].push((b, sign));
        self.adjacency[b].push((a, sign));
        if sign == Sign::Positive {
            self.positive_count += 1;
        }
        self.edges.push(Edge {
            key: EdgeKey::new(u, v),
            sign,
            ends: pair,
        });
        Ok(())
    }

    fn position_or_err(&self, v: &V) -> Result<usize> {
        self.index.get(v).copied().ok_or_else(|| Error::UnknownVertex {
            vertex: format!("{v:?}"),
        })
    }

    /// Vertices in input order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Known edges in discovery order.
    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    /// Position of `v` in the vertex list.
    pub fn position(&self, v: &V) -> Option<usize> {
        self.index.get(v).copied()
    }

    /// Whether `v` is a vertex of this graph.
    pub fn contains(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    /// Sign of the edge between `u` and `v`, or `None` if the pair is unknown.
    pub fn sign(&self, u: &V, v: &V) -> Option<Sign> {
        let a = self.position(u)?;
        let b = self.position(v)?;
        self.edge_id(a, b).map(|id| self.edges[id].sign)
    }

    /// True if `{u, v}` is a positive edge.
    pub fn has_positive_edge(&self, u: &V, v: &V) -> bool {
        self.sign(u, v) == Some(Sign::Positive)
    }

    /// True if `{u, v}` is a negative edge.
    pub fn has_negative_edge(&self, u: &V, v: &V) -> bool {
        self.sign(u, v) == Some(Sign::Negative)
    }

    /// Vertex, positive-edge and negative-edge counts.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertex_count: self.vertices.len(),
            positive_edge_count: self.positive_count,
            negative_edge_count: self.edges.len() - self.positive_count,
        }
    }

    /// Edge id of the pair at positions `(a, b)`.
    pub(crate) fn edge_id(&self, a: usize, b: usize) -> Option<usize> {
        if a == b {
            return None;
        }
        self.lookup.get(&(a.min(b), a.max(b))).copied()
    }

    /// Signed neighbors of the vertex at position `pos`.
    pub(crate) fn neighbors(&self, pos: usize) -> &[(usize, Sign)] {
        &self.adjacency[pos]
    }
}
