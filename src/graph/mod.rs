//! Weighted, undirected similarity graph.
//!
//! Node identifiers are interned to their header position; every vertex
//! keeps its neighbours in a `BTreeMap` keyed by that index, so iteration
//! over neighbours always follows the canonical (header) node order.
//!
//! Invariants maintained by every mutating operation:
//! - an edge `a -> b` is stored iff `b -> a` is stored, with the same weight
//! - no vertex ever stores an edge to itself
//! - the node set is fixed at construction

pub mod components;
pub mod pruning;

pub use pruning::{prune_neighborhoods, CutTier, NodeOutcome, PruningReport, PruningThresholds};

use crate::errors::{GraphError, Result};
use crate::matrix::SimilarityMatrix;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Maximum allowed difference between `w(a, b)` and `w(b, a)`.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Default)]
struct Vertex {
    edges: BTreeMap<usize, f64>,
}

/// One undirected edge, oriented so that `source < target` by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub weight: f64,
}

/// Degree statistics over all nodes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NeighborStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

/// Size and degree overview of a graph state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub neighbors: NeighborStats,
}

#[derive(Debug, Clone)]
pub struct WeightedGraph {
    node_ids: Vec<String>,
    index: HashMap<String, usize>,
    vertices: Vec<Vertex>,
}

impl WeightedGraph {
    /// Build a graph from header identifiers and full matrix rows.
    ///
    /// Every off-diagonal value `rows[i][j]` is stored as the symmetric pair
    /// `i -> j` and `j -> i`. When both halves of the matrix are supplied the
    /// later row wins for that pair. Diagonal values are ignored.
    pub fn build(node_ids: Vec<String>, rows: &[Vec<f64>]) -> Result<Self> {
        let n = node_ids.len();
        if n == 0 {
            return Err(GraphError::malformed("no node identifiers", 1, None));
        }

        let mut index = HashMap::with_capacity(n);
        for (i, id) in node_ids.iter().enumerate() {
            if index.insert(id.clone(), i).is_some() {
                return Err(GraphError::malformed(
                    format!("duplicate node identifier '{}'", id),
                    1,
                    Some(i + 1),
                ));
            }
        }

        if rows.len() != n {
            return Err(GraphError::malformed(
                format!("expected {} data rows, found {}", n, rows.len()),
                rows.len().min(n) + 2,
                None,
            ));
        }

        let mut vertices = vec![Vertex::default(); n];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(GraphError::malformed(
                    format!(
                        "row '{}' has {} values, expected {}",
                        node_ids[i],
                        row.len(),
                        n
                    ),
                    i + 2,
                    None,
                ));
            }
            for (j, &weight) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                if !weight.is_finite() {
                    return Err(GraphError::malformed(
                        format!("non-finite similarity {} in row '{}'", weight, node_ids[i]),
                        i + 2,
                        Some(j + 2),
                    ));
                }
                vertices[i].edges.insert(j, weight);
                vertices[j].edges.insert(i, weight);
            }
        }

        Ok(Self {
            node_ids,
            index,
            vertices,
        })
    }

    pub fn from_matrix(matrix: SimilarityMatrix) -> Result<Self> {
        let SimilarityMatrix { node_ids, rows } = matrix;
        Self::build(node_ids, &rows)
    }

    /// Node identifiers in header order
    pub fn node_ids(&self) -> &[String] {
        &self.node_ids
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of undirected edges currently stored
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum::<usize>() / 2
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Neighbours of `id` with their weights.
    pub fn neighbors(&self, id: &str) -> Result<BTreeMap<&str, f64>> {
        let i = self.index_of(id)?;
        Ok(self
            .neighbor_entries(i)
            .map(|(j, w)| (self.node_ids[j].as_str(), w))
            .collect())
    }

    pub fn degree(&self, id: &str) -> Result<usize> {
        Ok(self.degree_at(self.index_of(id)?))
    }

    /// Weight of the edge between `a` and `b`, if it is still stored.
    pub fn weight(&self, a: &str, b: &str) -> Result<Option<f64>> {
        let (i, j) = (self.index_of(a)?, self.index_of(b)?);
        Ok(self.vertices[i].edges.get(&j).copied())
    }

    pub fn has_edge(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.weight(a, b)?.is_some())
    }

    /// Remove the edge between `a` and `b` in both directions.
    ///
    /// Removing an absent edge is a no-op. Returns whether anything was
    /// removed.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Result<bool> {
        let (i, j) = (self.index_of(a)?, self.index_of(b)?);
        Ok(self.remove_edge_at(i, j))
    }

    /// Every undirected edge once, in header order of the lesser endpoint.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.vertices.iter().enumerate().flat_map(move |(i, vertex)| {
            vertex.edges.iter().filter_map(move |(&j, &weight)| {
                let (source, target) = (self.node_ids[i].as_str(), self.node_ids[j].as_str());
                (source < target).then_some(Edge {
                    source,
                    target,
                    weight,
                })
            })
        })
    }

    /// Check that the graph is complete and symmetric.
    ///
    /// Scans ordered pairs `(i, j)`, `i != j`, in header order and fails on
    /// the first pair whose edge is missing or whose two directions
    /// disagree by more than [`WEIGHT_TOLERANCE`]. Meant for the freshly
    /// built graph; after pruning use [`Self::validate_undirected`].
    pub fn validate_symmetry(&self) -> Result<()> {
        let n = self.node_count();
        for i in 0..n {
            for j in (0..n).filter(|&j| j != i) {
                let forward = self.vertices[i]
                    .edges
                    .get(&j)
                    .copied()
                    .ok_or_else(|| self.asymmetric(i, j))?;
                let backward = self.vertices[j]
                    .edges
                    .get(&i)
                    .copied()
                    .ok_or_else(|| self.asymmetric(j, i))?;
                self.check_weights(i, j, forward, backward)?;
            }
        }
        Ok(())
    }

    /// Check the undirected invariant without requiring completeness:
    /// every stored edge has a mirror with a matching weight.
    pub fn validate_undirected(&self) -> Result<()> {
        for (i, vertex) in self.vertices.iter().enumerate() {
            for (&j, &forward) in &vertex.edges {
                let backward = self.vertices[j]
                    .edges
                    .get(&i)
                    .copied()
                    .ok_or_else(|| self.asymmetric(j, i))?;
                self.check_weights(i, j, forward, backward)?;
            }
        }
        Ok(())
    }

    pub fn neighbor_stats(&self) -> NeighborStats {
        let degrees = self.vertices.iter().map(|v| v.edges.len());
        let (Some(min), Some(max)) = (degrees.clone().min(), degrees.clone().max()) else {
            return NeighborStats::default();
        };
        let total: usize = degrees.sum();

        NeighborStats {
            min,
            max,
            mean: total as f64 / self.node_count() as f64,
        }
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            nodes: self.node_count(),
            edges: self.edge_count(),
            neighbors: self.neighbor_stats(),
        }
    }

    pub(crate) fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(id))
    }

    pub(crate) fn id_at(&self, i: usize) -> &str {
        &self.node_ids[i]
    }

    pub(crate) fn degree_at(&self, i: usize) -> usize {
        self.vertices[i].edges.len()
    }

    pub(crate) fn has_edge_at(&self, i: usize, j: usize) -> bool {
        self.vertices[i].edges.contains_key(&j)
    }

    /// Neighbours of node `i` in header order.
    pub(crate) fn neighbor_entries(&self, i: usize) -> impl DoubleEndedIterator<Item = (usize, f64)> + '_ {
        self.vertices[i].edges.iter().map(|(&j, &w)| (j, w))
    }

    pub(crate) fn remove_edge_at(&mut self, i: usize, j: usize) -> bool {
        let forward = self.vertices[i].edges.remove(&j).is_some();
        let backward = self.vertices[j].edges.remove(&i).is_some();
        forward || backward
    }

    fn asymmetric(&self, from: usize, to: usize) -> GraphError {
        GraphError::AsymmetricGraph {
            from: self.node_ids[from].clone(),
            to: self.node_ids[to].clone(),
        }
    }

    fn check_weights(&self, i: usize, j: usize, forward: f64, backward: f64) -> Result<()> {
        if (forward - backward).abs() > WEIGHT_TOLERANCE {
            return Err(GraphError::InconsistentWeight {
                from: self.node_ids[i].clone(),
                to: self.node_ids[j].clone(),
                forward,
                backward,
            });
        }
        Ok(())
    }
}
