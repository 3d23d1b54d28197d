//! Similarity graph engine.
//!
//! Reads a square similarity matrix, stores it as a weighted undirected
//! graph, prunes each node's weak edges with cascading thresholds and
//! reports the connected components of what remains.
//!
//! ```rust
//! use simgraph::{parse_matrix_str, prune_neighborhoods, PruningThresholds, WeightedGraph};
//!
//! let matrix = parse_matrix_str("A\tB\tC\nA\t1\t0.9\t0.1\nB\t0.9\t1\t0.2\nC\t0.1\t0.2\t1\n")?;
//! let mut graph = WeightedGraph::from_matrix(matrix)?;
//! let thresholds = PruningThresholds::new(0.15, 0.5, 0.8, 1)?;
//!
//! prune_neighborhoods(&mut graph, &thresholds)?;
//! assert_eq!(graph.connected_components(), vec![vec!["A", "B", "C"]]);
//! # Ok::<(), simgraph::GraphError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod graph;
pub mod io;
pub mod matrix;
pub mod progress;

pub use crate::commands::{analyze_matrix, run_analysis, Analysis, RunSummary};
pub use crate::config::{RunConfig, SimgraphConfig};
pub use crate::errors::{GraphError, Result};
pub use crate::graph::{
    prune_neighborhoods, CutTier, Edge, GraphSummary, NeighborStats, NodeOutcome, PruningReport,
    PruningThresholds, WeightedGraph,
};
pub use crate::matrix::{parse_matrix, parse_matrix_str, read_matrix, SimilarityMatrix};
pub use crate::progress::{ProgressSink, SilentProgressSink};
