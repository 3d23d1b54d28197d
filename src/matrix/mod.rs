//! Tab-delimited similarity matrix input.
//!
//! The input is a square matrix with a header row of node identifiers and
//! one data row per identifier, in the same order:
//!
//! ```text
//! <id_1>\t<id_2>\t...\t<id_N>
//! <id_1>\t<sim_11>\t<sim_12>\t...\t<sim_1N>
//! ...
//! <id_N>\t<sim_N1>\t...\t<sim_NN>
//! ```

mod parser;

pub use parser::{parse_matrix, parse_matrix_str, read_matrix};

use serde::Serialize;

/// A parsed, shape-checked similarity matrix.
///
/// `rows[i][j]` is the similarity of `node_ids[i]` to `node_ids[j]`,
/// diagonal included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    pub node_ids: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Number of nodes (rows, and columns) in the matrix
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Similarity of row `i` to column `j`, if both are in range.
    pub fn value(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(i).and_then(|row| row.get(j)).copied()
    }
}
