//! Text and JSON renderers for graph state.
//!
//! The `write_*` functions render to any [`std::io::Write`] sink and never
//! modify the graph. The `export_*` variants create the target file first
//! and attach its path to any I/O error.

mod components;
mod edge_list;
pub mod json;
mod matrix;

pub use components::write_component_list;
pub use edge_list::write_edge_list;
pub use json::JsonWriter;
pub use matrix::{write_adjacency_matrix, write_component_adjacency_matrices};

use super::{create_output_file, write_failed};
use crate::errors::Result;
use crate::graph::WeightedGraph;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Full adjacency matrix over all nodes, in header order.
pub fn export_adjacency_matrix(graph: &WeightedGraph, path: &Path) -> Result<()> {
    export_to_file(path, |out| write_adjacency_matrix(graph, out))
}

pub fn export_component_list(components: &[Vec<String>], path: &Path) -> Result<()> {
    export_to_file(path, |out| write_component_list(components, out))
}

pub fn export_component_adjacency_matrices(
    graph: &WeightedGraph,
    components: &[Vec<String>],
    path: &Path,
) -> Result<()> {
    export_to_file(path, |out| {
        write_component_adjacency_matrices(graph, components, out)
    })
}

pub fn export_edge_list(graph: &WeightedGraph, interaction_type: &str, path: &Path) -> Result<()> {
    export_to_file(path, |out| write_edge_list(graph, interaction_type, out))
}

/// Pretty-printed JSON rendering of any serializable value.
pub fn write_summary<T: Serialize, W: Write>(summary: &T, out: W) -> Result<()> {
    JsonWriter::new(out).write(summary)
}

pub fn export_summary<T: Serialize>(summary: &T, path: &Path) -> Result<()> {
    export_to_file(path, |out| write_summary(summary, out))
}

fn export_to_file<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut out = create_output_file(path)?;
    render(&mut out)
        .and_then(|()| out.flush().map_err(write_failed))
        .map_err(|e| e.with_path(path))?;

    debug!(path = %path.display(), "wrote output file");
    Ok(())
}
