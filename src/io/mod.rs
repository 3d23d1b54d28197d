pub mod writers;

use crate::errors::{GraphError, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

pub use writers::{
    export_adjacency_matrix, export_component_adjacency_matrices, export_component_list,
    export_edge_list, export_summary, write_adjacency_matrix, write_component_adjacency_matrices,
    write_component_list, write_edge_list, write_summary,
};

/// Create `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)
            .map_err(|e| GraphError::io("failed to create output directory", path, e))?;
    }
    Ok(())
}

/// Open `path` for writing, truncating any existing file.
pub fn create_output_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| GraphError::io("failed to open output file", path, e))
}

pub(crate) fn write_failed(source: std::io::Error) -> GraphError {
    GraphError::Io {
        message: "failed to write output".into(),
        path: None,
        source: Some(source),
    }
}
