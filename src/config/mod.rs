//! Run parameters and the optional `.simgraph.toml` file.
//!
//! The thresholds always come from the caller (command line); the file only
//! supplies presentation settings such as output file names and the edge
//! list interaction label.

mod core;
mod loader;

pub use self::core::{OutputConfig, SimgraphConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

use crate::errors::{GraphError, Result};
use crate::graph::PruningThresholds;
use serde::Serialize;
use std::path::PathBuf;

/// Everything needed for one construct-prune-report run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub thresholds: PruningThresholds,
    pub interaction_type: String,
    #[serde(skip)]
    pub output: OutputConfig,
}

impl RunConfig {
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        thresholds: PruningThresholds,
        file_config: SimgraphConfig,
    ) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            thresholds,
            interaction_type: file_config.interaction_type,
            output: file_config.output,
        }
    }

    /// Override the interaction label from the file config
    pub fn with_interaction_type(mut self, label: Option<String>) -> Self {
        if let Some(label) = label {
            self.interaction_type = label;
        }
        self
    }

    /// Re-check every parameter; the caller is never trusted.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        core::validate_interaction_type(&self.interaction_type)
            .map_err(|message| GraphError::invalid_parameter("interaction_type", message))?;
        self.output
            .validate()
            .map_err(|message| GraphError::config(message, None))?;

        if self.output_dir.is_file() {
            return Err(GraphError::invalid_parameter(
                "output_dir",
                format!("{} is a file", self.output_dir.display()),
            ));
        }
        Ok(())
    }

    /// Path of an artifact inside the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
