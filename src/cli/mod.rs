//! Command-line interface for simgraph
//!
//! - Argument parsing (`Cli`)
//! - Runtime setup (`setup`)

pub mod setup;

pub use setup::{init_logging, verbosity_filter};

use crate::config::{load_config, load_config_from_path, RunConfig};
use crate::errors::{GraphError, Result};
use crate::graph::PruningThresholds;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "simgraph")]
#[command(
    about = "Build a similarity graph from a matrix, prune weak neighbourhood edges and report connected components",
    long_about = None
)]
#[command(version, allow_negative_numbers = true)]
pub struct Cli {
    /// Tab-delimited similarity matrix with a header row of node identifiers
    pub input: PathBuf,

    /// Directory for the exported artifacts (created if missing)
    pub output_dir: PathBuf,

    /// Similarity below which edges are dropped first
    pub small_threshold: f64,

    /// Fallback threshold when the small cut leaves too few neighbours
    pub medium_threshold: f64,

    /// Last-resort threshold, applied even below the neighbour floor
    pub large_threshold: f64,

    /// Minimum number of neighbours to keep at the small and medium tiers
    pub min_neighbors: i64,

    /// Interaction label written to the edge list (default: pp)
    #[arg(long = "interaction-type", env = "SIMGRAPH_INTERACTION_TYPE")]
    pub interaction_type: Option<String>,

    /// Configuration file (defaults to .simgraph.toml in the current directory or its parents)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Resolve the file configuration and turn the arguments into a run.
    ///
    /// Thresholds are not range-checked here; `run_analysis` validates
    /// them before touching any file.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let min_neighbors = usize::try_from(self.min_neighbors).map_err(|_| {
            GraphError::invalid_parameter(
                "min_neighbors",
                format!("must be a non-negative integer, got {}", self.min_neighbors),
            )
        })?;

        let thresholds = PruningThresholds {
            small: self.small_threshold,
            medium: self.medium_threshold,
            large: self.large_threshold,
            min_neighbors,
        };

        let file_config = match &self.config {
            Some(path) => load_config_from_path(path)?,
            None => load_config(),
        };

        Ok(
            RunConfig::new(self.input, self.output_dir, thresholds, file_config)
                .with_interaction_type(self.interaction_type),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("simgraph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        let cli = parse(&["matrix.txt", "out", "0.3", "0.6", "0.9", "2"]);
        assert_eq!(cli.input, PathBuf::from("matrix.txt"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.small_threshold, 0.3);
        assert_eq!(cli.large_threshold, 0.9);
        assert_eq!(cli.min_neighbors, 2);
        assert_eq!(cli.verbosity, 0);
    }

    #[test]
    fn test_missing_arguments_is_usage_error() {
        let err = Cli::try_parse_from(["simgraph", "matrix.txt", "out", "0.3"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_negative_min_neighbors_is_invalid_parameter() {
        let cli = parse(&["m.txt", "out", "0.3", "0.6", "0.9", "-1"]);
        let err = cli.into_run_config().unwrap_err();
        assert!(matches!(
            err,
            GraphError::InvalidParameter {
                name: "min_neighbors",
                ..
            }
        ));
    }

    #[test]
    fn test_explicit_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "interaction_type = \"sim\"\n\n[output]\nedge_list = \"edges.tsv\"").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = parse(&["m.txt", "out", "0.3", "0.6", "0.9", "1", "--config", &path]);
        let config = cli.into_run_config().unwrap();
        assert_eq!(config.interaction_type, "sim");
        assert_eq!(config.output.edge_list, "edges.tsv");
    }

    #[test]
    fn test_interaction_flag_overrides_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "interaction_type = \"sim\"").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = parse(&[
            "m.txt",
            "out",
            "0.3",
            "0.6",
            "0.9",
            "1",
            "--config",
            &path,
            "--interaction-type",
            "coexp",
        ]);
        assert_eq!(cli.into_run_config().unwrap().interaction_type, "coexp");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let cli = parse(&[
            "m.txt",
            "out",
            "0.3",
            "0.6",
            "0.9",
            "1",
            "--config",
            "/nonexistent/simgraph.toml",
        ]);
        assert!(cli.into_run_config().is_err());
    }
}
