//! Error types for similarity graph operations.
//!
//! Every failure in the engine is fatal to the current run, so there is a
//! single error enum rather than a hierarchy. Variants carry enough context
//! (line/column, identifiers, offending values) to locate the bad input.
//!
//! # Example
//!
//! ```rust
//! use simgraph::errors::GraphError;
//!
//! let err = GraphError::malformed("value is not a number: x", 3, Some(4));
//! assert!(err.is_input_error());
//! assert_eq!(err.to_string(), "Malformed input at line 3, column 4: value is not a number: x");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for graph construction, validation, pruning and export.
#[derive(Debug, Error)]
pub enum GraphError {
    /// File open/read/write failure
    #[error("I/O error: {message}{}", display_path(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Header or row shape problems, unparsable values
    #[error("Malformed input at line {line}{}: {message}", display_column(.column))]
    MalformedInput {
        message: String,
        line: usize,
        column: Option<usize>,
    },

    /// Lookup of an identifier that was never declared in the header
    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    /// An edge is stored in one direction only (or is missing entirely)
    #[error("Asymmetric graph: edge {from} -> {to} is not stored")]
    AsymmetricGraph { from: String, to: String },

    /// Both directions are stored but their weights disagree
    #[error("Inconsistent weight: {from} -> {to} = {forward} vs {backward}")]
    InconsistentWeight {
        from: String,
        to: String,
        forward: f64,
        backward: f64,
    },

    /// Run parameter outside its allowed range
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Configuration file problems
    #[error("Configuration error: {message}{}", display_path(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

fn display_column(column: &Option<usize>) -> String {
    column.map(|c| format!(", column {c}")).unwrap_or_default()
}

impl GraphError {
    /// Create an I/O error from a failed operation on `path`.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a malformed-input error at a 1-based line (and optional column).
    pub fn malformed(message: impl Into<String>, line: usize, column: Option<usize>) -> Self {
        Self::MalformedInput {
            message: message.into(),
            line,
            column,
        }
    }

    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }

    /// Attach a file path to an I/O error that was raised against an
    /// anonymous sink. Other variants are returned unchanged.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io {
                message,
                path: None,
                source,
            } => Self::Io {
                message,
                path: Some(path.into()),
                source,
            },
            other => other,
        }
    }

    /// Whether the failure is caused by the input matrix or run parameters,
    /// as opposed to the environment (file system).
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

/// Result type alias using the graph error type
pub type Result<T> = std::result::Result<T, GraphError>;
