//! Command implementations.
//!
//! - **analyze**: build the similarity graph, prune it and export the results

pub mod analyze;

pub use analyze::{analyze_matrix, handle_analyze, run_analysis, Analysis, RunSummary};
