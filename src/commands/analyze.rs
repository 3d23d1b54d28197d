//! The construct-validate-prune-report pipeline.
//!
//! Phases run strictly in sequence and the first failure aborts the run:
//! parse errors stop before the graph exists, validation errors stop before
//! anything is written to the output directory.

use crate::config::RunConfig;
use crate::errors::Result;
use crate::graph::{
    prune_neighborhoods, CutTier, GraphSummary, PruningReport, PruningThresholds, WeightedGraph,
};
use crate::io::{self, writers};
use crate::matrix::{read_matrix, SimilarityMatrix};
use crate::progress::{CliProgressSink, ProgressSink};
use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info_span;

/// In-memory outcome of building and pruning one matrix
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: WeightedGraph,
    pub initial: GraphSummary,
    pub initial_components: usize,
    pub pruning: PruningReport,
    pub pruned: GraphSummary,
    pub components: Vec<Vec<String>>,
}

/// Machine-readable record of a completed run, written as `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub thresholds: PruningThresholds,
    pub interaction_type: String,
    pub initial: GraphSummary,
    pub initial_components: usize,
    pub pruning: PruningReport,
    pub pruned: GraphSummary,
    pub component_count: usize,
    pub component_sizes: Vec<usize>,
    pub artifacts: Vec<PathBuf>,
}

/// Build, validate and prune a parsed matrix.
pub fn analyze_matrix(
    matrix: SimilarityMatrix,
    thresholds: &PruningThresholds,
    progress: &dyn ProgressSink,
) -> Result<Analysis> {
    thresholds.validate()?;

    progress.start_stage("Building graph");
    let mut graph = {
        let _span = info_span!("build").entered();
        WeightedGraph::from_matrix(matrix)?
    };
    progress.message(&format!(
        "Undirected graph built: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    ));

    graph.validate_symmetry()?;
    progress.message("Symmetry check passed");

    let initial = graph.summary();
    report_neighbor_stats(progress, &initial);
    let initial_components = graph.component_count();
    progress.message(&format!("Connected components: {}", initial_components));
    progress.complete_stage("Building graph");

    progress.start_stage("Neighborhood analysis");
    progress.message(&format!(
        "Thresholds: small={}, medium={}, large={}",
        thresholds.small, thresholds.medium, thresholds.large
    ));
    progress.message(&format!("Minimum neighbors: {}", thresholds.min_neighbors));

    let pruning = prune_neighborhoods(&mut graph, thresholds)?;
    graph.validate_undirected()?;
    report_pruning(progress, &pruning, thresholds.min_neighbors);

    let pruned = graph.summary();
    report_neighbor_stats(progress, &pruned);

    let components = graph.connected_components();
    progress.message(&format!(
        "Connected components after pruning: {}",
        components.len()
    ));
    progress.complete_stage("Neighborhood analysis");

    Ok(Analysis {
        graph,
        initial,
        initial_components,
        pruning,
        pruned,
        components,
    })
}

/// Run the full pipeline for one invocation.
pub fn run_analysis(config: &RunConfig, progress: &dyn ProgressSink) -> Result<RunSummary> {
    config.validate()?;

    progress.start_stage("Reading similarity matrix");
    progress.message(&format!("Input file: {}", config.input.display()));
    progress.message(&format!("Output directory: {}", config.output_dir.display()));
    let matrix = {
        let _span = info_span!("parse", path = %config.input.display()).entered();
        read_matrix(&config.input)?
    };
    progress.message(&format!("Matrix size: {0} x {0}", matrix.len()));
    progress.complete_stage("Reading similarity matrix");

    let analysis = analyze_matrix(matrix, &config.thresholds, progress)?;
    let artifacts = export_results(config, &analysis, progress)?;

    let mut summary = RunSummary {
        input: config.input.clone(),
        output_dir: config.output_dir.clone(),
        thresholds: config.thresholds,
        interaction_type: config.interaction_type.clone(),
        initial: analysis.initial.clone(),
        initial_components: analysis.initial_components,
        pruning: analysis.pruning.clone(),
        pruned: analysis.pruned.clone(),
        component_count: analysis.components.len(),
        component_sizes: analysis.components.iter().map(Vec::len).collect(),
        artifacts,
    };

    if config.output.write_summary {
        let path = config.output_path(&config.output.summary);
        summary.artifacts.push(path.clone());
        writers::export_summary(&summary, &path)?;
        progress.message(&format!("Run summary written to: {}", path.display()));
    }

    progress.message("Analysis complete");
    Ok(summary)
}

/// Entry point for the command line: stdout progress, `anyhow` context.
pub fn handle_analyze(config: &RunConfig) -> anyhow::Result<RunSummary> {
    run_analysis(config, &CliProgressSink)
        .with_context(|| format!("Analysis of {} failed", config.input.display()))
}

fn export_results(
    config: &RunConfig,
    analysis: &Analysis,
    progress: &dyn ProgressSink,
) -> Result<Vec<PathBuf>> {
    let _span = info_span!("export", dir = %config.output_dir.display()).entered();
    progress.start_stage("Exporting results");
    io::ensure_dir(&config.output_dir)?;

    let output = &config.output;
    let graph = &analysis.graph;
    let components = &analysis.components;
    let mut written = Vec::with_capacity(4);

    let path = config.output_path(&output.adjacency_matrix);
    writers::export_adjacency_matrix(graph, &path)?;
    progress.message(&format!("Adjacency matrix written to: {}", path.display()));
    written.push(path);

    let path = config.output_path(&output.components);
    writers::export_component_list(components, &path)?;
    progress.message(&format!(
        "{} components written to: {}",
        components.len(),
        path.display()
    ));
    written.push(path);

    let path = config.output_path(&output.component_matrices);
    writers::export_component_adjacency_matrices(graph, components, &path)?;
    progress.message(&format!(
        "Component adjacency matrices written to: {}",
        path.display()
    ));
    written.push(path);

    let path = config.output_path(&output.edge_list);
    writers::export_edge_list(graph, &config.interaction_type, &path)?;
    progress.message(&format!(
        "Weighted edge list ({} edges) written to: {}",
        analysis.pruned.edges,
        path.display()
    ));
    written.push(path);

    progress.complete_stage("Exporting results");
    Ok(written)
}

fn report_neighbor_stats(progress: &dyn ProgressSink, summary: &GraphSummary) {
    progress.message(&format!(
        "Neighbors per node: min {}, max {}, mean {:.2}",
        summary.neighbors.min, summary.neighbors.max, summary.neighbors.mean
    ));
}

fn report_pruning(progress: &dyn ProgressSink, report: &PruningReport, min_neighbors: usize) {
    progress.message(&format!("Nodes processed: {}", report.nodes_processed));
    progress.message(&format!("Nodes skipped: {}", report.nodes_skipped));
    progress.message(&format!("Small threshold cuts: {}", report.small_cuts));
    progress.message(&format!("Medium threshold cuts: {}", report.medium_cuts));
    progress.message(&format!("Large threshold cuts: {}", report.large_cuts));
    progress.message(&format!("Edges removed: {}", report.edges_removed));

    let below_floor = report
        .outcomes
        .iter()
        .filter(|o| o.tier == CutTier::Large && o.degree_after < min_neighbors)
        .count();
    if below_floor > 0 {
        progress.warn(&format!(
            "{} nodes were left with fewer than {} neighbors by the large threshold cut",
            below_floor, min_neighbors
        ));
    }
}
