//! Cascading threshold pruning of per-node neighbourhoods.
//!
//! Each node, in header order, tries to drop its weak edges at the small
//! threshold first. If that would leave fewer than `min_neighbors` edges it
//! tries the medium threshold, and failing that applies the large threshold
//! unconditionally. The large-tier cut may therefore leave a node below the
//! floor: `min_neighbors` is honoured at the small and medium tiers only.
//!
//! Every removal is mirrored on the neighbour, so a node processed later may
//! find its degree already reduced. The floor check always uses the degree at
//! the time the node itself is processed.

use super::WeightedGraph;
use crate::errors::{GraphError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

/// Similarity cut levels plus the minimum-degree floor.
///
/// `small < medium < large`, all within `[0, 1]`. A higher threshold removes
/// more edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PruningThresholds {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
    pub min_neighbors: usize,
}

impl PruningThresholds {
    /// Create validated thresholds.
    pub fn new(small: f64, medium: f64, large: f64, min_neighbors: usize) -> Result<Self> {
        let thresholds = Self {
            small,
            medium,
            large,
            min_neighbors,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("small_threshold", self.small),
            ("medium_threshold", self.medium),
            ("large_threshold", self.large),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GraphError::invalid_parameter(
                    name,
                    format!("{} is outside [0, 1]", value),
                ));
            }
        }

        if self.small >= self.medium {
            return Err(GraphError::invalid_parameter(
                "medium_threshold",
                format!(
                    "must be greater than small_threshold ({} <= {})",
                    self.medium, self.small
                ),
            ));
        }
        if self.medium >= self.large {
            return Err(GraphError::invalid_parameter(
                "large_threshold",
                format!(
                    "must be greater than medium_threshold ({} <= {})",
                    self.large, self.medium
                ),
            ));
        }

        Ok(())
    }
}

/// Which cut was applied to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CutTier {
    /// Degree was already at or below the floor
    Skipped,
    Small,
    Medium,
    /// Fallback cut; may leave the node below the floor
    Large,
}

impl std::fmt::Display for CutTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Result of processing a single node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeOutcome {
    pub node: String,
    pub tier: CutTier,
    pub degree_before: usize,
    /// Degree right after this node's own cut
    pub degree_after: usize,
    pub edges_removed: usize,
}

/// Counters and per-node outcomes of one pruning pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PruningReport {
    pub nodes_processed: usize,
    pub nodes_skipped: usize,
    pub small_cuts: usize,
    pub medium_cuts: usize,
    pub large_cuts: usize,
    pub edges_removed: usize,
    #[serde(skip)]
    pub outcomes: Vec<NodeOutcome>,
}

impl PruningReport {
    fn record(&mut self, outcome: NodeOutcome) {
        match outcome.tier {
            CutTier::Skipped => self.nodes_skipped += 1,
            CutTier::Small => self.small_cuts += 1,
            CutTier::Medium => self.medium_cuts += 1,
            CutTier::Large => self.large_cuts += 1,
        }
        if outcome.tier != CutTier::Skipped {
            self.nodes_processed += 1;
        }
        self.edges_removed += outcome.edges_removed;
        self.outcomes.push(outcome);
    }

    /// Outcome for a given node, if it was part of the pass.
    pub fn outcome(&self, node: &str) -> Option<&NodeOutcome> {
        self.outcomes.iter().find(|o| o.node == node)
    }
}

/// Prune every node's neighbourhood in place.
///
/// Thresholds are re-validated here so the graph is never touched with
/// out-of-range parameters.
pub fn prune_neighborhoods(
    graph: &mut WeightedGraph,
    thresholds: &PruningThresholds,
) -> Result<PruningReport> {
    thresholds.validate()?;

    let _span = info_span!(
        "prune",
        small = thresholds.small,
        medium = thresholds.medium,
        large = thresholds.large,
        min_neighbors = thresholds.min_neighbors
    )
    .entered();

    let mut report = PruningReport::default();
    for i in 0..graph.node_count() {
        let outcome = prune_node(graph, i, thresholds);
        debug!(
            node = %outcome.node,
            tier = %outcome.tier,
            removed = outcome.edges_removed,
            degree = outcome.degree_after,
            "pruned node"
        );
        report.record(outcome);
    }

    info!(
        processed = report.nodes_processed,
        skipped = report.nodes_skipped,
        edges_removed = report.edges_removed,
        "pruning finished"
    );
    Ok(report)
}

fn prune_node(graph: &mut WeightedGraph, i: usize, thresholds: &PruningThresholds) -> NodeOutcome {
    let degree_before = graph.degree_at(i);
    let node = graph.id_at(i).to_string();

    if degree_before <= thresholds.min_neighbors {
        return NodeOutcome {
            node,
            tier: CutTier::Skipped,
            degree_before,
            degree_after: degree_before,
            edges_removed: 0,
        };
    }

    let edges = sorted_by_weight(graph, i);
    let (tier, kept) = select_cut(&edges, thresholds);

    for &(j, _) in &edges[kept..] {
        graph.remove_edge_at(i, j);
    }

    NodeOutcome {
        node,
        tier,
        degree_before,
        degree_after: graph.degree_at(i),
        edges_removed: edges.len() - kept,
    }
}

/// Incident edges, strongest first. The sort is stable, so equal weights
/// keep header order.
fn sorted_by_weight(graph: &WeightedGraph, i: usize) -> Vec<(usize, f64)> {
    let mut edges: Vec<(usize, f64)> = graph.neighbor_entries(i).collect();
    edges.sort_by(|a, b| b.1.total_cmp(&a.1));
    edges
}

/// Pick the first tier whose cut leaves at least `min_neighbors` edges,
/// falling back to the large tier. Returns the tier and how many of the
/// strongest edges survive.
fn select_cut(edges: &[(usize, f64)], thresholds: &PruningThresholds) -> (CutTier, usize) {
    let surviving = |threshold: f64| edges.partition_point(|&(_, w)| w >= threshold);

    [
        (CutTier::Small, thresholds.small),
        (CutTier::Medium, thresholds.medium),
    ]
    .into_iter()
    .map(|(tier, threshold)| (tier, surviving(threshold)))
    .find(|&(_, kept)| kept >= thresholds.min_neighbors)
    .unwrap_or_else(|| (CutTier::Large, surviving(thresholds.large)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::graph_from_edges;

    fn thresholds(small: f64, medium: f64, large: f64, min_neighbors: usize) -> PruningThresholds {
        PruningThresholds::new(small, medium, large, min_neighbors).unwrap()
    }

    fn four_node_graph() -> WeightedGraph {
        graph_from_edges(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", 0.9),
                ("A", "C", 0.4),
                ("A", "D", 0.2),
                ("B", "C", 0.6),
                ("B", "D", 0.3),
                ("C", "D", 0.8),
            ],
        )
    }

    #[test]
    fn test_threshold_validation() {
        assert!(PruningThresholds::new(0.3, 0.6, 0.9, 1).is_ok());
        assert!(PruningThresholds::new(0.0, 0.5, 1.0, 0).is_ok());
        assert!(PruningThresholds::new(-0.1, 0.6, 0.9, 1).is_err());
        assert!(PruningThresholds::new(0.3, 0.6, 1.1, 1).is_err());
        assert!(PruningThresholds::new(0.6, 0.6, 0.9, 1).is_err());
        assert!(PruningThresholds::new(0.3, 0.9, 0.6, 1).is_err());
        assert!(PruningThresholds::new(f64::NAN, 0.6, 0.9, 1).is_err());
    }

    #[test]
    fn test_invalid_thresholds_leave_graph_untouched() {
        let mut graph = four_node_graph();
        let bad = PruningThresholds {
            small: 0.9,
            medium: 0.6,
            large: 0.3,
            min_neighbors: 0,
        };

        let err = prune_neighborhoods(&mut graph, &bad).unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter { .. }));
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn test_four_node_small_cut() {
        let mut graph = four_node_graph();
        let report = prune_neighborhoods(&mut graph, &thresholds(0.3, 0.6, 0.9, 1)).unwrap();

        let a = report.outcome("A").unwrap();
        assert_eq!(a.tier, CutTier::Small);
        assert_eq!(a.edges_removed, 1);
        assert_eq!(a.degree_after, 2);

        assert!(!graph.has_edge("A", "D").unwrap());
        assert!(graph.has_edge("B", "D").unwrap());
        assert_eq!(graph.edge_count(), 5);

        assert_eq!(report.nodes_processed, 4);
        assert_eq!(report.nodes_skipped, 0);
        assert_eq!(report.small_cuts, 4);
        assert_eq!(report.edges_removed, 1);
        assert_eq!(graph.component_count(), 1);
        graph.validate_undirected().unwrap();
    }

    #[test]
    fn test_node_at_floor_is_skipped() {
        let mut graph = graph_from_edges(&["A", "B"], &[("A", "B", 0.1)]);
        let report = prune_neighborhoods(&mut graph, &thresholds(0.3, 0.6, 0.9, 1)).unwrap();

        assert_eq!(report.nodes_skipped, 2);
        assert_eq!(report.nodes_processed, 0);
        assert!(graph.has_edge("A", "B").unwrap());
    }

    #[test]
    fn test_large_cut_may_violate_floor() {
        let mut graph = graph_from_edges(
            &["A", "B", "C"],
            &[("A", "B", 0.1), ("A", "C", 0.2), ("B", "C", 0.3)],
        );
        let report = prune_neighborhoods(&mut graph, &thresholds(0.5, 0.6, 0.95, 1)).unwrap();

        let a = report.outcome("A").unwrap();
        assert_eq!(a.tier, CutTier::Large);
        assert_eq!(a.degree_after, 0);
        assert!(a.degree_after < 1);

        // B and C are left with one edge each, which is at the floor
        assert_eq!(report.outcome("B").unwrap().tier, CutTier::Skipped);
        assert_eq!(report.outcome("C").unwrap().tier, CutTier::Skipped);
        assert_eq!(report.large_cuts, 1);
        assert_eq!(report.nodes_skipped, 2);

        let components = graph.connected_components();
        assert_eq!(components, vec![vec!["A".to_string()], vec!["B".into(), "C".into()]]);
    }

    #[test]
    fn test_large_cut_keeps_edges_at_or_above_large_threshold() {
        let mut graph = graph_from_edges(
            &["A", "B", "C", "D"],
            &[("A", "B", 0.95), ("A", "C", 0.2), ("A", "D", 0.1)],
        );
        // A needs 2 neighbours but only one edge clears the small threshold
        let report = prune_neighborhoods(&mut graph, &thresholds(0.5, 0.7, 0.9, 2)).unwrap();

        let a = report.outcome("A").unwrap();
        assert_eq!(a.tier, CutTier::Large);
        assert_eq!(a.degree_before, 3);
        assert_eq!(a.degree_after, 1);
        assert!(graph.has_edge("A", "B").unwrap());
    }

    #[test]
    fn test_zero_floor_always_takes_small_cut() {
        let mut graph = four_node_graph();
        let report = prune_neighborhoods(&mut graph, &thresholds(0.5, 0.7, 0.85, 0)).unwrap();

        assert_eq!(report.small_cuts, 4);
        assert_eq!(report.medium_cuts + report.large_cuts, 0);
        assert!(graph.edges().all(|e| e.weight >= 0.5));
    }

    #[test]
    fn test_select_cut_tiers() {
        let edges = vec![(1, 0.9), (2, 0.6), (3, 0.4), (4, 0.1)];
        let t = thresholds(0.3, 0.5, 0.8, 2);
        assert_eq!(select_cut(&edges, &t), (CutTier::Small, 3));

        let t = thresholds(0.3, 0.5, 0.8, 4);
        assert_eq!(select_cut(&edges, &t), (CutTier::Large, 1));
    }

    #[test]
    fn test_sorted_by_weight_ties_keep_header_order() {
        let graph = graph_from_edges(
            &["A", "B", "C", "D"],
            &[("A", "B", 0.5), ("A", "C", 0.9), ("A", "D", 0.5)],
        );
        let sorted = sorted_by_weight(&graph, 0);
        assert_eq!(sorted, vec![(2, 0.9), (1, 0.5), (3, 0.5)]);
    }

    #[test]
    fn test_pruning_is_deterministic() {
        let t = thresholds(0.35, 0.5, 0.85, 2);
        let mut first = four_node_graph();
        let mut second = four_node_graph();

        let r1 = prune_neighborhoods(&mut first, &t).unwrap();
        let r2 = prune_neighborhoods(&mut second, &t).unwrap();

        assert_eq!(r1, r2);
        assert_eq!(
            first.edges().collect::<Vec<_>>(),
            second.edges().collect::<Vec<_>>()
        );
    }
}
