//! Weighted edge list importable as a network table
//! (`SourceNode`, `TargetNode`, `InteractionType`, `Weight`).

use crate::errors::Result;
use crate::graph::WeightedGraph;
use crate::io::write_failed;
use std::io::Write;

pub const EDGE_LIST_HEADER: &str = "SourceNode\tTargetNode\tInteractionType\tWeight";

/// Each undirected edge once, with `source < target` by identifier.
pub fn write_edge_list<W: Write>(
    graph: &WeightedGraph,
    interaction_type: &str,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", EDGE_LIST_HEADER).map_err(write_failed)?;
    graph.edges().try_for_each(|edge| {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            edge.source, edge.target, interaction_type, edge.weight
        )
        .map_err(write_failed)
    })
}
