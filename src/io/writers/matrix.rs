//! Binary adjacency matrices: `-` on the diagonal, `1` where an edge is
//! stored, `0` elsewhere. The header row starts with an empty corner cell.

use crate::errors::Result;
use crate::graph::WeightedGraph;
use crate::io::write_failed;
use std::io::{self, Write};

pub fn write_adjacency_matrix<W: Write>(graph: &WeightedGraph, out: &mut W) -> Result<()> {
    let nodes: Vec<usize> = (0..graph.node_count()).collect();
    write_matrix_block(graph, &nodes, out).map_err(write_failed)
}

/// One labelled matrix per component, restricted to that component's nodes.
pub fn write_component_adjacency_matrices<W: Write>(
    graph: &WeightedGraph,
    components: &[Vec<String>],
    out: &mut W,
) -> Result<()> {
    for (k, component) in components.iter().enumerate() {
        let nodes = component
            .iter()
            .map(|id| graph.index_of(id))
            .collect::<Result<Vec<_>>>()?;

        writeln!(
            out,
            "Component {} Adjacency Matrix (Nodes: {}):",
            k + 1,
            nodes.len()
        )
        .and_then(|()| write_matrix_block(graph, &nodes, out))
        .and_then(|()| writeln!(out))
        .map_err(write_failed)?;
    }
    Ok(())
}

fn write_matrix_block<W: Write>(graph: &WeightedGraph, nodes: &[usize], out: &mut W) -> io::Result<()> {
    for &col in nodes {
        write!(out, "\t{}", graph.id_at(col))?;
    }
    writeln!(out)?;

    for &row in nodes {
        write!(out, "{}", graph.id_at(row))?;
        for &col in nodes {
            let cell = if row == col {
                "-"
            } else if graph.has_edge_at(row, col) {
                "1"
            } else {
                "0"
            };
            write!(out, "\t{}", cell)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphError;
    use crate::graph::tests::graph_from_edges;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_full_adjacency_matrix() {
        let mut graph = graph_from_edges(&["A", "B", "C"], &[]);
        graph.remove_edge("A", "C").unwrap();

        let text = render(|out| write_adjacency_matrix(&graph, out));
        assert_eq!(
            text,
            "\tA\tB\tC\n\
             A\t-\t1\t0\n\
             B\t1\t-\t1\n\
             C\t0\t1\t-\n"
        );
    }

    #[test]
    fn test_component_matrices_are_scoped() {
        let mut graph = graph_from_edges(&["A", "B", "C"], &[]);
        graph.remove_edge("A", "C").unwrap();
        graph.remove_edge("B", "C").unwrap();
        let components = graph.connected_components();

        let text = render(|out| write_component_adjacency_matrices(&graph, &components, out));
        let expected = indoc! {"
            Component 1 Adjacency Matrix (Nodes: 2):
            \tA\tB
            A\t-\t1
            B\t1\t-

            Component 2 Adjacency Matrix (Nodes: 1):
            \tC
            C\t-

        "};
        assert_eq!(text, expected);
    }

    #[test]
    fn test_component_matrix_rejects_unknown_node() {
        let graph = graph_from_edges(&["A", "B"], &[]);
        let components = vec![vec!["A".to_string(), "Z".to_string()]];

        let mut buf = Vec::new();
        let err = write_component_adjacency_matrices(&graph, &components, &mut buf).unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode { .. }));
    }
}
