//! Connected components of the current graph state.

use super::WeightedGraph;

impl WeightedGraph {
    /// Partition the nodes into connected components.
    ///
    /// Start nodes are taken in header order and each component lists its
    /// nodes in depth-first visitation order, expanding neighbours in header
    /// order. Isolated nodes form singleton components.
    pub fn connected_components(&self) -> Vec<Vec<String>> {
        self.component_indices()
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|i| self.id_at(i).to_string())
                    .collect()
            })
            .collect()
    }

    pub fn component_count(&self) -> usize {
        self.component_indices().len()
    }

    /// Component sizes, in component order
    pub fn component_sizes(&self) -> Vec<usize> {
        self.component_indices().iter().map(Vec::len).collect()
    }

    pub(crate) fn component_indices(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.node_count()];
        let mut components = Vec::new();

        for start in 0..self.node_count() {
            if !visited[start] {
                components.push(self.collect_component(start, &mut visited));
            }
        }

        components
    }

    /// Iterative pre-order DFS. Neighbours are pushed in reverse so they are
    /// popped in header order, matching a recursive traversal.
    fn collect_component(&self, start: usize, visited: &mut [bool]) -> Vec<usize> {
        let mut component = Vec::new();
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            component.push(node);

            stack.extend(
                self.neighbor_entries(node)
                    .rev()
                    .map(|(j, _)| j)
                    .filter(|&j| !visited[j]),
            );
        }

        component
    }
}
