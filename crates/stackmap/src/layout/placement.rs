//! Deterministic placement of nodes without explicit positions.

use std::collections::HashMap;

use log::debug;
use petgraph::{algo::toposort, graph::DiGraph};

use stackmap_core::semantic::{Edge, Node};

/// Placement strategy for nodes that carry no explicit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// One column per layer, items stacked downwards within a layer.
    ///
    /// A node's layer is its explicit `layer` or its depth in the edge
    /// graph (longest path from a root).
    Layered,
    /// Row-major grid.
    Grid { columns: usize },
}

/// Layer index of every node, in input order.
///
/// Cyclic graphs have no meaningful depth, so every node without an
/// explicit layer lands in layer 0. Self-loops are ignored.
pub(super) fn assign_layers(nodes: &[&Node], edges: &[Edge]) -> Vec<usize> {
    let index: HashMap<_, _> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id(), idx))
        .collect();

    let mut graph = DiGraph::<usize, ()>::with_capacity(nodes.len(), edges.len());
    let node_indices: Vec<_> = (0..nodes.len()).map(|idx| graph.add_node(idx)).collect();

    for edge in edges {
        let endpoints = (index.get(&edge.source()), index.get(&edge.target()));
        if let (Some(&source), Some(&target)) = endpoints {
            if source != target {
                graph.add_edge(node_indices[source], node_indices[target], ());
            }
        }
    }

    let mut depths = vec![0; nodes.len()];
    match toposort(&graph, None) {
        Ok(order) => {
            for node_idx in order {
                let depth = depths[graph[node_idx]];
                for next in graph.neighbors(node_idx) {
                    let slot = &mut depths[graph[next]];
                    *slot = (*slot).max(depth + 1);
                }
            }
        }
        Err(cycle) => {
            debug!(
                node = nodes[graph[cycle.node_id()]].id().as_string();
                "Edge graph is cyclic, placing all nodes in one layer"
            );
        }
    }

    nodes
        .iter()
        .zip(depths)
        .map(|(node, depth)| node.layer().unwrap_or(depth))
        .collect()
}

/// `(column, row)` of the `index`-th grid slot.
pub(super) fn grid_slot(index: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (index % columns, index / columns)
}

#[cfg(test)]
mod tests {
    use stackmap_core::semantic::Category;

    use super::*;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter()
            .map(|id| Node::new(id, id.to_string(), Category::Service))
            .collect()
    }

    #[test]
    fn test_longest_path_depth() {
        let nodes = nodes(&["a", "b", "c", "d"]);
        let refs: Vec<&Node> = nodes.iter().collect();
        // a -> b -> c and a -> c: c sits on the longest path
        let edges = vec![Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("a", "c")];

        assert_eq!(assign_layers(&refs, &edges), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_self_loop_and_unknown_endpoints_are_ignored() {
        let nodes = nodes(&["a", "b"]);
        let refs: Vec<&Node> = nodes.iter().collect();
        let edges = vec![
            Edge::new("a", "a"),
            Edge::new("a", "b"),
            Edge::new("b", "ghost"),
        ];

        assert_eq!(assign_layers(&refs, &edges), vec![0, 1]);
    }

    #[test]
    fn test_cycle_falls_back_to_layer_zero_but_keeps_explicit_layers() {
        let mut nodes = nodes(&["a", "b"]);
        nodes.push(Node::new("c", "c", Category::Service).with_layer(2));
        let refs: Vec<&Node> = nodes.iter().collect();
        let edges = vec![Edge::new("a", "b"), Edge::new("b", "a")];

        assert_eq!(assign_layers(&refs, &edges), vec![0, 0, 2]);
    }

    #[test]
    fn test_grid_slot() {
        assert_eq!(grid_slot(0, 3), (0, 0));
        assert_eq!(grid_slot(4, 3), (1, 1));
        assert_eq!(grid_slot(2, 0), (0, 2));
    }
}
