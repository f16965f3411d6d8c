// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{manhattan_distance, Edge, Position};
use std::collections::btree_map::{BTreeMap, Entry};

/// Represents a warehouse floor (or any other set of grid positions) as a set of
/// nodes identified by their [Position] and [Edges](Edge) between them.
///
/// Edges are stored per node as outgoing connections; [Graph::connect] keeps
/// both directions in sync, which is how all graphs built by this crate are undirected.
///
/// Edge costs may be arbitrary. The graph remembers whether any edge is cheaper
/// than the [manhattan_distance] between its endpoints, see [Graph::has_shortcuts].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeMap<Position, Vec<Edge>>,
    shortcuts: bool,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a complete graph over the provided positions, where every pair of
    /// distinct positions is connected with a cost equal to their [manhattan_distance].
    pub fn complete<I: IntoIterator<Item = Position>>(positions: I) -> Self {
        let mut g = Self::default();
        let nodes: Vec<Position> = positions.into_iter().collect();
        for &node in &nodes {
            g.set_node(node);
        }
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                if a != b {
                    g.connect(a, b, manhattan_distance(a, b));
                }
            }
        }
        g
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if any edge ever added to the graph was cheaper than the
    /// [manhattan_distance] between its endpoints. Such graphs can't be searched
    /// with the manhattan heuristic.
    pub fn has_shortcuts(&self) -> bool {
        self.shortcuts
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of undirected edges, assuming every edge
    /// is stored in both directions.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns an iterator over all nodes in the graph, in [Position] order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.nodes.keys().copied()
    }

    /// Returns an iterator over all undirected edges as `(a, b, cost)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (Position, Position, u32)> + '_ {
        self.nodes.iter().flat_map(|(&from, edges)| {
            edges
                .iter()
                .filter(move |e| from < e.to)
                .map(move |e| (from, e.to, e.cost))
        })
    }

    /// Checks whether a node with the provided position exists.
    pub fn contains(&self, node: Position) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Creates a node, if it doesn't exist yet. Existing edges are preserved.
    pub fn set_node(&mut self, node: Position) {
        if let Entry::Vacant(e) = self.nodes.entry(node) {
            e.insert(Vec::default());
        }
    }

    /// Gets all outgoing [Edges](Edge) from a node.
    pub fn get_edges(&self, from: Position) -> &[Edge] {
        self.nodes
            .get(&from)
            .map(|e| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the cost of an [Edge] from one node to another, or `None` if there
    /// is no such edge.
    pub fn get_edge(&self, from: Position, to: Position) -> Option<u32> {
        self.get_edges(from)
            .iter()
            .find_map(|edge| if edge.to == to { Some(edge.cost) } else { None })
    }

    /// Creates or updates a one-way [Edge] from a node.
    ///
    /// Does nothing if `from` is not in the graph.
    pub fn set_edge(&mut self, from: Position, edge: Edge) {
        if let Some(edges) = self.nodes.get_mut(&from) {
            if edge.cost < manhattan_distance(from, edge.to) {
                self.shortcuts = true;
            }

            if let Some(candidate) = edges.iter_mut().find(|e| e.to == edge.to) {
                *candidate = edge;
            } else {
                edges.push(edge);
            }
        }
    }

    /// Creates or updates an undirected connection between two existing nodes.
    /// Connecting the same pair twice is a no-op (apart from updating the cost).
    pub fn connect(&mut self, a: Position, b: Position, cost: u32) {
        self.set_edge(a, Edge { to: b, cost });
        self.set_edge(b, Edge { to: a, cost });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_is_idempotent() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);

        let mut g = Graph::new();
        g.set_node(a);
        g.set_node(b);
        g.connect(a, b, 1);
        g.connect(b, a, 1);

        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.get_edge(a, b), Some(1));
        assert_eq!(g.get_edge(b, a), Some(1));
        assert_eq!(g.get_edges(a).len(), 1);
    }

    #[test]
    fn edges_to_unknown_nodes_are_ignored() {
        let mut g = Graph::new();
        g.set_node(Position::new(0, 0));
        g.set_edge(
            Position::new(5, 5),
            Edge {
                to: Position::new(0, 0),
                cost: 10,
            },
        );
        assert_eq!(g.len(), 1);
        assert!(g.get_edges(Position::new(5, 5)).is_empty());
    }

    #[test]
    fn cheap_edges_are_shortcuts() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 20);

        let mut g = Graph::new();
        g.set_node(a);
        g.set_node(b);
        g.connect(a, b, 20);
        assert!(!g.has_shortcuts());

        g.connect(a, b, 1);
        assert!(g.has_shortcuts());
        assert_eq!(g.get_edge(b, a), Some(1));
    }

    #[test]
    fn complete_graph() {
        let nodes = [Position::new(0, 0), Position::new(2, 1), Position::new(4, 4)];
        let g = Graph::complete(nodes);

        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 3);
        assert!(!g.has_shortcuts());
        assert_eq!(g.get_edge(nodes[0], nodes[1]), Some(3));
        assert_eq!(g.get_edge(nodes[1], nodes[2]), Some(5));
        assert_eq!(g.get_edge(nodes[2], nodes[0]), Some(8));
        assert_eq!(g.get_edge(nodes[0], nodes[0]), None);

        let edges: Vec<_> = g.edges().collect();
        assert_eq!(
            edges,
            vec![
                (nodes[0], nodes[1], 3),
                (nodes[0], nodes[2], 8),
                (nodes[1], nodes[2], 5),
            ]
        );
    }
}
