// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, BTreeSet};

use crate::{Graph, Position};

/// An undirected, weighted edge `(a, b, cost)`.
pub(super) type WeightedEdge = (Position, Position, u32);

/// Computes a minimum spanning tree of the connected component of `root` with
/// [Prim's algorithm](https://en.wikipedia.org/wiki/Prim%27s_algorithm).
///
/// The frontier is scanned linearly on every step, which is O(n²) on a complete graph.
/// Ties are resolved towards the smaller [Position].
pub(super) fn minimum_spanning_tree(g: &Graph, root: Position) -> Vec<WeightedEdge> {
    let mut in_tree: BTreeSet<Position> = BTreeSet::from([root]);
    let mut tree: Vec<WeightedEdge> = Vec::with_capacity(g.len().saturating_sub(1));

    // Cheapest known connection from the tree to every node outside of it: node → (cost, parent)
    let mut frontier: BTreeMap<Position, (u32, Position)> = g
        .get_edges(root)
        .iter()
        .filter(|e| e.to != root)
        .map(|e| (e.to, (e.cost, root)))
        .collect();

    loop {
        let Some((node, cost, parent)) = frontier
            .iter()
            .map(|(&node, &(cost, parent))| (node, cost, parent))
            .min_by_key(|&(node, cost, _)| (cost, node))
        else {
            break;
        };

        frontier.remove(&node);
        in_tree.insert(node);
        tree.push((parent, node, cost));

        for e in g.get_edges(node) {
            if in_tree.contains(&e.to) {
                continue;
            }
            match frontier.get(&e.to) {
                Some(&(known, _)) if known <= e.cost => {}
                _ => {
                    frontier.insert(e.to, (e.cost, node));
                }
            }
        }
    }

    tree
}

/// Returns the nodes of `g` with an odd number of incident `edges`, in [Position] order.
pub(super) fn odd_degree_nodes(g: &Graph, edges: &[WeightedEdge]) -> Vec<Position> {
    let mut degrees: BTreeMap<Position, usize> = g.iter().map(|n| (n, 0)).collect();
    for &(a, b, _) in edges {
        *degrees.entry(a).or_default() += 1;
        *degrees.entry(b).or_default() += 1;
    }
    degrees
        .into_iter()
        .filter(|&(_, degree)| degree % 2 == 1)
        .map(|(node, _)| node)
        .collect()
}
