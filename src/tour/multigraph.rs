// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};

use crate::Position;

/// Undirected multigraph, storing the multiplicity of every edge.
///
/// Used for the union of a spanning tree and a matching, where the same pair
/// of nodes may be connected twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct MultiGraph(BTreeMap<Position, BTreeMap<Position, usize>>);

impl MultiGraph {
    pub(super) fn new<I: IntoIterator<Item = Position>>(nodes: I) -> Self {
        Self(
            nodes
                .into_iter()
                .map(|n| (n, BTreeMap::default()))
                .collect(),
        )
    }

    pub(super) fn len(&self) -> usize {
        self.0.len()
    }

    pub(super) fn add_edge(&mut self, a: Position, b: Position) {
        debug_assert_ne!(a, b);
        *self.0.entry(a).or_default().entry(b).or_default() += 1;
        *self.0.entry(b).or_default().entry(a).or_default() += 1;
    }

    /// Removes one copy of the edge between `a` and `b`, if there is any.
    pub(super) fn remove_edge(&mut self, a: Position, b: Position) {
        Self::decrement(&mut self.0, a, b);
        Self::decrement(&mut self.0, b, a);
    }

    fn decrement(
        adj: &mut BTreeMap<Position, BTreeMap<Position, usize>>,
        a: Position,
        b: Position,
    ) {
        if let Some(neighbors) = adj.get_mut(&a) {
            if let Entry::Occupied(mut e) = neighbors.entry(b) {
                *e.get_mut() -= 1;
                if *e.get() == 0 {
                    e.remove();
                }
            }
        }
    }

    pub(super) fn has_edge(&self, a: Position, b: Position) -> bool {
        self.0.get(&a).is_some_and(|n| n.contains_key(&b))
    }

    /// Returns the distinct neighbors of a node, in [Position] order.
    pub(super) fn neighbors(&self, node: Position) -> impl Iterator<Item = Position> + '_ {
        self.0
            .get(&node)
            .into_iter()
            .flat_map(|n| n.keys().copied())
    }

    /// Counts edges incident to a node, including repeated ones.
    pub(super) fn degree(&self, node: Position) -> usize {
        self.0.get(&node).map_or(0, |n| n.values().sum())
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.0.keys().copied()
    }
}
