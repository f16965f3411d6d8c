// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use crate::{manhattan_distance, Edge, Graph, PathError, Position};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: Position,
    cost: u32,
    score: u32,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.at == other.at
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        // Equal scores are resolved by position, so that results are reproducible.
        (other.score, other.at).cmp(&(self.score, self.at))
    }
}

fn reconstruct_path(came_from: &HashMap<Position, Position>, mut last: Position) -> Vec<Position> {
    let mut path = vec![last];

    while let Some(&nd) = came_from.get(&last) {
        path.push(nd);
        last = nd;
    }

    path.reverse();
    path
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// with the [manhattan_distance] heuristic to find the cheapest path between
/// two nodes of the provided graph.
///
/// The heuristic is only used if no edge is cheaper than the distance between
/// its endpoints (see [Graph::has_shortcuts]); otherwise the search degrades to
/// [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm).
///
/// The returned path starts with `from` and ends with `to`; consecutive
/// positions are always connected by an edge. A path from a node to itself
/// consists of that single node.
///
/// `step_limit` limits how many nodes may be expanded during the search
/// before returning [PathError::StepLimitExceeded]. The recommended value is
/// [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_path(
    g: &Graph,
    from: Position,
    to: Position,
    step_limit: usize,
) -> Result<Vec<Position>, PathError> {
    if !g.contains(from) {
        return Err(PathError::InvalidReference(from));
    }
    if !g.contains(to) {
        return Err(PathError::InvalidReference(to));
    }

    let heuristic = |at: Position| {
        if g.has_shortcuts() {
            0
        } else {
            manhattan_distance(at, to)
        }
    };

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<Position, Position> = HashMap::default();
    let mut known_costs: HashMap<Position, u32> = HashMap::default();
    let mut steps: usize = 0;

    queue.push(QueueItem {
        at: from,
        cost: 0,
        score: heuristic(from),
    });
    known_costs.insert(from, 0);

    while let Some(item) = queue.pop() {
        if item.at == to {
            let path = reconstruct_path(&came_from, to);
            log::trace!(
                "path {} -> {}: cost {}, {} steps",
                from,
                to,
                item.cost,
                steps
            );
            return Ok(path);
        }

        // Multiple items for the same node may be kept in the queue - skip outdated ones.
        if item.cost > known_costs.get(&item.at).copied().unwrap_or(u32::MAX) {
            continue;
        }

        steps += 1;
        if steps > step_limit {
            return Err(PathError::StepLimitExceeded);
        }

        for &Edge {
            to: neighbor,
            cost: edge_cost,
        } in g.get_edges(item.at)
        {
            // Edges to unknown nodes are ignored
            if !g.contains(neighbor) {
                continue;
            }

            // Check if this is the cheapest way to the neighbor
            let neighbor_cost = item.cost.saturating_add(edge_cost);
            if neighbor_cost >= known_costs.get(&neighbor).copied().unwrap_or(u32::MAX) {
                continue;
            }

            came_from.insert(neighbor, item.at);
            known_costs.insert(neighbor, neighbor_cost);
            queue.push(QueueItem {
                at: neighbor,
                cost: neighbor_cost,
                score: neighbor_cost.saturating_add(heuristic(neighbor)),
            });
        }
    }

    Err(PathError::NoPath { from, to })
}
