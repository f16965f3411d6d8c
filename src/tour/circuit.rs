// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use super::multigraph::MultiGraph;
use super::TourError;
use crate::Position;

/// Reasons why [hamiltonian_circuit] didn't produce a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NoCircuit {
    /// Every candidate extension was tried.
    Exhausted,

    /// More than the allowed number of extensions were tried.
    StepLimitExceeded,
}

/// Searches for a circuit starting and ending at `start`, which visits every
/// node of the graph exactly once, using only edges of the graph.
///
/// This is a depth-first search with backtracking, driven by an explicit stack of
/// remaining candidates per path node. Candidates are tried in [Position] order.
/// Every path extension counts as a step; the search gives up after `step_limit` steps.
pub(super) fn hamiltonian_circuit(
    g: &MultiGraph,
    start: Position,
    step_limit: usize,
) -> Result<Vec<Position>, NoCircuit> {
    let n = g.len();
    if n <= 1 {
        return Ok(vec![start, start]);
    }

    let mut path: Vec<Position> = vec![start];
    let mut visited: HashSet<Position> = HashSet::from([start]);
    let mut candidates: Vec<Vec<Position>> = vec![reversed_neighbors(g, start)];
    let mut steps: usize = 0;

    while let Some(frontier) = candidates.last_mut() {
        let next = if path.len() == n {
            // All nodes visited - the circuit is complete if it can return to the start
            if path.last().is_some_and(|&last| g.has_edge(last, start)) {
                path.push(start);
                return Ok(path);
            }
            None
        } else {
            frontier.pop()
        };

        match next {
            Some(node) if visited.contains(&node) => {}

            Some(node) => {
                steps += 1;
                if steps > step_limit {
                    return Err(NoCircuit::StepLimitExceeded);
                }

                visited.insert(node);
                path.push(node);
                candidates.push(reversed_neighbors(g, node));
            }

            None => {
                // Dead end - backtrack
                candidates.pop();
                if let Some(node) = path.pop() {
                    visited.remove(&node);
                }
            }
        }
    }

    Err(NoCircuit::Exhausted)
}

/// Neighbors of a node in descending order, so that popping yields them ascending.
fn reversed_neighbors(g: &MultiGraph, node: Position) -> Vec<Position> {
    let mut neighbors: Vec<Position> = g.neighbors(node).collect();
    neighbors.reverse();
    neighbors
}

/// Builds a circuit by finding an [Eulerian circuit](https://en.wikipedia.org/wiki/Eulerian_path)
/// with Hierholzer's algorithm and skipping nodes which were already visited.
///
/// Requires every node to have an even degree and all nodes to be connected;
/// both hold for a spanning tree extended by a perfect matching of its odd-degree nodes.
pub(super) fn shortcut_euler_circuit(
    g: &MultiGraph,
    start: Position,
) -> Result<Vec<Position>, TourError> {
    if let Some(odd) = g.iter().find(|&node| g.degree(node) % 2 != 0) {
        return Err(TourError::InvariantViolation(format!(
            "{} has an odd degree, no Eulerian circuit exists",
            odd
        )));
    }

    let mut remaining = g.clone();
    let mut stack: Vec<Position> = vec![start];
    let mut euler: Vec<Position> = Vec::default();

    while let Some(&node) = stack.last() {
        let next = remaining.neighbors(node).next();
        match next {
            Some(next) => {
                remaining.remove_edge(node, next);
                stack.push(next);
            }
            None => {
                euler.push(node);
                stack.pop();
            }
        }
    }
    euler.reverse();

    let mut seen: HashSet<Position> = HashSet::default();
    let mut circuit: Vec<Position> = euler.into_iter().filter(|&n| seen.insert(n)).collect();
    circuit.push(start);

    if circuit.len() != g.len() + 1 {
        return Err(TourError::InvariantViolation(format!(
            "Eulerian circuit covers {} of {} nodes",
            circuit.len() - 1,
            g.len()
        )));
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A star centered at (2, 2) with leaves paired up by extra edges:
    /// two triangles sharing the center. Every node has an even degree,
    /// but there is no Hamiltonian circuit.
    fn bowtie() -> (MultiGraph, Position) {
        let center = Position::new(2, 2);
        let up = Position::new(0, 2);
        let left = Position::new(2, 0);
        let right = Position::new(2, 4);
        let down = Position::new(4, 2);

        let mut g = MultiGraph::new([center, up, left, right, down]);
        for leaf in [up, left, right, down] {
            g.add_edge(center, leaf);
        }
        g.add_edge(up, left);
        g.add_edge(right, down);
        (g, center)
    }

    fn square() -> (MultiGraph, Vec<Position>) {
        let nodes = vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(1, 0),
        ];
        let mut g = MultiGraph::new(nodes.iter().copied());
        for i in 0..nodes.len() {
            g.add_edge(nodes[i], nodes[(i + 1) % nodes.len()]);
        }
        (g, nodes)
    }

    #[test]
    fn backtracking_on_cycle() {
        let (g, nodes) = square();
        let circuit = hamiltonian_circuit(&g, nodes[0], 100).unwrap();
        assert_eq!(
            circuit,
            vec![nodes[0], nodes[1], nodes[2], nodes[3], nodes[0]]
        );
    }

    #[test]
    fn backtracking_on_double_edge() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 0);
        let mut g = MultiGraph::new([a, b]);
        g.add_edge(a, b);
        g.add_edge(a, b);
        assert_eq!(hamiltonian_circuit(&g, a, 100), Ok(vec![a, b, a]));
    }

    #[test]
    fn backtracking_exhausts_on_bowtie() {
        let (g, center) = bowtie();
        assert_eq!(
            hamiltonian_circuit(&g, center, 1000),
            Err(NoCircuit::Exhausted)
        );
    }

    #[test]
    fn backtracking_step_limit() {
        let (g, center) = bowtie();
        assert_eq!(
            hamiltonian_circuit(&g, center, 2),
            Err(NoCircuit::StepLimitExceeded)
        );
    }

    #[test]
    fn shortcut_on_bowtie() {
        let (g, center) = bowtie();
        let circuit = shortcut_euler_circuit(&g, center).unwrap();
        assert_eq!(
            circuit,
            vec![
                center,
                Position::new(0, 2),
                Position::new(2, 0),
                Position::new(2, 4),
                Position::new(4, 2),
                center,
            ]
        );
    }

    #[test]
    fn shortcut_consumes_repeated_edges() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 0);
        let mut g = MultiGraph::new([a, b]);
        g.add_edge(a, b);
        g.add_edge(a, b);
        assert_eq!(shortcut_euler_circuit(&g, a).unwrap(), vec![a, b, a]);
        assert_eq!(g.degree(a), 2);
    }

    #[test]
    fn shortcut_rejects_odd_degrees() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        let mut g = MultiGraph::new([a, b]);
        g.add_edge(a, b);
        assert!(matches!(
            shortcut_euler_circuit(&g, a),
            Err(TourError::InvariantViolation(_))
        ));
    }
}
