// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;

use super::mst::WeightedEdge;
use super::TourError;
use crate::{Graph, Position};

/// Largest number of nodes [exact_matching] accepts. The dynamic program
/// keeps a table with 2ⁿ entries.
pub const EXACT_MATCHING_LIMIT: usize = 20;

/// Pairs up `nodes` by repeatedly taking the smallest unmatched node and
/// matching it with its cheapest unmatched partner.
///
/// This is not guaranteed to produce a minimum-weight perfect matching.
pub(super) fn greedy_matching(
    g: &Graph,
    nodes: &[Position],
) -> Result<Vec<WeightedEdge>, TourError> {
    let mut pool: BTreeSet<Position> = nodes.iter().copied().collect();
    let mut matching: Vec<WeightedEdge> = Vec::with_capacity(pool.len() / 2);

    while let Some(v) = pool.pop_first() {
        if pool.is_empty() {
            return Err(TourError::InvariantViolation(format!(
                "odd number of nodes in the matching pool, {} left unmatched",
                v
            )));
        }

        let (u, cost) = pool
            .iter()
            .filter_map(|&u| g.get_edge(v, u).map(|cost| (u, cost)))
            .min_by_key(|&(u, cost)| (cost, u))
            .ok_or_else(|| {
                TourError::InvariantViolation(format!("{} has no edge to any unmatched node", v))
            })?;

        pool.remove(&u);
        matching.push((v, u, cost));
    }

    Ok(matching)
}

/// Computes a minimum-weight perfect matching of `nodes` with a dynamic program
/// over subsets: the cheapest matching of a subset pairs its lowest node with some
/// other member, plus the cheapest matching of what remains.
///
/// `nodes` may have at most [EXACT_MATCHING_LIMIT] elements.
pub(super) fn exact_matching(
    g: &Graph,
    nodes: &[Position],
) -> Result<Vec<WeightedEdge>, TourError> {
    let n = nodes.len();
    if n % 2 != 0 {
        return Err(TourError::InvariantViolation(format!(
            "odd number of nodes ({}) in the matching pool",
            n
        )));
    }
    if n > EXACT_MATCHING_LIMIT {
        return Err(TourError::InvariantViolation(format!(
            "{} nodes exceed the exact matching limit of {}",
            n, EXACT_MATCHING_LIMIT
        )));
    }

    let full: usize = (1 << n) - 1;
    let mut best: Vec<u32> = vec![u32::MAX; 1 << n];
    let mut partner: Vec<u8> = vec![0; 1 << n];
    best[0] = 0;

    for mask in 1..=full {
        if mask.count_ones() % 2 != 0 {
            continue;
        }

        let i = mask.trailing_zeros() as usize;
        let rest = mask & !(1 << i);

        for j in (i + 1)..n {
            if rest & (1 << j) == 0 {
                continue;
            }

            let remainder = best[rest & !(1 << j)];
            let Some(cost) = g.get_edge(nodes[i], nodes[j]) else {
                continue;
            };
            if remainder == u32::MAX {
                continue;
            }

            let candidate = remainder.saturating_add(cost);
            if candidate < best[mask] {
                best[mask] = candidate;
                partner[mask] = j as u8;
            }
        }
    }

    if best[full] == u32::MAX {
        return Err(TourError::InvariantViolation(
            "no perfect matching exists between the odd-degree nodes".to_string(),
        ));
    }

    let mut matching: Vec<WeightedEdge> = Vec::with_capacity(n / 2);
    let mut mask = full;
    while mask != 0 {
        let i = mask.trailing_zeros() as usize;
        let j = partner[mask] as usize;
        let (a, b) = (nodes[i], nodes[j]);
        matching.push((a, b, g.get_edge(a, b).unwrap_or_default()));
        mask &= !((1 << i) | (1 << j));
    }

    Ok(matching)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(edges: &[WeightedEdge]) -> u32 {
        edges.iter().map(|&(_, _, cost)| cost).sum()
    }

    fn assert_perfect(nodes: &[Position], matching: &[WeightedEdge]) {
        let mut covered: Vec<Position> = matching.iter().flat_map(|&(a, b, _)| [a, b]).collect();
        covered.sort();
        let mut expected = nodes.to_vec();
        expected.sort();
        assert_eq!(covered, expected);
    }

    /// Taking (0,5) first makes greedy pair it with (0,6),
    /// which leaves the two distant nodes together.
    fn greedy_trap() -> (Graph, Vec<Position>) {
        let nodes = vec![
            Position::new(0, 5),
            Position::new(0, 6),
            Position::new(0, 9),
            Position::new(3, 5),
        ];
        (Graph::complete(nodes.iter().copied()), nodes)
    }

    #[test]
    fn greedy() {
        let (g, nodes) = greedy_trap();
        let matching = greedy_matching(&g, &nodes).unwrap();
        assert_perfect(&nodes, &matching);
        assert_eq!(
            matching,
            vec![
                (Position::new(0, 5), Position::new(0, 6), 1),
                (Position::new(0, 9), Position::new(3, 5), 7),
            ]
        );
    }

    #[test]
    fn exact_beats_greedy() {
        let (g, nodes) = greedy_trap();
        let greedy = greedy_matching(&g, &nodes).unwrap();
        let exact = exact_matching(&g, &nodes).unwrap();
        assert_perfect(&nodes, &exact);
        assert_eq!(total(&greedy), 8);
        assert_eq!(total(&exact), 6);
    }

    #[test]
    fn exact_never_worse() {
        let nodes: Vec<Position> = (0..10)
            .map(|i| Position::new((i * 7) % 11, (i * 5) % 13))
            .collect();
        let g = Graph::complete(nodes.iter().copied());

        let greedy = greedy_matching(&g, &nodes).unwrap();
        let exact = exact_matching(&g, &nodes).unwrap();
        assert_perfect(&nodes, &greedy);
        assert_perfect(&nodes, &exact);
        assert!(total(&exact) <= total(&greedy));
    }

    #[test]
    fn odd_pool() {
        let nodes = [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)];
        let g = Graph::complete(nodes);
        assert!(matches!(
            greedy_matching(&g, &nodes),
            Err(TourError::InvariantViolation(_))
        ));
        assert!(matches!(
            exact_matching(&g, &nodes),
            Err(TourError::InvariantViolation(_))
        ));
    }

    #[test]
    fn empty_pool() {
        let g = Graph::new();
        assert_eq!(greedy_matching(&g, &[]), Ok(vec![]));
        assert_eq!(exact_matching(&g, &[]), Ok(vec![]));
    }
}
