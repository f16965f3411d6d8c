// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Approximate shortest round trips over a set of stops.
//!
//! Tours are planned with a variant of the
//! [Christofides algorithm](https://en.wikipedia.org/wiki/Christofides_algorithm)
//! on [manhattan distances](crate::manhattan_distance) between the stops.
//! Obstacles are not taken into account when ordering the stops; walkable paths
//! between consecutive stops are computed afterwards by [assemble](crate::assemble).

mod circuit;
mod error;
mod matching;
mod mst;
mod multigraph;

use std::collections::HashSet;

use crate::{manhattan_distance, Graph, Position};

use circuit::{hamiltonian_circuit, shortcut_euler_circuit, NoCircuit};
use matching::{exact_matching, greedy_matching};
use mst::{minimum_spanning_tree, odd_degree_nodes};
use multigraph::MultiGraph;

pub use error::{InvalidInput, TourError};
pub use matching::EXACT_MATCHING_LIMIT;

/// Recommended number of allowed path extensions during the backtracking circuit search.
pub const DEFAULT_TOUR_STEP_LIMIT: usize = 1_000_000;

/// How odd-degree nodes of the spanning tree are paired up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Matching {
    /// Repeatedly pair the smallest unmatched node with its nearest unmatched partner.
    /// Fast, but may exceed the minimum-weight matching.
    #[default]
    Greedy,

    /// Minimum-weight perfect matching. Falls back to [Matching::Greedy]
    /// for more than [EXACT_MATCHING_LIMIT] odd-degree nodes.
    Exact,
}

/// How the tree-plus-matching multigraph is turned into a circuit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CircuitSearch {
    /// Backtracking search for a Hamiltonian circuit using only multigraph edges.
    /// May fail with [TourError::NoTour] even though the stops can always be visited.
    #[default]
    Backtracking,

    /// Eulerian circuit of the multigraph with repeated nodes skipped.
    /// Always succeeds.
    EulerShortcut,

    /// [CircuitSearch::Backtracking], falling back to [CircuitSearch::EulerShortcut]
    /// if no circuit is found.
    BacktrackingThenShortcut,
}

/// Additional controls for [approximate_tour].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub matching: Matching,
    pub circuit: CircuitSearch,

    /// Max number of path extensions in the backtracking circuit search,
    /// see [DEFAULT_TOUR_STEP_LIMIT].
    pub step_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            matching: Matching::default(),
            circuit: CircuitSearch::default(),
            step_limit: DEFAULT_TOUR_STEP_LIMIT,
        }
    }
}

/// Plans a round trip from `start` through every stop and back to `start`.
///
/// The returned tour begins and ends with `start` and contains every stop exactly once.
/// With no stops, the tour is `[start, start]`.
///
/// `start` and all `stops` must be nodes of `g`, and stops must be distinct from each other
/// and from the start; violations are reported as [TourError::InvalidInput].
/// On metric inputs the tour is at most 3/2 times longer than the optimum, provided that
/// the matching is minimal ([Matching::Exact]).
pub fn approximate_tour(
    g: &Graph,
    start: Position,
    stops: &[Position],
    options: &Options,
) -> Result<Vec<Position>, TourError> {
    validate(g, start, stops)?;
    if stops.is_empty() {
        return Ok(vec![start, start]);
    }

    // 1. Complete graph on the start and all stops
    let complete = Graph::complete(std::iter::once(start).chain(stops.iter().copied()));

    // 2. Minimum spanning tree
    let tree = minimum_spanning_tree(&complete, start);
    if tree.len() + 1 != complete.len() {
        return Err(TourError::InvariantViolation(format!(
            "spanning tree has {} edges for {} nodes",
            tree.len(),
            complete.len()
        )));
    }

    // 3. Nodes with an odd degree in the tree
    let odd = odd_degree_nodes(&complete, &tree);
    if odd.len() % 2 != 0 {
        return Err(TourError::InvariantViolation(format!(
            "spanning tree has an odd number ({}) of odd-degree nodes",
            odd.len()
        )));
    }

    // 4. Pair up the odd nodes
    let matching = match options.matching {
        Matching::Greedy => greedy_matching(&complete, &odd)?,
        Matching::Exact if odd.len() > EXACT_MATCHING_LIMIT => {
            log::warn!(
                "{} odd-degree nodes exceed the exact matching limit of {}, using greedy matching",
                odd.len(),
                EXACT_MATCHING_LIMIT
            );
            greedy_matching(&complete, &odd)?
        }
        Matching::Exact => exact_matching(&complete, &odd)?,
    };

    // 5. Combine the tree and the matching into a multigraph with even degrees only
    let mut multigraph = MultiGraph::new(complete.iter());
    tree.iter()
        .chain(matching.iter())
        .for_each(|&(a, b, _)| multigraph.add_edge(a, b));

    // 6. Turn the multigraph into a circuit
    let tour = match options.circuit {
        CircuitSearch::Backtracking => backtrack(&multigraph, start, options.step_limit)?,
        CircuitSearch::EulerShortcut => shortcut_euler_circuit(&multigraph, start)?,
        CircuitSearch::BacktrackingThenShortcut => {
            match backtrack(&multigraph, start, options.step_limit) {
                Err(TourError::NoTour { .. }) => {
                    log::info!(
                        "no Hamiltonian circuit over the multigraph, shortcutting an Eulerian circuit"
                    );
                    shortcut_euler_circuit(&multigraph, start)?
                }
                result => result?,
            }
        }
    };

    log::debug!(
        "tour over {} stops: tree cost {}, matching cost {}, tour cost {}",
        stops.len(),
        tree.iter().map(|&(_, _, c)| c).sum::<u32>(),
        matching.iter().map(|&(_, _, c)| c).sum::<u32>(),
        tour_cost(&tour),
    );

    Ok(tour)
}

/// Returns the total [manhattan_distance] between consecutive positions of a tour.
pub fn tour_cost(tour: &[Position]) -> u32 {
    tour.windows(2)
        .map(|pair| manhattan_distance(pair[0], pair[1]))
        .sum()
}

fn validate(g: &Graph, start: Position, stops: &[Position]) -> Result<(), InvalidInput> {
    if !g.contains(start) {
        return Err(InvalidInput::UnknownStart(start));
    }

    let mut seen: HashSet<Position> = HashSet::with_capacity(stops.len());
    for &stop in stops {
        if stop == start {
            return Err(InvalidInput::StopAtStart(stop));
        }
        if !g.contains(stop) {
            return Err(InvalidInput::UnknownStop(stop));
        }
        if !seen.insert(stop) {
            return Err(InvalidInput::DuplicateStop(stop));
        }
    }

    Ok(())
}

fn backtrack(
    g: &MultiGraph,
    start: Position,
    step_limit: usize,
) -> Result<Vec<Position>, TourError> {
    hamiltonian_circuit(g, start, step_limit).map_err(|reason| {
        match reason {
            NoCircuit::Exhausted => log::debug!("backtracking exhausted all candidates"),
            NoCircuit::StepLimitExceeded => {
                log::warn!("backtracking exceeded its step limit of {}", step_limit)
            }
        }
        TourError::NoTour { nodes: g.len() }
    })
}
