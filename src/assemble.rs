// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{find_path, Graph, PathError, Position};

/// Turns a tour (an ordered list of stops) into a walkable path, by joining
/// the shortest paths between consecutive stops.
///
/// The shared node between two consecutive segments is only included once.
/// An empty tour produces an empty path, and a single-stop tour a single-node path.
/// `step_limit` applies to every [find_path] call separately.
pub fn assemble(
    g: &Graph,
    tour: &[Position],
    step_limit: usize,
) -> Result<Vec<Position>, PathError> {
    let Some(&first) = tour.first() else {
        return Ok(vec![]);
    };

    let mut path = vec![first];
    for pair in tour.windows(2) {
        let segment = find_path(g, pair[0], pair[1], step_limit)?;
        debug_assert_eq!(segment.first(), path.last());
        path.extend_from_slice(&segment[1..]);
    }
    Ok(path)
}
