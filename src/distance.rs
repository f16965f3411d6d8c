// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Position;

/// Calculates the [taxicab distance](https://en.wikipedia.org/wiki/Taxicab_geometry)
/// between two grid positions.
///
/// This never exceeds the length of a walkable path between the positions,
/// as every step on the grid changes exactly one coordinate by one. Shelving obstacles
/// are not taken into account. Distances which don't fit in a `u32` saturate at [u32::MAX].
pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    let d = a.row.abs_diff(b.row).saturating_add(a.col.abs_diff(b.col));
    d.try_into().unwrap_or(u32::MAX)
}
