// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Route and pick-path planning over warehouse grids.
//!
//! A warehouse floor is described by a [Grid] of navigable and shelving cells.
//! The grid is converted into an undirected [Graph] over navigable cells, on which
//! shortest paths are found with A*. Pick paths (round trips visiting a set of stops)
//! are planned with a Christofides-style approximation on Manhattan distances
//! and then stitched back into walkable paths.
//!
//! # Example
//!
//! ```
//! let grid = pickpath::layout::simple_warehouse();
//! let warehouse = pickpath::Warehouse::new(grid).expect("valid layout");
//!
//! let start = pickpath::Position::new(0, 0);
//! let stops = [pickpath::Position::new(3, 3), pickpath::Position::new(0, 3)];
//! let pick = warehouse.find_pick_path(start, &stops).expect("failed to plan a pick path");
//!
//! println!("Stops: {:?}", pick.stops);
//! println!("Path: {:?}", pick.path);
//! ```

mod assemble;
mod builder;
mod distance;
mod error;
mod graph;
pub mod grid;
pub mod layout;
mod search;
pub mod tour;
mod warehouse;

pub use assemble::assemble;
pub use builder::build_graph;
pub use distance::manhattan_distance;
pub use error::Error;
pub use graph::Graph;
pub use grid::{Cell, Direction, Grid, Item};
pub use search::{find_path, PathError, DEFAULT_STEP_LIMIT};
pub use warehouse::{GraphSnapshot, Options, PickPath, Registry, Warehouse, WarehouseId};

/// Identifies a cell of a [Grid] and, for navigable cells, a node of the [Graph].
///
/// Positions are ordered row-major, which is the order used for all tie-breaking
/// during path and tour search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the positions directly north, east, south and west of this one,
    /// skipping those which would have negative coordinates.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        const OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
        OFFSETS.into_iter().filter_map(move |(dr, dc)| {
            Some(Position {
                row: self.row.checked_add_signed(dr)?,
                col: self.col.checked_add_signed(dc)?,
            })
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Error returned when a [Position] can't be parsed from a `"row,col"` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position {0:?}: expected \"row,col\"")]
pub struct ParsePositionError(String);

impl std::str::FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed
            .split_once(',')
            .ok_or_else(|| ParsePositionError(s.to_string()))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| ParsePositionError(s.to_string()))?;
        let col = col
            .trim()
            .parse()
            .map_err(|_| ParsePositionError(s.to_string()))?;
        Ok(Self { row, col })
    }
}

/// Represents an outgoing connection from a specific node of a [Graph].
///
/// `cost` must not be smaller than the [manhattan_distance] between the two nodes,
/// otherwise [find_path] might return suboptimal paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: Position,
    pub cost: u32,
}
