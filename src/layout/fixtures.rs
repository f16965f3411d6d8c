// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::grid::{Cell, Direction, Grid};
use crate::Position;

const LARGER_HEIGHT: usize = 8;
const LARGER_WIDTH: usize = 4;

/// Creates a 4×4 warehouse with a 2×2 block of shelves surrounded by a single aisle.
///
/// ```text
/// ....
/// .SN.
/// .SN.
/// ....
/// ```
pub fn simple_warehouse() -> Grid {
    let mut grid = Grid::filled(4, 4, Cell::Navigable).expect("4x4 grid is not empty");
    for row in 1..=2 {
        shelve(&mut grid, Position::new(row, 1), Direction::South);
        shelve(&mut grid, Position::new(row, 2), Direction::North);
    }
    grid
}

/// Creates an 8×4 warehouse with a double-sided rack of six shelves
/// running down the middle.
///
/// ```text
/// ....
/// .NS.
/// .NS.
/// .NS.
/// .NS.
/// .NS.
/// .NS.
/// ....
/// ```
pub fn larger_warehouse() -> Grid {
    let mut grid = Grid::filled(LARGER_HEIGHT, LARGER_WIDTH, Cell::Navigable)
        .expect("larger warehouse dimensions are not empty");
    for row in 1..LARGER_HEIGHT - 1 {
        shelve(&mut grid, Position::new(row, 1), Direction::North);
        shelve(&mut grid, Position::new(row, 2), Direction::South);
    }
    grid
}

/// Creates an 8×16 warehouse made of four [larger_warehouse] layouts
/// placed side by side.
pub fn library_warehouse() -> Grid {
    let unit = larger_warehouse();
    let rows = (0..LARGER_HEIGHT)
        .map(|row| {
            (0..4 * LARGER_WIDTH)
                .filter_map(|col| unit.get(Position::new(row, col % LARGER_WIDTH)).cloned())
                .collect::<Vec<Cell>>()
        })
        .collect::<Vec<_>>();
    Grid::from_rows(rows).expect("library warehouse rows have equal lengths")
}

fn shelve(grid: &mut Grid, pos: Position, facing: Direction) {
    grid.set(pos, Cell::shelving(facing))
        .expect("reference layout shelves are within the grid");
}
