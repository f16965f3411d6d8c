// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::grid::{ConfigurationError, Grid};
use crate::{Graph, Position};

/// Cost of moving between two adjacent navigable cells.
const STEP_COST: u32 = 1;

/// Converts a [Grid] into a navigation [Graph].
///
/// Every navigable cell becomes a node, and every pair of navigable cells
/// sharing a side becomes an undirected edge with unit cost. Shelving cells
/// are left out entirely.
pub fn build_graph(grid: &Grid) -> Result<Graph, ConfigurationError> {
    let (height, width) = grid.dimensions();
    if height == 0 || width == 0 {
        return Err(ConfigurationError::EmptyGrid { height, width });
    }

    let mut g = Graph::default();

    navigable_positions(grid).for_each(|pos| g.set_node(pos));

    for pos in navigable_positions(grid) {
        for neighbor in navigable_neighbors(grid, pos) {
            g.connect(pos, neighbor, STEP_COST);
        }
    }

    log::debug!(
        "built navigation graph for {}x{} grid: {} nodes, {} edges",
        height,
        width,
        g.len(),
        g.edge_count(),
    );

    Ok(g)
}

fn navigable_positions(grid: &Grid) -> impl Iterator<Item = Position> + '_ {
    grid.iter()
        .filter(|(_, cell)| cell.is_navigable())
        .map(|(pos, _)| pos)
}

fn navigable_neighbors(grid: &Grid, pos: Position) -> impl Iterator<Item = Position> + '_ {
    pos.neighbors()
        .filter(|&n| grid.get(n).is_some_and(|cell| cell.is_navigable()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Direction};
    use crate::layout;

    macro_rules! assert_edge {
        ($graph:expr, $a:expr, $b:expr) => {
            assert_eq!($graph.get_edge($a, $b), Some(STEP_COST));
            assert_eq!($graph.get_edge($b, $a), Some(STEP_COST));
        };
    }

    macro_rules! assert_no_edge {
        ($graph:expr, $a:expr, $b:expr) => {
            assert_eq!($graph.get_edge($a, $b), None);
            assert_eq!($graph.get_edge($b, $a), None);
        };
    }

    /// Checks that nodes are exactly the navigable cells and that
    /// edges exist exactly between 4-adjacent navigable cells.
    fn check_matches_grid(grid: &Grid, g: &Graph) {
        let navigable: Vec<Position> = navigable_positions(grid).collect();
        let nodes: Vec<Position> = g.iter().collect();
        assert_eq!(nodes, navigable);

        for &a in &navigable {
            for &b in &navigable {
                let adjacent = a.row.abs_diff(b.row) + a.col.abs_diff(b.col) == 1;
                if adjacent {
                    assert_edge!(g, a, b);
                } else {
                    assert_no_edge!(g, a, b);
                }
            }
        }
    }

    #[test]
    fn simple_warehouse() {
        let grid = layout::simple_warehouse();
        let g = build_graph(&grid).unwrap();

        // . . . .
        // . S N .
        // . S N .
        // . . . .
        assert_eq!(g.len(), 12);
        assert_eq!(g.edge_count(), 12);
        assert!(!g.contains(Position::new(1, 1)));
        assert!(!g.contains(Position::new(2, 2)));
        assert_edge!(g, Position::new(0, 0), Position::new(0, 1));
        assert_edge!(g, Position::new(3, 3), Position::new(2, 3));
        assert_no_edge!(g, Position::new(0, 1), Position::new(1, 1));

        check_matches_grid(&grid, &g);
    }

    #[test]
    fn reference_layouts() {
        for grid in [layout::larger_warehouse(), layout::library_warehouse()] {
            let g = build_graph(&grid).unwrap();
            check_matches_grid(&grid, &g);
        }
    }

    #[test]
    fn isolated_cells() {
        let mut grid = Grid::filled(3, 3, Cell::shelving(Direction::East)).unwrap();
        grid.set(Position::new(0, 0), Cell::Navigable).unwrap();
        grid.set(Position::new(2, 2), Cell::Navigable).unwrap();

        let g = build_graph(&grid).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn fully_navigable() {
        let grid = Grid::filled(3, 4, Cell::Navigable).unwrap();
        let g = build_graph(&grid).unwrap();

        // 3 rows × 3 horizontal + 2 × 4 vertical
        assert_eq!(g.len(), 12);
        assert_eq!(g.edge_count(), 17);
        check_matches_grid(&grid, &g);
    }
}
