// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Typed model of a warehouse floor plan.

use std::fmt;

use crate::Position;

/// Compass direction a [Cell::Shelving] faces, i.e. the side from which
/// its items are picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Returns the layout symbol of a shelving cell facing this direction.
    pub fn symbol(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Inverse of [Direction::symbol].
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

/// Something stored on a shelf, identified by a unique tag (e.g. an RFID code).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub name: String,
    pub tag: String,
}

impl Item {
    pub fn new<N: Into<String>, T: Into<String>>(name: N, tag: T) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }
}

/// A single cell of a warehouse [Grid].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Floor an agent may stand on and traverse.
    Navigable,

    /// Storage; never traversable.
    Shelving {
        facing: Direction,
        items: Vec<Item>,
    },
}

impl Cell {
    /// Creates an empty shelving cell facing the provided direction.
    pub fn shelving(facing: Direction) -> Self {
        Self::Shelving {
            facing,
            items: Vec::default(),
        }
    }

    pub fn is_navigable(&self) -> bool {
        matches!(self, Self::Navigable)
    }

    /// Returns the items stored in this cell; always empty for navigable cells.
    pub fn items(&self) -> &[Item] {
        match self {
            Self::Navigable => &[],
            Self::Shelving { items, .. } => items,
        }
    }

    /// Returns the layout symbol of this cell.
    pub fn symbol(&self) -> char {
        match self {
            Self::Navigable => '.',
            Self::Shelving { facing, .. } => facing.symbol(),
        }
    }
}

/// Error conditions for malformed grids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("grid dimensions must be positive, got {height}x{width}")]
    EmptyGrid { height: usize, width: usize },

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("position {0} is outside of the grid")]
    OutOfBounds(Position),

    #[error("unknown cell symbol {symbol:?} at {position}")]
    UnknownCell { symbol: char, position: Position },

    #[error("cell at {0} is not a shelving cell")]
    NotShelving(Position),

    #[error("item {tag:?} at {position}: {reason}")]
    InvalidItem {
        tag: String,
        position: Position,
        reason: &'static str,
    },
}

/// Checks that an item can be written as a single layout line and read back.
fn check_item(position: Position, item: &Item) -> Result<(), ConfigurationError> {
    let reason = if item.tag.is_empty() {
        "empty tag"
    } else if item.tag.contains(char::is_whitespace) {
        "tag contains whitespace"
    } else if item.name.trim().is_empty() {
        "empty name"
    } else if item.name.trim() != item.name {
        "name has leading or trailing whitespace"
    } else if item.name.contains(char::is_control) {
        "name contains control characters"
    } else {
        return Ok(());
    };

    Err(ConfigurationError::InvalidItem {
        tag: item.tag.clone(),
        position,
        reason,
    })
}

fn check_cell(position: Position, cell: &Cell) -> Result<(), ConfigurationError> {
    cell.items()
        .iter()
        .try_for_each(|item| check_item(position, item))
}

/// Rectangular warehouse floor plan of [Cells](Cell), indexed by `(row, column)`.
///
/// Dimensions are fixed at construction, and every position always holds a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a `height`×`width` grid with every position set to `cell`.
    pub fn filled(height: usize, width: usize, cell: Cell) -> Result<Self, ConfigurationError> {
        if height == 0 || width == 0 {
            return Err(ConfigurationError::EmptyGrid { height, width });
        }
        check_cell(Position::new(0, 0), &cell)?;

        Ok(Self {
            height,
            width,
            cells: vec![cell; height * width],
        })
    }

    /// Creates a grid from a list of equally-long rows.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ConfigurationError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ConfigurationError::EmptyGrid { height, width });
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != width {
                return Err(ConfigurationError::RaggedRows {
                    row,
                    expected: width,
                    got: r.len(),
                });
            }
            for (col, cell) in r.iter().enumerate() {
                check_cell(Position::new(row, col), cell)?;
            }
            cells.extend(r);
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns `(height, width)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            Some(&self.cells[pos.row * self.width + pos.col])
        } else {
            None
        }
    }

    /// Replaces the cell at the provided position.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), ConfigurationError> {
        if !self.contains(pos) {
            return Err(ConfigurationError::OutOfBounds(pos));
        }
        check_cell(pos, &cell)?;
        self.cells[pos.row * self.width + pos.col] = cell;
        Ok(())
    }

    /// Appends an item to the shelving cell at the provided position.
    ///
    /// Tags may not contain whitespace, and names must be non-empty, single-line
    /// and trimmed, so that the grid can be [displayed](fmt::Display) and read back.
    pub fn stock(&mut self, pos: Position, item: Item) -> Result<(), ConfigurationError> {
        if !self.contains(pos) {
            return Err(ConfigurationError::OutOfBounds(pos));
        }
        check_item(pos, &item)?;
        match &mut self.cells[pos.row * self.width + pos.col] {
            Cell::Shelving { items, .. } => {
                items.push(item);
                Ok(())
            }
            Cell::Navigable => Err(ConfigurationError::NotShelving(pos)),
        }
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (Position::new(idx / width, idx % width), cell))
    }

    /// Finds the shelving cell holding an item with the provided tag.
    pub fn find_item(&self, tag: &str) -> Option<(Position, &Item)> {
        self.iter().find_map(|(pos, cell)| {
            cell.items()
                .iter()
                .find(|i| i.tag == tag)
                .map(|i| (pos, i))
        })
    }
}

/// Renders the grid in the [layout format](crate::layout): one line of cell symbols
/// per row, followed by an `item` line for every stored item.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{}", line)?;
        }

        for (pos, cell) in self.iter() {
            for item in cell.items() {
                writeln!(f, "item {},{} {} {}", pos.row, pos.col, item.tag, item.name)?;
            }
        }

        Ok(())
    }
}
