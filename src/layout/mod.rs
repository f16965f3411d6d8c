// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Reading warehouse [Grids](Grid) from plain-text layouts.
//!
//! A layout has one line per grid row and one symbol per cell:
//! `.` for a navigable cell, and `N`, `E`, `S` or `W` for a shelving cell
//! facing that direction. Items are added to shelving cells with
//! `item ROW,COL TAG NAME` lines. Empty lines and lines starting with `#` are ignored.
//!
//! ```text
//! # Two aisles between three racks
//! .......
//! .N.S.E.
//! .N.S.E.
//! .......
//! item 1,1 A-100 Hex bolts
//! ```
//!
//! [Grid] implements [Display](std::fmt::Display) in the same format.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::grid::{ConfigurationError, Grid};

mod fixtures;
mod parser;

pub use fixtures::{larger_warehouse, library_warehouse, simple_warehouse};

/// Format of the input layout file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    #[default]
    Unknown,

    /// Force uncompressed text
    Text,

    /// Force text with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    TextGz,

    /// Force text with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    TextBz2,
}

impl FileFormat {
    /// Guesses the format of a layout from its first few bytes.
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            Self::TextGz
        } else if prefix.starts_with(b"BZh") {
            Self::TextBz2
        } else {
            Self::Text
        }
    }
}

/// Additional controls for reading layouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,
}

/// Error which can occur when reading a layout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("{0}")]
    Configuration(#[from] ConfigurationError),
}

/// Reads a [Grid] from a reader, as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn read_from_io<R: io::Read>(options: &Options, reader: R) -> Result<Grid, Error> {
    read_buffered(options.file_format, io::BufReader::new(reader))
}

/// Reads a [Grid] from a file at the provided path, as per the provided [Options].
pub fn read_from_file<P: AsRef<Path>>(options: &Options, path: P) -> Result<Grid, Error> {
    let f = File::open(path)?;
    read_from_io(options, f)
}

/// Reads a [Grid] from an in-memory buffer, as per the provided [Options].
pub fn read_from_buffer(options: &Options, data: &[u8]) -> Result<Grid, Error> {
    read_buffered(options.file_format, data)
}

fn read_buffered<B: BufRead>(format: FileFormat, mut b: B) -> Result<Grid, Error> {
    let format = match format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        known => known,
    };

    match format {
        FileFormat::Unknown | FileFormat::Text => build_grid(parser::Reader::new(b)),

        FileFormat::TextGz => {
            let d = flate2::bufread::MultiGzDecoder::new(b);
            build_grid(parser::Reader::new(io::BufReader::new(d)))
        }

        FileFormat::TextBz2 => {
            let d = bzip2::bufread::MultiBzDecoder::new(b);
            build_grid(parser::Reader::new(io::BufReader::new(d)))
        }
    }
}

/// Collects rows and items from a layout into a [Grid]. Items are added
/// after all rows, so they may appear anywhere in the layout.
fn build_grid<R: BufRead>(records: parser::Reader<R>) -> Result<Grid, Error> {
    let mut rows = Vec::default();
    let mut items = Vec::default();

    for record in records {
        match record? {
            parser::Record::Row(cells) => rows.push(cells),
            parser::Record::Item(pos, item) => items.push((pos, item)),
        }
    }

    let mut grid = Grid::from_rows(rows)?;
    for (pos, item) in items {
        grid.stock(pos, item)?;
    }

    log::debug!("read {}x{} layout", grid.height(), grid.width());
    Ok(grid)
}

impl std::str::FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let options = Options {
            file_format: FileFormat::Text,
        };
        read_from_buffer(&options, s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Direction, Item};
    use crate::{build_graph, Position};

    fn check_aisles(grid: &Grid) {
        // .......
        // .N.S.E.
        // .N.S.E.
        // .......
        assert_eq!(grid.dimensions(), (4, 7));
        assert_eq!(
            grid.get(Position::new(1, 1)),
            Some(&Cell::Shelving {
                facing: Direction::North,
                items: vec![Item::new("Hex bolts", "A-100")],
            })
        );
        assert_eq!(
            grid.get(Position::new(2, 3)),
            Some(&Cell::shelving(Direction::South))
        );
        assert_eq!(grid.get(Position::new(2, 5)).unwrap().items().len(), 2);
        assert_eq!(grid.find_item("C-301").unwrap().0, Position::new(2, 5));

        let g = build_graph(grid).unwrap();
        assert_eq!(g.len(), 22);
        assert_eq!(g.edge_count(), 24);
    }

    #[test]
    fn read_text() {
        const DATA: &[u8] = include_bytes!("test_fixtures/aisles.txt");
        let options = Options {
            file_format: FileFormat::Text,
        };
        check_aisles(&read_from_buffer(&options, DATA).unwrap());
    }

    #[test]
    fn read_gz() {
        const DATA: &[u8] = include_bytes!("test_fixtures/aisles.txt.gz");
        let options = Options {
            file_format: FileFormat::TextGz,
        };
        check_aisles(&read_from_io(&options, io::Cursor::new(DATA)).unwrap());
    }

    #[test]
    fn read_bz2() {
        const DATA: &[u8] = include_bytes!("test_fixtures/aisles.txt.bz2");
        let options = Options {
            file_format: FileFormat::TextBz2,
        };
        check_aisles(&read_from_buffer(&options, DATA).unwrap());
    }

    #[test]
    fn detect_format() {
        let options = Options::default();
        for data in [
            include_bytes!("test_fixtures/aisles.txt").as_slice(),
            include_bytes!("test_fixtures/aisles.txt.gz").as_slice(),
            include_bytes!("test_fixtures/aisles.txt.bz2").as_slice(),
        ] {
            check_aisles(&read_from_buffer(&options, data).unwrap());
        }

        assert_eq!(FileFormat::detect(b"..N\n"), FileFormat::Text);
        assert_eq!(FileFormat::detect(&[0x1f, 0x8b, 0x08]), FileFormat::TextGz);
        assert_eq!(FileFormat::detect(b"BZh91AY"), FileFormat::TextBz2);
    }

    #[test]
    fn display_round_trip() {
        for grid in [simple_warehouse(), larger_warehouse(), library_warehouse()] {
            assert_eq!(grid.to_string().parse::<Grid>().unwrap(), grid);
        }

        const DATA: &str = include_str!("test_fixtures/aisles.txt");
        let grid: Grid = DATA.parse().unwrap();
        assert_eq!(grid.to_string().parse::<Grid>().unwrap(), grid);
    }

    #[test]
    fn items_survive_round_trip() {
        let shelf = Position::new(0, 1);
        let mut grid = Grid::filled(1, 3, Cell::Navigable).unwrap();
        grid.set(shelf, Cell::shelving(Direction::South)).unwrap();
        grid.stock(shelf, Item::new("Bolts,  M8 x 40", "RF-7"))
            .unwrap();
        grid.stock(shelf, Item::new("#2 Pencils", "item")).unwrap();
        assert!(grid.stock(shelf, Item::new("Bolts", "RF 7")).is_err());

        let back: Grid = grid.to_string().parse().unwrap();
        assert_eq!(back, grid);
        assert_eq!(back.find_item("RF-7").unwrap().1.name, "Bolts,  M8 x 40");
    }

    #[test]
    fn errors() {
        assert!(matches!(
            "..\n.x\n".parse::<Grid>(),
            Err(Error::Configuration(ConfigurationError::UnknownCell {
                symbol: 'x',
                position: Position { row: 1, col: 1 },
            }))
        ));
        assert!(matches!(
            "...\n..\n".parse::<Grid>(),
            Err(Error::Configuration(ConfigurationError::RaggedRows {
                row: 1,
                expected: 3,
                got: 2,
            }))
        ));
        assert!(matches!(
            "# nothing here\n".parse::<Grid>(),
            Err(Error::Configuration(ConfigurationError::EmptyGrid { .. }))
        ));
        assert!(matches!(
            "..\n..\nitem 0,0 T-1 Tape\n".parse::<Grid>(),
            Err(Error::Configuration(ConfigurationError::NotShelving(_)))
        ));
        assert!(matches!(
            "..\n.N\nitem 1,1\n".parse::<Grid>(),
            Err(Error::Syntax { line: 3, .. })
        ));
        assert!(matches!(
            "..\n.N\nitem one,1 T-1 Tape\n".parse::<Grid>(),
            Err(Error::Syntax { line: 3, .. })
        ));
    }
}
