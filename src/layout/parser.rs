// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use super::Error;
use crate::grid::{Cell, ConfigurationError, Direction, Item};
use crate::Position;

const ITEM_KEYWORD: &str = "item";

/// Single meaningful line of a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Record {
    Row(Vec<Cell>),
    Item(Position, Item),
}

/// Reader streams [Records](Record) from a text layout.
pub(super) struct Reader<R: io::BufRead> {
    lines: io::Lines<R>,
    line: usize,
    rows: usize,
}

impl<R: io::BufRead> Reader<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            rows: 0,
        }
    }

    fn parse_line(&mut self, line: &str) -> Result<Record, Error> {
        match line.strip_prefix(ITEM_KEYWORD) {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                self.parse_item(rest)
            }
            _ => self.parse_row(line),
        }
    }

    fn parse_row(&mut self, line: &str) -> Result<Record, Error> {
        let row = self.rows;
        let cells = line
            .chars()
            .enumerate()
            .map(|(col, symbol)| match symbol {
                '.' => Ok(Cell::Navigable),
                _ => Direction::from_symbol(symbol)
                    .map(Cell::shelving)
                    .ok_or(ConfigurationError::UnknownCell {
                        symbol,
                        position: Position::new(row, col),
                    }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.rows += 1;
        Ok(Record::Row(cells))
    }

    fn parse_item(&self, rest: &str) -> Result<Record, Error> {
        let (pos, rest) = rest
            .trim_start()
            .split_once(char::is_whitespace)
            .ok_or_else(|| self.syntax_error("expected: item ROW,COL TAG NAME"))?;

        let (tag, name) = rest
            .trim_start()
            .split_once(char::is_whitespace)
            .ok_or_else(|| self.syntax_error("item is missing a tag or a name"))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(self.syntax_error("item is missing a name"));
        }

        let pos: Position = pos
            .parse()
            .map_err(|e: crate::ParsePositionError| self.syntax_error(e.to_string()))?;

        Ok(Record::Item(pos, Item::new(name, tag)))
    }

    fn syntax_error<S: Into<String>>(&self, message: S) -> Error {
        Error::Syntax {
            line: self.line,
            message: message.into(),
        }
    }
}

impl<R: io::BufRead> Iterator for Reader<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            return Some(self.parse_line(line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(data: &str) -> Vec<Record> {
        Reader::new(data.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn rows_and_items() {
        let got = records("# rack\n.N\n\n.S  \nitem 1,1  B-7   Box of   screws \n");
        assert_eq!(
            got,
            vec![
                Record::Row(vec![Cell::Navigable, Cell::shelving(Direction::North)]),
                Record::Row(vec![Cell::Navigable, Cell::shelving(Direction::South)]),
                Record::Item(Position::new(1, 1), Item::new("Box of   screws", "B-7")),
            ]
        );
    }

    #[test]
    fn unknown_symbol_position() {
        let mut r = Reader::new("....\n..E.\n.EX.\n".as_bytes());
        assert!(r.next().unwrap().is_ok());
        assert!(r.next().unwrap().is_ok());
        match r.next().unwrap() {
            Err(Error::Configuration(ConfigurationError::UnknownCell { symbol, position })) => {
                assert_eq!(symbol, 'X');
                assert_eq!(position, Position::new(2, 2));
            }
            other => panic!("expected an unknown cell error, got {:?}", other),
        }
    }

    #[test]
    fn syntax_error_line_numbers() {
        let mut r = Reader::new("# header\n..\n\nitem 0,0 T-1\n".as_bytes());
        assert!(r.next().unwrap().is_ok());
        assert!(matches!(r.next(), Some(Err(Error::Syntax { line: 4, .. }))));
    }
}
