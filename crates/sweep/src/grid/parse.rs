//! Text-format reader for [`Grid`].
//!
//! Errors point at 1-based line/column positions of the offending character
//! so malformed input is rejected before any graph is built.

use std::fmt;

use thiserror::Error;

use super::{Grid, Link};

/// What the reader saw where it expected something else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfLine,
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "{c:?}"),
            Found::EndOfLine => f.write_str("end of line"),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Malformed grid or problem description.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}, column {column}: expected {expected}, found {found}")]
    Unexpected {
        line: usize,
        column: usize,
        found: Found,
        expected: &'static str,
    },

    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("missing {field}")]
    Missing { field: &'static str },
}

const HORIZONTAL_GLYPHS: &str = "one of `-`, `>`, `<`, `o`";
const VERTICAL_GLYPHS: &str = "one of `|`, `v`, `^`, `o`";

/// Line iterator that remembers where it is, for error positions.
pub(crate) struct Lines<'a> {
    inner: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            line: 0,
        }
    }

    pub(crate) fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let text = self.inner.next()?;
        self.line += 1;
        Some((self.line, text))
    }

    fn require(&mut self, expected: &'static str) -> Result<(usize, &'a str), ParseError> {
        let line = self.line + 1;
        self.next_line().ok_or(ParseError::Unexpected {
            line,
            column: 1,
            found: Found::EndOfInput,
            expected,
        })
    }

    /// Everything not consumed yet.
    pub(crate) fn rest(self) -> impl Iterator<Item = (usize, &'a str)> {
        let first = self.line + 1;
        self.inner.enumerate().map(move |(i, l)| (first + i, l))
    }
}

/// Cursor over one row, tracking the column of the next character.
struct Row<'a> {
    line: usize,
    column: usize,
    chars: std::str::Chars<'a>,
}

impl<'a> Row<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            column: 1,
            chars: text.chars(),
        }
    }

    fn error(&self, column: usize, found: Found, expected: &'static str) -> ParseError {
        ParseError::Unexpected {
            line: self.line,
            column,
            found,
            expected,
        }
    }

    fn bump(&mut self, expected: &'static str) -> Result<(char, usize), ParseError> {
        let column = self.column;
        match self.chars.next() {
            Some(c) => {
                self.column += 1;
                Ok((c, column))
            }
            None => Err(self.error(column, Found::EndOfLine, expected)),
        }
    }

    fn expect(&mut self, want: char, expected: &'static str) -> Result<(), ParseError> {
        let (c, column) = self.bump(expected)?;
        if c == want {
            Ok(())
        } else {
            Err(self.error(column, Found::Char(c), expected))
        }
    }

    fn link(
        &mut self,
        decode: fn(char) -> Option<Link>,
        expected: &'static str,
    ) -> Result<Link, ParseError> {
        let (c, column) = self.bump(expected)?;
        decode(c).ok_or_else(|| self.error(column, Found::Char(c), expected))
    }

    /// Trailing whitespace is tolerated.
    fn at_end(&self) -> bool {
        self.chars.as_str().trim_end().is_empty()
    }

    fn finish(mut self) -> Result<(), ParseError> {
        if self.at_end() {
            return Ok(());
        }
        let (c, column) = self.bump("end of line")?;
        Err(self.error(column, Found::Char(c), "end of line"))
    }
}

/// Street row; `avenues` is `None` on the first row, where the row defines it.
fn street_row(line: usize, text: &str, avenues: Option<usize>) -> Result<Vec<Link>, ParseError> {
    let mut row = Row::new(line, text);
    row.expect('o', "an intersection `o`")?;
    let mut links = Vec::new();
    loop {
        match avenues {
            Some(n) if links.len() + 1 >= n => break,
            None if row.at_end() => break,
            _ => {}
        }
        row.expect(' ', "a space")?;
        links.push(row.link(Link::from_horizontal_glyph, HORIZONTAL_GLYPHS)?);
        row.expect(' ', "a space")?;
        row.expect('o', "an intersection `o`")?;
    }
    row.finish()?;
    Ok(links)
}

fn avenue_row(line: usize, text: &str, avenues: usize) -> Result<Vec<Link>, ParseError> {
    let mut row = Row::new(line, text);
    let mut links = Vec::with_capacity(avenues);
    for a in 0..avenues {
        if a > 0 {
            for _ in 0..3 {
                row.expect(' ', "a space")?;
            }
        }
        links.push(row.link(Link::from_vertical_glyph, VERTICAL_GLYPHS)?);
    }
    row.finish()?;
    Ok(links)
}

/// Read grid rows from `lines`.
///
/// With `shape = Some((streets, avenues))` exactly `2*streets - 1` lines are
/// consumed. Otherwise the first row fixes the avenue count and rows are read
/// until a blank line or the end of input.
pub(crate) fn read_grid(
    lines: &mut Lines<'_>,
    shape: Option<(usize, usize)>,
) -> Result<Grid, ParseError> {
    let (line, text) = lines.require("a street row")?;
    let first = street_row(line, text, shape.map(|(_, a)| a))?;
    let avenues = first.len() + 1;
    let mut street_rows = vec![first];
    let mut avenue_rows = Vec::new();
    loop {
        match shape {
            Some((streets, _)) if street_rows.len() >= streets => break,
            Some(_) => {
                let (line, text) = lines.require("an avenue row")?;
                avenue_rows.push(avenue_row(line, text, avenues)?);
            }
            None => match lines.next_line() {
                None => break,
                Some((_, text)) if text.trim().is_empty() => break,
                Some((line, text)) => avenue_rows.push(avenue_row(line, text, avenues)?),
            },
        }
        let (line, text) = lines.require("a street row")?;
        street_rows.push(street_row(line, text, Some(avenues))?);
    }
    Ok(Grid::from_rows(avenues, street_rows, avenue_rows))
}

pub(super) fn parse_grid(text: &str) -> Result<Grid, ParseError> {
    let mut lines = Lines::new(text);
    let grid = read_grid(&mut lines, None)?;
    if let Some((line, rest)) = lines.rest().find(|(_, l)| !l.trim().is_empty()) {
        let offset = rest.len() - rest.trim_start().len();
        let found = rest.trim_start().chars().next().map_or(Found::EndOfLine, Found::Char);
        return Err(ParseError::Unexpected {
            line,
            column: offset + 1,
            found,
            expected: "end of input",
        });
    }
    Ok(grid)
}
