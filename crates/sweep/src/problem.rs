//! Problem files: a grid plus the route configuration that goes with it.
//!
//! ```text
//! 2 3 1 1
//! o - o > o
//! |   v   |
//! o < o - o
//! 1
//! 4
//! ```
//!
//! The header is `streets avenues start_street start_avenue`. The grid rows
//! follow, then the coverage flag (`1` every direction, `0` either direction)
//! and the search width. Flag and width are whitespace separated and may
//! share a line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grid::parse::{read_grid, Lines};
use crate::grid::{Coord, Grid, ParseError};
use crate::search::{CoverageMode, RouteCfg};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub grid: Grid,
    pub cfg: RouteCfg,
}

fn number(field: &'static str, token: Option<&str>) -> Result<usize, ParseError> {
    let token = token.ok_or(ParseError::Missing { field })?;
    token.parse().map_err(|_| ParseError::InvalidField {
        field,
        value: token.to_owned(),
    })
}

fn positive(field: &'static str, token: Option<&str>) -> Result<usize, ParseError> {
    match number(field, token)? {
        0 => Err(ParseError::InvalidField {
            field,
            value: "0".to_owned(),
        }),
        n => Ok(n),
    }
}

impl Problem {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = Lines::new(text);
        let header = loop {
            match lines.next_line() {
                Some((_, l)) if l.trim().is_empty() => continue,
                Some((_, l)) => break l,
                None => return Err(ParseError::Missing { field: "header" }),
            }
        };
        let mut fields = header.split_whitespace();
        let streets = positive("street count", fields.next())?;
        let avenues = positive("avenue count", fields.next())?;
        let start = Coord::new(
            positive("start street", fields.next())?,
            positive("start avenue", fields.next())?,
        );
        if let Some(extra) = fields.next() {
            return Err(ParseError::InvalidField {
                field: "header",
                value: extra.to_owned(),
            });
        }

        let grid = read_grid(&mut lines, Some((streets, avenues)))?;
        if !grid.contains(start) {
            return Err(ParseError::InvalidField {
                field: "start",
                value: start.to_string(),
            });
        }

        let mut trailer = lines.rest().flat_map(|(_, l)| l.split_whitespace());
        let flag = number("coverage flag", trailer.next())?;
        let coverage = u8::try_from(flag)
            .ok()
            .and_then(CoverageMode::from_flag)
            .ok_or_else(|| ParseError::InvalidField {
                field: "coverage flag",
                value: flag.to_string(),
            })?;
        let width = positive("search width", trailer.next())?;
        if let Some(extra) = trailer.next() {
            return Err(ParseError::InvalidField {
                field: "trailer",
                value: extra.to_owned(),
            });
        }

        Ok(Self {
            grid,
            cfg: RouteCfg::new(start).with_coverage(coverage).with_width(width),
        })
    }
}

impl FromStr for Problem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RouteCfg { start, coverage, width } = self.cfg;
        writeln!(
            f,
            "{} {} {} {}",
            self.grid.streets(),
            self.grid.avenues(),
            start.street,
            start.avenue
        )?;
        write!(f, "{}", self.grid)?;
        writeln!(f, "{}", coverage.flag())?;
        writeln!(f, "{width}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Found, Link};

    const SAMPLE: &str = "2 3 1 1\no - o > o\n|   v   |\no < o - o\n1\n4\n";

    #[test]
    fn parses_header_grid_and_trailer() {
        let p = Problem::parse(SAMPLE).unwrap();
        assert_eq!((p.grid.streets(), p.grid.avenues()), (2, 3));
        assert_eq!(p.grid.horizontal(1, 2), Link::Forward);
        assert_eq!(p.grid.vertical(1, 2), Link::Forward);
        assert_eq!(p.grid.horizontal(2, 1), Link::Backward);
        assert_eq!(p.cfg.start, Coord::new(1, 1));
        assert_eq!(p.cfg.coverage, CoverageMode::EveryDirection);
        assert_eq!(p.cfg.width, 4);
        assert_eq!(p.to_string(), SAMPLE);
    }

    #[test]
    fn trailer_may_share_a_line_and_use_crlf() {
        let p: Problem = "1 2 1 2\r\no - o\r\n0 1\r\n".parse().unwrap();
        assert_eq!(p.cfg.coverage, CoverageMode::EitherDirection);
        assert_eq!(p.cfg.width, 1);
        assert_eq!(p.cfg.start, Coord::new(1, 2));
    }

    #[test]
    fn grid_errors_carry_positions() {
        let err = Problem::parse("2 2 1 1\no - o\n|   x\no - o\n1\n1\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unexpected {
                line: 3,
                column: 5,
                found: Found::Char('x'),
                expected: "one of `|`, `v`, `^`, `o`",
            }
        );
    }

    #[test]
    fn short_grid_is_reported_at_end_of_input() {
        let err = Problem::parse("3 2 1 1\no - o\n|   |\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected {
                line: 4,
                found: Found::EndOfInput,
                ..
            }
        ));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let cases = [
            ("", ParseError::Missing { field: "header" }),
            (
                "1 x 1 1\no\n1\n1\n",
                ParseError::InvalidField {
                    field: "avenue count",
                    value: "x".into(),
                },
            ),
            ("1 1 1\no\n1\n1\n", ParseError::Missing { field: "start avenue" }),
            (
                "1 2 2 1\no - o\n1\n1\n",
                ParseError::InvalidField {
                    field: "start",
                    value: "S2/A1".into(),
                },
            ),
            (
                "1 1 1 1\no\n2\n1\n",
                ParseError::InvalidField {
                    field: "coverage flag",
                    value: "2".into(),
                },
            ),
            (
                "1 1 1 1\no\n1\n0\n",
                ParseError::InvalidField {
                    field: "search width",
                    value: "0".into(),
                },
            ),
            ("1 1 1 1\no\n1\n", ParseError::Missing { field: "search width" }),
            (
                "1 1 1 1\no\n1\n1 9\n",
                ParseError::InvalidField {
                    field: "trailer",
                    value: "9".into(),
                },
            ),
        ];
        for (text, want) in cases {
            assert_eq!(Problem::parse(text).unwrap_err(), want, "input {text:?}");
        }
    }
}
