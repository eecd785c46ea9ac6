//! Street grid description (the input side of the pipeline).
//!
//! Purpose
//! - Hold the state of every street segment between adjacent intersections
//!   of an `streets × avenues` grid.
//! - Parse and render the plain-text grid format (see [`Grid::parse`]).
//!
//! Layout
//! - `horizontal[(s-1)*(avenues-1) + (a-1)]` joins `(s, a)` and `(s, a+1)`.
//! - `vertical[(s-1)*avenues + (a-1)]` joins `(s, a)` and `(s+1, a)`.

pub(crate) mod parse;
pub mod rand;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use parse::{Found, ParseError};

/// An intersection, 1-based. Displays as `S{street}/A{avenue}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub street: usize,
    pub avenue: usize,
}

impl Coord {
    #[inline]
    pub const fn new(street: usize, avenue: usize) -> Self {
        Self { street, avenue }
    }

    /// Colour class in the grid's bipartition. Every hop flips it.
    #[inline]
    pub const fn parity(self) -> usize {
        (self.street + self.avenue) & 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}/A{}", self.street, self.avenue)
    }
}

impl FromStr for Coord {
    type Err = ParseError;

    /// Accepts `S3/A2`, `3/2` and `3,2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidField {
            field: "coordinate",
            value: s.to_string(),
        };
        let (street, avenue) = s.trim().split_once(['/', ',']).ok_or_else(invalid)?;
        let street = street.trim().trim_start_matches(['S', 's']);
        let avenue = avenue.trim().trim_start_matches(['A', 'a']);
        let street: usize = street.parse().map_err(|_| invalid())?;
        let avenue: usize = avenue.parse().map_err(|_| invalid())?;
        if street == 0 || avenue == 0 {
            return Err(invalid());
        }
        Ok(Self { street, avenue })
    }
}

/// State of the street segment between two adjacent intersections.
///
/// `Forward` runs toward the higher index (east on a street row, south on an
/// avenue); `Backward` runs toward the lower one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Link {
    #[default]
    Absent,
    TwoWay,
    Forward,
    Backward,
}

impl Link {
    pub const ALL: [Link; 4] = [Link::Absent, Link::TwoWay, Link::Forward, Link::Backward];

    pub fn horizontal_glyph(self) -> char {
        match self {
            Link::Absent => 'o',
            Link::TwoWay => '-',
            Link::Forward => '>',
            Link::Backward => '<',
        }
    }

    pub fn vertical_glyph(self) -> char {
        match self {
            Link::Absent => 'o',
            Link::TwoWay => '|',
            Link::Forward => 'v',
            Link::Backward => '^',
        }
    }

    pub fn from_horizontal_glyph(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.horizontal_glyph() == c)
    }

    pub fn from_vertical_glyph(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.vertical_glyph() == c)
    }

    #[inline]
    pub fn is_present(self) -> bool {
        self != Link::Absent
    }
}

/// Rectangular grid of intersections and the segments between them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    streets: usize,
    avenues: usize,
    horizontal: Vec<Link>,
    vertical: Vec<Link>,
}

impl Grid {
    /// A grid with every segment set to `link`.
    pub fn filled(streets: usize, avenues: usize, link: Link) -> Self {
        debug_assert!(streets > 0 && avenues > 0, "grid needs at least one intersection");
        Self {
            streets,
            avenues,
            horizontal: vec![link; streets * avenues.saturating_sub(1)],
            vertical: vec![link; streets.saturating_sub(1) * avenues],
        }
    }

    /// A grid without any segment.
    pub fn empty(streets: usize, avenues: usize) -> Self {
        Self::filled(streets, avenues, Link::Absent)
    }

    /// Assemble from row-major link rows: `street_rows[s]` has `avenues - 1`
    /// entries, `avenue_rows[s]` (between street `s+1` and `s+2`) has `avenues`.
    pub(crate) fn from_rows(
        avenues: usize,
        street_rows: Vec<Vec<Link>>,
        avenue_rows: Vec<Vec<Link>>,
    ) -> Self {
        let streets = street_rows.len();
        debug_assert_eq!(avenue_rows.len() + 1, streets);
        Self {
            streets,
            avenues,
            horizontal: street_rows.into_iter().flatten().collect(),
            vertical: avenue_rows.into_iter().flatten().collect(),
        }
    }

    #[inline]
    pub fn streets(&self) -> usize {
        self.streets
    }

    #[inline]
    pub fn avenues(&self) -> usize {
        self.avenues
    }

    pub fn contains(&self, c: Coord) -> bool {
        (1..=self.streets).contains(&c.street) && (1..=self.avenues).contains(&c.avenue)
    }

    /// Segment between `(street, avenue)` and `(street, avenue + 1)`.
    pub fn horizontal(&self, street: usize, avenue: usize) -> Link {
        self.horizontal[self.h_index(street, avenue)]
    }

    pub fn set_horizontal(&mut self, street: usize, avenue: usize, link: Link) {
        let i = self.h_index(street, avenue);
        self.horizontal[i] = link;
    }

    /// Segment between `(street, avenue)` and `(street + 1, avenue)`.
    pub fn vertical(&self, street: usize, avenue: usize) -> Link {
        self.vertical[self.v_index(street, avenue)]
    }

    pub fn set_vertical(&mut self, street: usize, avenue: usize, link: Link) {
        let i = self.v_index(street, avenue);
        self.vertical[i] = link;
    }

    /// Number of segments that exist (any state but `Absent`).
    pub fn segment_count(&self) -> usize {
        self.horizontal
            .iter()
            .chain(self.vertical.iter())
            .filter(|l| l.is_present())
            .count()
    }

    /// Parse the text format:
    ///
    /// ```text
    /// o - o > o
    /// |   v   o
    /// o < o - o
    /// ```
    ///
    /// Street rows alternate intersections (`o`) with segment glyphs
    /// `-` `>` `<` `o`; the rows between them carry one glyph per avenue
    /// (`|` `v` `^` `o`) separated by three spaces. `o` in a segment slot
    /// means there is no street.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse::parse_grid(text)
    }

    fn h_index(&self, street: usize, avenue: usize) -> usize {
        assert!(
            street >= 1 && street <= self.streets && avenue >= 1 && avenue < self.avenues,
            "horizontal segment S{street}/A{avenue} outside {}x{} grid",
            self.streets,
            self.avenues
        );
        (street - 1) * (self.avenues - 1) + (avenue - 1)
    }

    fn v_index(&self, street: usize, avenue: usize) -> usize {
        assert!(
            street >= 1 && street < self.streets && avenue >= 1 && avenue <= self.avenues,
            "vertical segment S{street}/A{avenue} outside {}x{} grid",
            self.streets,
            self.avenues
        );
        (street - 1) * self.avenues + (avenue - 1)
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in 1..=self.streets {
            f.write_str("o")?;
            for a in 1..self.avenues {
                write!(f, " {} o", self.horizontal(s, a).horizontal_glyph())?;
            }
            writeln!(f)?;
            if s < self.streets {
                for a in 1..=self.avenues {
                    if a > 1 {
                        f.write_str("   ")?;
                    }
                    write!(f, "{}", self.vertical(s, a).vertical_glyph())?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
