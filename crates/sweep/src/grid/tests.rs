use super::*;

const SAMPLE: &str = "\
o - o > o
|   v   o
o < o - o
";

#[test]
fn parse_reads_every_segment_state() {
    let g = Grid::parse(SAMPLE).unwrap();
    assert_eq!((g.streets(), g.avenues()), (2, 3));
    assert_eq!(g.horizontal(1, 1), Link::TwoWay);
    assert_eq!(g.horizontal(1, 2), Link::Forward);
    assert_eq!(g.horizontal(2, 1), Link::Backward);
    assert_eq!(g.horizontal(2, 2), Link::TwoWay);
    assert_eq!(g.vertical(1, 1), Link::TwoWay);
    assert_eq!(g.vertical(1, 2), Link::Forward);
    assert_eq!(g.vertical(1, 3), Link::Absent);
    assert_eq!(g.segment_count(), 6);
}

#[test]
fn display_renders_the_parsed_text() {
    let g = Grid::parse(SAMPLE).unwrap();
    assert_eq!(g.to_string(), SAMPLE);
}

#[test]
fn single_intersection_and_crlf() {
    let g = Grid::parse("o\r\n").unwrap();
    assert_eq!((g.streets(), g.avenues()), (1, 1));
    assert_eq!(g.segment_count(), 0);

    let g = Grid::parse("o - o\r\n^   |\r\no o o\r\n").unwrap();
    assert_eq!(g.vertical(1, 1), Link::Backward);
    assert_eq!(g.horizontal(2, 1), Link::Absent);
}

#[test]
fn unexpected_glyph_reports_line_and_column() {
    let err = Grid::parse("o - o\n|   x\no - o\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::Unexpected {
            line: 2,
            column: 5,
            found: Found::Char('x'),
            expected: "one of `|`, `v`, `^`, `o`",
        }
    );
    // Vertical glyphs are not accepted on street rows.
    let err = Grid::parse("o | o\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Unexpected {
            line: 1,
            column: 3,
            found: Found::Char('|'),
            ..
        }
    ));
}

#[test]
fn short_rows_and_missing_rows_are_rejected() {
    let err = Grid::parse("o - o\n|   |\no -\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Unexpected {
            line: 3,
            column: 4,
            found: Found::EndOfLine,
            ..
        }
    ));
    let err = Grid::parse("o - o\n|   |\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Unexpected {
            line: 3,
            found: Found::EndOfInput,
            ..
        }
    ));
    let err = Grid::parse("o - o\n|   |\no - o - o\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Unexpected {
            line: 3,
            column: 6,
            found: Found::Char(' '),
            expected: "end of line",
        }
    ));
}

#[test]
fn text_after_a_blank_line_is_rejected() {
    let err = Grid::parse("o - o\n\n  junk\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::Unexpected {
            line: 3,
            column: 3,
            found: Found::Char('j'),
            expected: "end of input",
        }
    );
}

#[test]
fn coord_parse_and_display() {
    let c: Coord = "S3/A2".parse().unwrap();
    assert_eq!(c, Coord::new(3, 2));
    assert_eq!(c.to_string(), "S3/A2");
    assert_eq!("3,2".parse::<Coord>().unwrap(), c);
    assert_eq!(" 3 / 2 ".parse::<Coord>().unwrap(), c);
    assert!("S0/A1".parse::<Coord>().is_err());
    assert!("S3".parse::<Coord>().is_err());
    assert_eq!(Coord::new(1, 1).parity(), 0);
    assert_eq!(Coord::new(1, 2).parity(), 1);
}

#[test]
fn contains_respects_one_based_bounds() {
    let g = Grid::empty(2, 3);
    assert!(g.contains(Coord::new(1, 1)));
    assert!(g.contains(Coord::new(2, 3)));
    assert!(!g.contains(Coord::new(0, 1)));
    assert!(!g.contains(Coord::new(3, 1)));
    assert!(!g.contains(Coord::new(1, 4)));
}
