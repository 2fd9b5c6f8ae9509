//! Canonical one-line text form of a graph.
//!
//! ```text
//! (0, 0) (1, 0) (1, 1) - (0, 0) (1, 0) (1, 0) (1, 1)
//! ```
//!
//! Points come first, then ` - `, then each undirected edge once as a pair of
//! point literals, lower endpoint first. Coordinates use `%g`-style general
//! formatting at [`TEXT_SIGNIFICANT_DIGITS`] digits, widened until the token
//! reads back as the same `f64`, so reloading reproduces every point exactly.
//! Loading is all or nothing.

use std::fmt;
use std::str::FromStr;

use crate::geometry::limits::{self, MAX_TEXT_BYTES, MAX_TEXT_TOKENS};
use crate::{Graph, KolamError, ParseError, ParseErrorKind, Point};

pub const TEXT_SIGNIFICANT_DIGITS: usize = 6;
// Enough for any f64 to read back exactly
const MAX_SIGNIFICANT_DIGITS: usize = 17;

/// Format `v` like C's `%.{sig}g`: fixed notation for moderate exponents,
/// scientific otherwise, trailing zeros removed.
pub fn format_general(v: f64, sig: usize) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if !v.is_finite() {
        return v.to_string();
    }
    let sig = sig.max(1);
    let sci = format!("{:.*e}", sig - 1, v);
    let parts = sci
        .split_once('e')
        .and_then(|(m, e)| Some((m.to_string(), e.parse::<i32>().ok()?)));
    let Some((mantissa, exp)) = parts else {
        return sci;
    };
    if exp < -4 || exp >= sig as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(&mantissa), sign, exp.unsigned_abs())
    } else {
        let decimals = (sig as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, v)).to_string()
    }
}

/// Coordinate token for the text form: the shortest general format of at
/// least [`TEXT_SIGNIFICANT_DIGITS`] digits that parses back to `v`.
pub fn format_coordinate(v: f64) -> String {
    for sig in TEXT_SIGNIFICANT_DIGITS..MAX_SIGNIFICANT_DIGITS {
        let s = format_general(v, sig);
        if s.parse::<f64>().ok() == Some(v) {
            return s;
        }
    }
    format_general(v, MAX_SIGNIFICANT_DIGITS)
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

pub(crate) fn to_text_impl(g: &Graph) -> String {
    let points: Vec<String> = g.points().iter().map(|p| p.to_string()).collect();
    let edges: Vec<String> = g
        .edges()
        .into_iter()
        .map(|(u, v)| format!("{} {}", g.points[u as usize], g.points[v as usize]))
        .collect();
    format!("{} - {}", points.join(" "), edges.join(" "))
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(s: &'a str) -> Self {
        Scanner { bytes: s.as_bytes(), pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn err(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.pos, kind)
    }

    fn expect(&mut self, byte: u8, what: &'static str) -> Result<(), ParseError> {
        self.skip_ws();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.err(ParseErrorKind::Expected(what)))
        }
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, b'.' | b'-' | b'+' | b'e' | b'E') {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.err(ParseErrorKind::Expected("number")));
        }
        let raw = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
        match raw.parse::<f64>() {
            Ok(v) if limits::in_coord_bounds(v) => Ok(v),
            _ => Err(ParseError::new(start, ParseErrorKind::InvalidNumber(raw))),
        }
    }

    fn point(&mut self) -> Result<Point, ParseError> {
        self.expect(b'(', "'('")?;
        let x = self.number()?;
        self.expect(b',', "','")?;
        let y = self.number()?;
        self.expect(b')', "')'")?;
        Ok(Point::new(x, y))
    }
}

fn graph_error(offset: usize, e: KolamError) -> ParseError {
    let kind = match e {
        KolamError::LimitExceeded { .. } => ParseErrorKind::TooLarge,
        other => ParseErrorKind::InvalidEdge(other.to_string()),
    };
    ParseError::new(offset, kind)
}

fn parse(s: &str) -> Result<Graph, ParseError> {
    if s.len() > MAX_TEXT_BYTES {
        return Err(ParseError::new(0, ParseErrorKind::TooLarge));
    }
    let mut sc = Scanner::new(s);
    let mut tokens = 0usize;

    let mut points: Vec<(usize, Point)> = Vec::new();
    loop {
        sc.skip_ws();
        match sc.peek() {
            Some(b'(') => {
                tokens += 1;
                if tokens > MAX_TEXT_TOKENS {
                    return Err(sc.err(ParseErrorKind::TooLarge));
                }
                let at = sc.pos;
                points.push((at, sc.point()?));
            }
            Some(b'-') => break,
            Some(_) => return Err(sc.err(ParseErrorKind::Expected("point or ' - '"))),
            None => return Err(sc.err(ParseErrorKind::MissingSeparator)),
        }
    }
    sc.pos += 1;
    if !matches!(sc.peek(), None | Some(b' ' | b'\t' | b'\r' | b'\n')) {
        return Err(sc.err(ParseErrorKind::MissingSeparator));
    }

    let mut ends: Vec<(usize, Point)> = Vec::new();
    loop {
        sc.skip_ws();
        match sc.peek() {
            Some(b'(') => {
                tokens += 1;
                if tokens > MAX_TEXT_TOKENS {
                    return Err(sc.err(ParseErrorKind::TooLarge));
                }
                let at = sc.pos;
                ends.push((at, sc.point()?));
            }
            Some(_) => return Err(sc.err(ParseErrorKind::Expected("edge endpoint"))),
            None => break,
        }
    }
    if ends.len() % 2 != 0 {
        return Err(sc.err(ParseErrorKind::OddEdgeList));
    }

    let mut g = Graph::new();
    for &(at, p) in &points {
        g.add_point(p).map_err(|e| graph_error(at, e))?;
    }
    for pair in ends.chunks_exact(2) {
        let (at, pa) = pair[0];
        let (_, pb) = pair[1];
        let endpoint = |p: Point| {
            g.find_point(p)
                .ok_or_else(|| ParseError::new(at, ParseErrorKind::UnknownEndpoint(p.to_string())))
        };
        let a = endpoint(pa)?;
        let b = endpoint(pb)?;
        if g.has_edge(a, b) {
            return Err(ParseError::new(
                at,
                ParseErrorKind::InvalidEdge(format!("duplicate edge {pa} {pb}")),
            ));
        }
        g.add_edge(a, b).map_err(|e| graph_error(at, e))?;
    }
    Ok(g)
}

pub(crate) fn from_text_impl(s: &str) -> Result<Graph, ParseError> {
    let res = parse(s);
    match &res {
        Ok(g) => log::debug!("loaded {} points and {} edges from text", g.point_count(), g.edge_count()),
        Err(e) => log::debug!("text load failed: {e}"),
    }
    res
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_text_impl(self))
    }
}

impl FromStr for Graph {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_text_impl(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_matches_percent_g() {
        let cases = [
            (0.0, "0"),
            (-0.0, "0"),
            (100.0, "100"),
            (-2.5, "-2.5"),
            (123456.0, "123456"),
            (1234567.0, "1.23457e+06"),
            (0.0001, "0.0001"),
            (0.00001, "1e-05"),
            (0.1 + 0.2, "0.3"),
            (999999.7, "1e+06"),
            (1.5e-10, "1.5e-10"),
        ];
        for (v, want) in cases {
            assert_eq!(format_general(v, TEXT_SIGNIFICANT_DIGITS), want, "{v}");
        }
    }

    #[test]
    fn coordinates_widen_until_exact() {
        assert_eq!(format_coordinate(2.5), "2.5");
        assert_eq!(format_coordinate(1234567.0), "1234567");
        assert_eq!(format_coordinate(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_coordinate(0.1234561), "0.1234561");
        for v in [1.0 / 3.0, -7.0e11 / 9.0, 1.5e-10 + 1e-25, f64::MIN_POSITIVE] {
            assert_eq!(format_coordinate(v).parse::<f64>().unwrap(), v);
        }
    }

    #[test]
    fn close_points_stay_apart_after_reload() {
        let mut g = Graph::new();
        g.add_segment(Point::new(0.1234561, 0.0), Point::new(0.1234564, 0.0)).unwrap();
        let text = g.to_text();
        assert_eq!(text, "(0.1234561, 0) (0.1234564, 0) - (0.1234561, 0) (0.1234564, 0)");
        let back = Graph::from_text(&text).unwrap();
        assert_eq!(back.points(), g.points());
        assert_eq!(back.edges(), g.edges());
    }

    #[test]
    fn empty_graph_is_a_bare_separator() {
        let g = Graph::new();
        assert_eq!(g.to_text(), " - ");
        let back = Graph::from_text(" - ").unwrap();
        assert_eq!(back.point_count(), 0);
        assert_eq!("-".parse::<Graph>().unwrap().edge_count(), 0);
    }

    #[test]
    fn writes_each_edge_once_lower_endpoint_first() {
        let mut g = Graph::new();
        g.add_segment(Point::new(1.0, 0.0), Point::new(0.0, 0.0)).unwrap();
        g.add_point(Point::new(-3.5, 2.0)).unwrap();
        assert_eq!(g.to_text(), "(1, 0) (0, 0) (-3.5, 2) - (0, 0) (1, 0)");
        assert_eq!(g.to_string(), g.to_text());
    }

    #[test]
    fn loads_what_it_writes() {
        let mut g = Graph::new();
        g.add_segment(Point::new(0.0, 0.0), Point::new(2.0, 0.0)).unwrap();
        g.add_segment(Point::new(2.0, 0.0), Point::new(1.0, 1.5)).unwrap();
        g.add_point(Point::new(7.0, -7.0)).unwrap();
        let back = Graph::from_text(&g.to_text()).unwrap();
        assert_eq!(back.points(), g.points());
        assert_eq!(back.edges(), g.edges());
        assert_eq!(back.to_text(), g.to_text());
    }

    #[test]
    fn rejects_malformed_lines() {
        let kind = |s: &str| Graph::from_text(s).unwrap_err().kind;
        assert_eq!(kind("(0, 0) (1, 0)"), ParseErrorKind::MissingSeparator);
        assert_eq!(kind("(0, 0) (1, 0) - (0, 0)"), ParseErrorKind::OddEdgeList);
        assert_eq!(kind("(0, 0) -(0, 0)"), ParseErrorKind::MissingSeparator);
        assert!(matches!(kind("(0, 0) - (0, 0) (5, 5)"), ParseErrorKind::UnknownEndpoint(_)));
        assert!(matches!(kind("(0, x) - "), ParseErrorKind::Expected(_)));
        assert!(matches!(kind("(1e999, 0) - "), ParseErrorKind::InvalidNumber(_)));
        assert!(matches!(kind("(0, 0) (1, 0) - (0, 0) (0, 0)"), ParseErrorKind::InvalidEdge(_)));
        assert!(matches!(
            kind("(0, 0) (1, 0) - (0, 0) (1, 0) (1, 0) (0, 0)"),
            ParseErrorKind::InvalidEdge(_)
        ));
        assert!(matches!(kind("hello - "), ParseErrorKind::Expected(_)));
    }

    #[test]
    fn error_offsets_point_at_the_culprit() {
        let err = Graph::from_text("(0, 0) (1, oops)").unwrap_err();
        assert_eq!(err.offset, 11);
        let err = Graph::from_text("(0, 0) - (0, 0) (9, 9)").unwrap_err();
        assert_eq!(err.offset, 9);
    }
}
