//! Text formats at the process boundary.
//!
//! - Input: first line `n`, then `n` lines `<id> <x> <y>` walked clockwise.
//! - Visualiser file: `n`, one `<id> <x> <y>` line per vertex, then the
//!   `n×n` adjacency matrix as rows of `0`/`1` separated by spaces.
//!
//! Everything here works on injected readers/writers; the algorithm itself
//! only sees in-memory values.

use std::io::{BufRead, Write};

use crate::dcel::Adjacency;
use crate::error::ParseError;
use crate::geom2::{Point, Polygon, PolygonVertex};

/// Parse a polygon. Blank lines are ignored; lines past the `n`-th vertex too.
pub fn read_polygon<R: BufRead>(reader: R) -> Result<Polygon, ParseError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, l)| l.map(|l| (i + 1, l)))
        .filter(|r| r.as_ref().map_or(true, |(_, l)| !l.trim().is_empty()));

    let (_, header) = lines.next().ok_or(ParseError::MissingHeader)??;
    let n: usize = header
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidHeader(header.trim().to_string()))?;

    let mut vertices = Vec::with_capacity(n);
    for item in lines.take(n) {
        let (line, content) = item?;
        vertices.push(parse_vertex(&content).ok_or(ParseError::InvalidVertex { line, content })?);
    }
    if vertices.len() != n {
        return Err(ParseError::CountMismatch {
            expected: n,
            found: vertices.len(),
        });
    }
    Ok(Polygon::new(vertices))
}

fn parse_vertex(content: &str) -> Option<PolygonVertex> {
    let mut it = content.split_whitespace();
    let label = it.next()?.to_string();
    let x = it.next()?.parse().ok()?;
    let y = it.next()?.parse().ok()?;
    if it.next().is_some() {
        return None;
    }
    Some(PolygonVertex {
        label,
        point: Point::new(x, y),
    })
}

/// Write a polygon in the input format.
pub fn write_polygon<W: Write>(mut w: W, poly: &Polygon) -> std::io::Result<()> {
    writeln!(w, "{}", poly.len())?;
    for v in &poly.vertices {
        writeln!(w, "{} {} {}", v.label, v.point.x, v.point.y)?;
    }
    Ok(())
}

/// Write the visualiser file for an adjacency export.
pub fn write_visualisation<W: Write>(mut w: W, adj: &Adjacency) -> std::io::Result<()> {
    writeln!(w, "{}", adj.len())?;
    for (label, p) in adj.labels.iter().zip(&adj.points) {
        writeln!(w, "{} {} {}", label, p.x, p.y)?;
    }
    for row in adj.matrix.row_iter() {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        writeln!(w, "{}", cells.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcel::Graph;

    const DART: &str = "5\nA 0 0\nB 0 6\nC 3 3\nD 6 6\nE 6 0\n";

    #[test]
    fn reads_the_dart() {
        let poly = read_polygon(DART.as_bytes()).unwrap();
        assert_eq!(poly.labels(), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(poly.vertices[2].point, Point::new(3.0, 3.0));
        assert!(poly.is_clockwise());
    }

    #[test]
    fn write_then_read_keeps_labels_and_points() {
        let poly = read_polygon("3\n\nid1 0.5 -1.25\nid2 0 2\nid3 3 0\n".as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_polygon(&mut buf, &poly).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "3\nid1 0.5 -1.25\nid2 0 2\nid3 3 0\n");
        assert_eq!(read_polygon(buf.as_slice()).unwrap(), poly);
    }

    #[test]
    fn reports_malformed_input() {
        assert!(matches!(read_polygon("".as_bytes()), Err(ParseError::MissingHeader)));
        assert!(matches!(
            read_polygon("five\n".as_bytes()),
            Err(ParseError::InvalidHeader(h)) if h == "five"
        ));
        assert!(matches!(
            read_polygon("2\nA 0 0\nB 1\n".as_bytes()),
            Err(ParseError::InvalidVertex { line: 3, .. })
        ));
        assert!(matches!(
            read_polygon("3\nA 0 0\nB 1 1\n".as_bytes()),
            Err(ParseError::CountMismatch { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn visualisation_layout() {
        let poly = read_polygon("3\nA 0 0\nB 0 1\nC 1 1\n".as_bytes()).unwrap();
        let adj = Graph::from_polygon(&poly).adjacency();
        let mut buf = Vec::new();
        write_visualisation(&mut buf, &adj).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "3\nA 0 0\nB 0 1\nC 1 1\n0 1 1\n1 0 1\n1 1 0\n"
        );
    }
}
