//! Human-readable search log (`outputDemo<N>.txt`).
//!
//! Layout, in order of appearance:
//! - `Original Polygon:` followed by the input boundary;
//! - per offset: `Partition k:` blocks, each followed by the running
//!   decomposition as `Face k` groups;
//! - `First Partition only:` for every rotation-dedup probe;
//! - the winning decomposition as coordinates and edge pairs;
//! - `Number of Vertices: n\tTime taken:  t microseconds`.

use std::io::{self, Write};

use polydecomp::api::{Adjacency, FaceId, Graph, MergeOutcome, Point, Polygon, SearchObserver};

/// Writes the log while observing the search.
///
/// Observer hooks cannot fail, so the first write error is kept and
/// reported by `finish`.
pub struct LogWriter<W: Write> {
    out: W,
    err: Option<io::Error>,
}

impl<W: Write> LogWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, err: None }
    }

    pub fn original(&mut self, poly: &Polygon) {
        self.emit(|w| {
            writeln!(w, "Original Polygon:")?;
            write_boundary(w, poly.vertices.iter().map(|v| (v.label.as_str(), v.point)))
        });
    }

    /// Coordinates of the reported decomposition and its undirected edges.
    pub fn adjacency(&mut self, adj: &Adjacency) {
        self.emit(|w| {
            writeln!(w, "Coordinates are:")?;
            for p in &adj.points {
                writeln!(w, "({},{})", p.x, p.y)?;
            }
            writeln!(w, "Draw edges between the following pairs:")?;
            for (i, j) in adj.pairs() {
                let (a, b) = (adj.points[i], adj.points[j]);
                writeln!(w, "({},{})---({},{})", a.x, a.y, b.x, b.y)?;
            }
            write!(w, "\n\n\n")
        });
    }

    pub fn summary(&mut self, vertices: usize, micros: u64) {
        self.emit(|w| {
            writeln!(
                w,
                "\nNumber of Vertices: {vertices}\tTime taken:  {micros} microseconds"
            )
        });
    }

    /// Flush and surface the first error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.err.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        if self.err.is_none() {
            if let Err(e) = f(&mut self.out) {
                self.err = Some(e);
            }
        }
    }

    fn partition(&mut self, heading: &str, partition: &Graph) {
        self.emit(|w| {
            writeln!(w, "{heading}:")?;
            match partition.face_ids().next() {
                Some(f) => write_boundary(w, face_items(partition, f)),
                None => Ok(()),
            }
        });
    }
}

impl<W: Write> SearchObserver for LogWriter<W> {
    fn partition_extracted(&mut self, number: usize, partition: &Graph) {
        self.partition(&format!("Partition {number}"), partition);
    }

    fn decomposition_merged(&mut self, decomposition: &Graph, _outcome: MergeOutcome) {
        self.emit(|w| {
            writeln!(w, "Printing faces in clockwise order")?;
            for f in decomposition.face_ids() {
                writeln!(w, "Face {}", decomposition.face(f).label)?;
                for (label, p) in face_items(decomposition, f) {
                    writeln!(w, "{} {} {}", label, p.x, p.y)?;
                }
                write!(w, "\n\n")?;
            }
            writeln!(w)
        });
    }

    fn first_partition_probed(&mut self, _offset: usize, partition: Option<&Graph>) {
        if let Some(p) = partition {
            self.partition("First Partition only", p);
        }
    }
}

fn face_items(g: &Graph, f: FaceId) -> impl Iterator<Item = (&str, Point)> + '_ {
    g.face_vertices(f).into_iter().map(move |v| {
        let vx = g.vertex(v);
        (vx.label.as_str(), vx.point)
    })
}

fn write_boundary<'a, W, I>(w: &mut W, items: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, Point)>,
{
    writeln!(w, "Printing vertices in clockwise order")?;
    for (label, p) in items {
        writeln!(w, "{} {} {}", label, p.x, p.y)?;
    }
    write!(w, "\n\n\n")
}
