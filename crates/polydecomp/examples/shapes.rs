//! Print the minimal decomposition of a few hand-made polygons.
//!
//! Usage:
//!   cargo run -p polydecomp --example shapes -- dart
//!   cargo run -p polydecomp --example shapes -- notch
//!
//! Prints each face of the reported decomposition as `id x y` lines.

use polydecomp::prelude::*;

fn main() {
    let name = std::env::args().nth(1).unwrap_or_else(|| "dart".to_string());
    let poly = match name.as_str() {
        "dart" => Polygon::from_labeled([
            ("A", 0.0, 0.0),
            ("B", 0.0, 6.0),
            ("C", 3.0, 3.0),
            ("D", 6.0, 6.0),
            ("E", 6.0, 0.0),
        ]),
        "notch" => Polygon::from_labeled([
            ("A", 0.0, 0.0),
            ("B", 0.0, 10.0),
            ("C", 10.0, 10.0),
            ("D", 10.0, 0.0),
            ("E", 6.0, 0.0),
            ("F", 5.0, 8.0),
            ("G", 4.0, 0.0),
        ]),
        _ => {
            eprintln!("usage: shapes [dart|notch]");
            return;
        }
    };
    match decompose(&poly) {
        Ok(res) => {
            let best = res.best();
            println!(
                "{name}: {} faces (offset {}, {} ties, {} offsets skipped)",
                best.faces,
                best.offset,
                res.minimal.len(),
                res.skipped.len()
            );
            let g = &best.graph;
            for f in g.face_ids() {
                println!("Face {}:", g.face(f).label);
                for v in g.face_vertices(f) {
                    let vx = g.vertex(v);
                    println!("{} {} {}", vx.label, vx.point.x, vx.point.y);
                }
            }
        }
        Err(e) => eprintln!("{name}: {e}"),
    }
}
