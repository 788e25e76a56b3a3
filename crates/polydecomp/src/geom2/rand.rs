//! Random star-shaped simple polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Feed benchmarks, timing sweeps, and smoke tests with reproducible
//!   non-convex inputs in the clockwise, unique-label, unique-coordinate
//!   format the decomposition expects.
//!
//! Model
//! - Start from `n` equally spaced angles walked clockwise (decreasing),
//!   add bounded angular jitter so the order is preserved, pick a radius per
//!   vertex with relative jitter, then round coordinates to `decimals`.
//! - Star-shaped around the origin with strictly monotone angles, hence
//!   simple before rounding. Draws whose rounded coordinates collide are
//!   rejected and redrawn.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use super::polygon::{Polygon, PolygonVertex};
use super::types::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Star-polygon sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u∈[-radial_jitter, radial_jitter]`, clamped to [0, 0.95].
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub random_phase: bool,
    /// Decimal places kept in the coordinates.
    pub decimals: u32,
    /// Redraws allowed when rounding produces duplicate coordinates.
    pub max_attempts: usize,
}
impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.5,
            base_radius: 100.0,
            random_phase: true,
            decimals: 2,
            max_attempts: 16,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a clockwise star-shaped polygon labeled `id1..idN`.
///
/// Returns `None` if every attempt produced colliding rounded coordinates.
pub fn draw_star_polygon(cfg: StarCfg, tok: ReplayToken) -> Option<Polygon> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    for _ in 0..cfg.max_attempts.max(1) {
        let pts = star_points(&cfg, n, &mut rng);
        if has_duplicates(&pts) {
            continue;
        }
        let vertices = pts
            .into_iter()
            .enumerate()
            .map(|(k, point)| PolygonVertex {
                label: format!("id{}", k + 1),
                point,
            })
            .collect();
        return Some(Polygon::new(vertices));
    }
    None
}

fn star_points<R: Rng>(cfg: &StarCfg, n: usize, rng: &mut R) -> Vec<Point> {
    // Every angular step must stay below π, otherwise small n can flip winding.
    let aj = cfg
        .angle_jitter_frac
        .clamp(0.0, 0.49)
        .min(0.45 * ((n as f64) / 2.0 - 1.0));
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI
    } else {
        0.0
    };
    let scale = 10f64.powi(cfg.decimals as i32);
    (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let theta = phase - (k as f64) * delta + jitter;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = r0 * (1.0 + u);
            let round = |x: f64| (x * scale).round() / scale;
            Point::new(round(r * theta.cos()), round(r * theta.sin()))
        })
        .collect()
}

fn has_duplicates(pts: &[Point]) -> bool {
    pts.iter()
        .enumerate()
        .any(|(i, p)| pts[i + 1..].iter().any(|q| q == p))
}
