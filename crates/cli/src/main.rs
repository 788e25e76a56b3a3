mod log;
mod provenance;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polars::prelude::*;
use polydecomp::api::{
    decompose, decompose_with, draw_star_polygon, read_polygon, write_polygon,
    write_visualisation, Polygon, SearchCfg, StarCfg, StarReplay, VertexCount,
};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::log::LogWriter;
use crate::provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "polydecomp")]
#[command(about = "Convex decomposition of simple polygons")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decompose inputDemo<N>.txt; write the log and the visualiser file
    Run(RunArgs),
    /// Write a random clockwise star polygon in the input format
    Generate {
        #[arg(long, default_value_t = 12)]
        vertices: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Time the full search over growing star polygons; write a CSV table
    Bench {
        #[arg(long, default_value_t = 4)]
        min: usize,
        #[arg(long, default_value_t = 64)]
        max: usize,
        #[arg(long, default_value_t = 4)]
        step: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct RunArgs {
    /// Demo number selecting the input/output file pair
    #[arg(long)]
    index: u32,
    #[arg(long, env = "POLYDECOMP_INPUT_DIR", default_value = "Inputs")]
    input_dir: PathBuf,
    #[arg(long, env = "POLYDECOMP_OUTPUT_DIR", default_value = "Outputs")]
    output_dir: PathBuf,
    #[arg(long, env = "POLYDECOMP_VIS_DIR", default_value = "Visualisations/Inputs")]
    vis_dir: PathBuf,
    /// Run every starting offset, even when its first partition repeats
    #[arg(long)]
    no_dedup: bool,
}

/// Result summary recorded in the provenance sidecar.
#[derive(Debug, Serialize)]
struct RunSummary {
    vertices: usize,
    faces: usize,
    offset: usize,
    ties: usize,
    explored: usize,
    skipped: usize,
    micros: u64,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run(args) => run(&args).map(|_| ()),
        Action::Generate {
            vertices,
            seed,
            out,
        } => generate(vertices, seed, &out),
        Action::Bench {
            min,
            max,
            step,
            seed,
            out,
        } => bench(min, max, step, seed, &out),
        Action::Report => report(),
    }
}

fn run(args: &RunArgs) -> Result<RunSummary> {
    let input = args.input_dir.join(format!("inputDemo{}.txt", args.index));
    let output = args.output_dir.join(format!("outputDemo{}.txt", args.index));
    let vis = args
        .vis_dir
        .join(format!("visualisationDemo{}_ans.txt", args.index));
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        vis = %vis.display(),
        dedup = !args.no_dedup,
        "run"
    );

    let start = Instant::now();
    let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
    let poly = read_polygon(BufReader::new(file))
        .with_context(|| format!("parsing {}", input.display()))?;
    if !poly.is_clockwise() {
        tracing::warn!(
            vertices = poly.len(),
            "input polygon is not clockwise; results are undefined"
        );
    }

    ensure_parent(&output)?;
    let out = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    let mut log = LogWriter::new(BufWriter::new(out));
    log.original(&poly);
    let cfg = SearchCfg {
        dedup_rotations: !args.no_dedup,
    };
    let res = decompose_with(&poly, cfg, &mut log)
        .with_context(|| format!("decomposing {}", input.display()))?;
    let best = res.best();
    let adjacency = best.graph.adjacency();
    log.adjacency(&adjacency);
    let micros = start.elapsed().as_micros() as u64;
    log.summary(poly.len(), micros);
    log.finish()
        .with_context(|| format!("writing {}", output.display()))?;

    ensure_parent(&vis)?;
    let vis_file = File::create(&vis).with_context(|| format!("creating {}", vis.display()))?;
    write_visualisation(BufWriter::new(vis_file), &adjacency)
        .with_context(|| format!("writing {}", vis.display()))?;

    let summary = RunSummary {
        vertices: poly.len(),
        faces: best.faces,
        offset: best.offset,
        ties: res.minimal.len(),
        explored: res.explored.len(),
        skipped: res.skipped.len(),
        micros,
    };
    tracing::info!(
        faces = summary.faces,
        offset = summary.offset,
        ties = summary.ties,
        micros = summary.micros,
        "decomposed"
    );
    let payload = Payload::new(json!({
        "index": args.index,
        "input": input.to_string_lossy(),
        "dedup_rotations": cfg.dedup_rotations,
    }))
    .with_summary(serde_json::to_value(&summary)?)
    .with_output(&vis);
    write_sidecar(&output, payload)?;
    Ok(summary)
}

fn star(vertices: usize, seed: u64) -> Result<Polygon> {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(vertices),
        ..StarCfg::default()
    };
    draw_star_polygon(cfg, StarReplay { seed, index: 0 })
        .with_context(|| format!("no star polygon with {vertices} distinct vertices for seed {seed}"))
}

fn generate(vertices: usize, seed: u64, out: &Path) -> Result<()> {
    tracing::info!(vertices, seed, out = %out.display(), "generate");
    let poly = star(vertices, seed)?;
    ensure_parent(out)?;
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    write_polygon(BufWriter::new(file), &poly)
        .with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(
        out,
        Payload::new(json!({ "vertices": vertices, "seed": seed, "sampler": "star" })),
    )?;
    Ok(())
}

fn bench(min: usize, max: usize, step: usize, seed: u64, out: &Path) -> Result<()> {
    tracing::info!(min, max, step, seed, out = %out.display(), "bench");
    let mut vertices: Vec<i64> = Vec::new();
    let mut faces: Vec<i64> = Vec::new();
    let mut micros: Vec<i64> = Vec::new();
    for n in (min.max(3)..=max).step_by(step.max(1)) {
        let poly = star(n, seed.wrapping_add(n as u64))?;
        let start = Instant::now();
        let res = decompose(&poly);
        let elapsed = start.elapsed().as_micros() as i64;
        match res {
            Ok(res) => {
                vertices.push(n as i64);
                faces.push(res.min_faces as i64);
                micros.push(elapsed);
            }
            Err(e) => tracing::warn!(vertices = n, error = %e, "skipped"),
        }
    }

    let mut df = df!(
        "vertices" => &vertices,
        "faces" => &faces,
        "micros" => &micros,
    )?;
    let stats = df
        .clone()
        .lazy()
        .select([
            col("micros").mean().alias("mean_micros"),
            col("micros").max().alias("max_micros"),
        ])
        .collect()?;
    tracing::info!(rows = df.height(), "timing table");
    println!("{stats}");

    ensure_parent(out)?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .finish(&mut df)
        .with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(
        out,
        Payload::new(json!({ "min": min, "max": max, "step": step, "seed": seed })),
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "tool": "polydecomp",
        "version": polydecomp::VERSION,
        "code_rev": provenance::current_git_rev(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
