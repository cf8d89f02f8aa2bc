use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use polyiou::api::{area, area_intersection, area_union, evaluate, winding};
use polyiou::geom2::{point, Polygon};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod crosscheck;
mod provenance;
mod raster;

use crosscheck::{CrosscheckParams, Family};

#[derive(Parser)]
#[command(name = "polyiou")]
#[command(about = "Convex polygon IoU: evaluate pairs and cross-check against pixel counts")]
struct Cmd {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate two polygons given as "x,y x,y ..." and print the report as JSON
    Eval {
        #[arg(long, allow_hyphen_values = true)]
        a: String,
        #[arg(long, allow_hyphen_values = true)]
        b: String,
    },
    /// Compare analytic IoU with pixel-counting IoU on generated shapes
    Crosscheck {
        #[arg(long, value_enum, default_value_t = Family::Box)]
        family: Family,
        /// Vertices per polygon for the convex family
        #[arg(long, default_value_t = 6)]
        vertices: usize,
        #[arg(long, default_value_t = 50)]
        trials: u64,
        #[arg(long, default_value_t = 400)]
        width: u32,
        #[arg(long, default_value_t = 400)]
        height: u32,
        #[arg(long, default_value_t = 2018)]
        seed: u64,
        /// Flag trials whose |iou_px - iou| exceeds this
        #[arg(long, default_value_t = 0.05)]
        tol: f64,
        /// Output table (.csv or .parquet); a provenance sidecar is written next to it
        #[arg(long)]
        out: PathBuf,
        /// Exit non-zero if any trial is flagged
        #[arg(long)]
        strict: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Eval { a, b } => eval(&a, &b),
        Action::Crosscheck {
            family,
            vertices,
            trials,
            width,
            height,
            seed,
            tol,
            out,
            strict,
        } => {
            let params = CrosscheckParams {
                family,
                vertices,
                trials,
                width,
                height,
                seed,
                tol,
            };
            run_crosscheck(&params, &out, strict)
        }
        Action::Report => report(),
    }
}

/// Parse `"x,y x,y ..."` into a polygon, keeping the given vertex order.
fn parse_vertices(s: &str) -> Result<Polygon<f64>> {
    s.split_whitespace()
        .enumerate()
        .map(|(i, pair)| -> Result<_> {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("vertex {i} ({pair:?}) is not of the form x,y"))?;
            let x: f64 = x
                .trim()
                .parse()
                .with_context(|| format!("vertex {i}: bad x {x:?}"))?;
            let y: f64 = y
                .trim()
                .parse()
                .with_context(|| format!("vertex {i}: bad y {y:?}"))?;
            Ok(point(x, y))
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct EvalOut {
    winding_a: String,
    winding_b: String,
    area_a: f64,
    area_b: f64,
    intersection: f64,
    union: f64,
    iou: Option<f64>,
    error: Option<String>,
}

fn eval_polygons(a: &Polygon<f64>, b: &Polygon<f64>) -> EvalOut {
    let (winding_a, winding_b) = (format!("{:?}", winding(a)), format!("{:?}", winding(b)));
    match evaluate(a, b) {
        Ok(r) => EvalOut {
            winding_a,
            winding_b,
            area_a: r.area_a,
            area_b: r.area_b,
            intersection: r.intersection,
            union: r.union,
            iou: Some(r.iou),
            error: None,
        },
        // Sentinel values are reported as-is next to the error.
        Err(e) => EvalOut {
            winding_a,
            winding_b,
            area_a: area(a),
            area_b: area(b),
            intersection: area_intersection(a, b),
            union: area_union(a, b),
            iou: None,
            error: Some(e.to_string()),
        },
    }
}

fn eval(a: &str, b: &str) -> Result<()> {
    let pa = parse_vertices(a).context("parsing --a")?;
    let pb = parse_vertices(b).context("parsing --b")?;
    tracing::debug!(n_a = pa.len(), n_b = pb.len(), "eval");
    let out = eval_polygons(&pa, &pb);
    if let Some(err) = &out.error {
        tracing::warn!(error = %err, "evaluation failed");
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run_crosscheck(params: &CrosscheckParams, out: &Path, strict: bool) -> Result<()> {
    tracing::info!(
        family = ?params.family,
        vertices = params.vertices,
        trials = params.trials,
        width = params.width,
        height = params.height,
        seed = params.seed,
        tol = params.tol,
        out = %out.display(),
        "crosscheck"
    );
    let rows = crosscheck::run(params)?;
    let mut df = crosscheck::rows_to_frame(&rows)?;
    let summary = crosscheck::summarize(&df)?;
    crosscheck::write_table(&mut df, out)?;
    let payload = provenance::Payload::new(serde_json::to_value(params)?)
        .with_summary(serde_json::to_value(summary)?);
    let prov = provenance::write_sidecar(out, payload)?;
    tracing::info!(
        trials = summary.trials,
        mean_abs_err = summary.mean_abs_err,
        max_abs_err = summary.max_abs_err,
        flagged = summary.flagged,
        provenance = %prov.display(),
        "crosscheck_summary"
    );
    if strict && summary.flagged > 0 {
        bail!(
            "{} of {} trials exceed tol {}",
            summary.flagged,
            summary.trials,
            params.tol
        );
    }
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::header())?);
    Ok(())
}
