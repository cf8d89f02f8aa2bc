//! Analytic IoU vs pixel-counting IoU on generated shape pairs.
//!
//! Per trial `i`: regenerate both shapes from `ReplayToken { seed, index: i }`,
//! evaluate them analytically, rasterize them into a `width × height` mask and
//! compare. A trial is flagged when the two IoUs differ by more than `tol`.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use polars::prelude::*;
use polyiou::geom2::Polygon;
use polyiou::iou::evaluate;
use polyiou::rand2::{ConvexCfg, Frame, ReplayToken, ShapeGenerator, VertexCount};
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

use crate::raster::{Mask, PixelCounts};

/// Shape family drawn per trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Box,
    Convex,
}

/// Run parameters, recorded verbatim in the provenance sidecar.
#[derive(Clone, Debug, Serialize)]
pub struct CrosscheckParams {
    pub family: Family,
    pub vertices: usize,
    pub trials: u64,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub tol: f64,
}

impl CrosscheckParams {
    fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            bail!("--trials must be > 0");
        }
        if self.width < 4 || self.height < 4 {
            bail!("raster must be at least 4x4, got {}x{}", self.width, self.height);
        }
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            bail!("--tol must be a finite non-negative number");
        }
        Ok(())
    }

    fn frame(&self) -> Frame {
        Frame {
            width: self.width as f64,
            height: self.height as f64,
        }
    }
}

/// One compared pair.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialRow {
    pub trial: u64,
    pub vertices_a: u32,
    pub vertices_b: u32,
    pub area_a: f64,
    pub area_b: f64,
    pub inter: f64,
    pub union: f64,
    pub iou: f64,
    pub px: PixelCounts,
    pub iou_px: f64,
    pub abs_err: f64,
    pub flagged: bool,
}

/// Aggregates over all trials.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub trials: u64,
    pub mean_abs_err: f64,
    pub max_abs_err: f64,
    pub flagged: u64,
}

fn draw_pair(params: &CrosscheckParams, trial: u64) -> Result<(Polygon<f64>, Polygon<f64>)> {
    let frame = params.frame();
    let mut gen = ShapeGenerator::from_replay(ReplayToken {
        seed: params.seed,
        index: trial,
    });
    let pair = match params.family {
        Family::Box => (gen.axis_aligned_box(frame)?, gen.axis_aligned_box(frame)?),
        Family::Convex => {
            let cfg = ConvexCfg {
                vertex_count: VertexCount::Fixed(params.vertices),
                ..ConvexCfg::default()
            };
            (gen.convex(cfg, frame)?, gen.convex(cfg, frame)?)
        }
    };
    Ok(pair)
}

/// Evaluate one trial.
pub fn run_trial(params: &CrosscheckParams, trial: u64) -> Result<TrialRow> {
    let (a, b) = draw_pair(params, trial).with_context(|| format!("drawing trial {trial}"))?;
    let report = evaluate(&a, &b).with_context(|| format!("evaluating trial {trial}"))?;
    let px = PixelCounts::between(
        &Mask::rasterize(&a, params.width, params.height),
        &Mask::rasterize(&b, params.width, params.height),
    );
    let iou_px = px.iou().unwrap_or(0.0);
    let abs_err = (iou_px - report.iou).abs();
    let flagged = abs_err > params.tol;
    if flagged {
        tracing::debug!(trial, iou = report.iou, iou_px, abs_err, "trial_flagged");
    }
    Ok(TrialRow {
        trial,
        vertices_a: a.len() as u32,
        vertices_b: b.len() as u32,
        area_a: report.area_a,
        area_b: report.area_b,
        inter: report.intersection,
        union: report.union,
        iou: report.iou,
        px,
        iou_px,
        abs_err,
        flagged,
    })
}

/// Evaluate all trials in order.
pub fn run(params: &CrosscheckParams) -> Result<Vec<TrialRow>> {
    params.validate()?;
    (0..params.trials).map(|t| run_trial(params, t)).collect()
}

/// Column-oriented view of the rows.
pub fn rows_to_frame(rows: &[TrialRow]) -> PolarsResult<DataFrame> {
    let col_f64 = |f: fn(&TrialRow) -> f64| rows.iter().map(f).collect::<Vec<f64>>();
    let col_u64 = |f: fn(&TrialRow) -> u64| rows.iter().map(f).collect::<Vec<u64>>();
    df!(
        "trial" => col_u64(|r| r.trial),
        "vertices_a" => rows.iter().map(|r| r.vertices_a).collect::<Vec<u32>>(),
        "vertices_b" => rows.iter().map(|r| r.vertices_b).collect::<Vec<u32>>(),
        "area_a" => col_f64(|r| r.area_a),
        "area_b" => col_f64(|r| r.area_b),
        "inter" => col_f64(|r| r.inter),
        "union" => col_f64(|r| r.union),
        "iou" => col_f64(|r| r.iou),
        "n1_px" => col_u64(|r| r.px.n1),
        "n2_px" => col_u64(|r| r.px.n2),
        "inter_px" => col_u64(|r| r.px.inter),
        "union_px" => col_u64(|r| r.px.union),
        "iou_px" => col_f64(|r| r.iou_px),
        "abs_err" => col_f64(|r| r.abs_err),
        "flagged" => rows.iter().map(|r| r.flagged).collect::<Vec<bool>>()
    )
}

/// Mean / max absolute error and flagged count, computed lazily.
pub fn summarize(df: &DataFrame) -> PolarsResult<Summary> {
    let out = df
        .clone()
        .lazy()
        .select([
            len().alias("trials"),
            col("abs_err").mean().alias("mean_abs_err"),
            col("abs_err").max().alias("max_abs_err"),
            col("flagged").cast(DataType::UInt32).sum().alias("flagged"),
        ])
        .collect()?;
    let scalar = |name: &str| -> PolarsResult<f64> {
        Ok(out.column(name)?.get(0)?.extract::<f64>().unwrap_or(f64::NAN))
    };
    Ok(Summary {
        trials: scalar("trials")? as u64,
        mean_abs_err: scalar("mean_abs_err")?,
        max_abs_err: scalar("max_abs_err")?,
        flagged: scalar("flagged")? as u64,
    })
}

/// Write the table as CSV or Parquet, chosen by the extension of `out`.
pub fn write_table(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let ext = out.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !matches!(ext, "csv" | "parquet") {
        bail!("unsupported output extension {ext:?}; use .csv or .parquet");
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    if ext == "csv" {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("writing {}", out.display()))?;
    } else {
        ParquetWriter::new(file)
            .finish(df)
            .with_context(|| format!("writing {}", out.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn params(family: Family, trials: u64) -> CrosscheckParams {
        CrosscheckParams {
            family,
            vertices: 6,
            trials,
            width: 200,
            height: 200,
            seed: 2018,
            tol: 0.05,
        }
    }

    #[test]
    fn boxes_agree_exactly() {
        let rows = run(&params(Family::Box, 25)).unwrap();
        assert_eq!(rows.len(), 25);
        for r in &rows {
            // Integer corners: every pixel is fully in or out.
            assert_eq!(r.px.n1 as f64, r.area_a);
            assert!((r.px.inter as f64 - r.inter).abs() < 1e-6);
            assert!(r.abs_err < 1e-9);
            assert!(!r.flagged);
        }
    }

    #[test]
    fn convex_pairs_agree_within_tolerance() {
        let rows = run(&params(Family::Convex, 20)).unwrap();
        assert!(rows.iter().all(|r| r.vertices_a == 6 && r.vertices_b == 6));
        assert!(rows.iter().all(|r| (0.0..=1.0).contains(&r.iou)));
        assert!(rows.iter().all(|r| !r.flagged), "{rows:?}");
    }

    #[test]
    fn trials_replay_independently() {
        let p = params(Family::Convex, 5);
        let all = run(&p).unwrap();
        assert_eq!(run_trial(&p, 3).unwrap(), all[3]);
    }

    #[test]
    fn invalid_params_are_rejected() {
        assert!(run(&params(Family::Box, 0)).is_err());
        let mut p = params(Family::Box, 1);
        p.width = 2;
        assert!(run(&p).is_err());
        p.width = 100;
        p.tol = f64::NAN;
        assert!(run(&p).is_err());
    }

    #[test]
    fn summary_over_rows() {
        let rows = run(&params(Family::Box, 10)).unwrap();
        let df = rows_to_frame(&rows).unwrap();
        assert_eq!(df.height(), 10);
        let s = summarize(&df).unwrap();
        assert_eq!(s.trials, 10);
        assert_eq!(s.flagged, 0);
        assert!(s.max_abs_err < 1e-9);
        assert!(s.mean_abs_err <= s.max_abs_err);
    }

    #[test]
    fn writes_csv_and_parquet() {
        let dir = tempdir().unwrap();
        let rows = run(&params(Family::Convex, 4)).unwrap();
        let mut df = rows_to_frame(&rows).unwrap();

        let csv = dir.path().join("nested").join("trials.csv");
        write_table(&mut df, &csv).unwrap();
        let back = LazyCsvReader::new(&csv)
            .with_infer_schema_length(Some(100))
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(back.shape(), df.shape());

        let pq = dir.path().join("trials.parquet");
        write_table(&mut df, &pq).unwrap();
        let back = ParquetReader::new(File::open(&pq).unwrap()).finish().unwrap();
        assert_eq!(back.shape(), df.shape());

        let err = write_table(&mut df, &dir.path().join("trials.txt")).unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }
}
