use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use parcel::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod input;
mod provenance;
mod replay;

#[derive(Parser)]
#[command(name = "parcel")]
#[command(about = "Measure parcel polygons and split their area along a line")]
struct Cmd {
    /// Optional run tag; propagated to logs and provenance
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Polygon area in source units²
    Area {
        #[arg(long)]
        polygon: PathBuf,
    },
    /// Point-in-polygon test
    Contains {
        #[arg(long)]
        polygon: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Clip a polygon to a window given as X,Y,W,H
    Clip {
        #[arg(long)]
        polygon: PathBuf,
        #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
        window: Rect,
    },
    /// Split the parcel's known area along a vertical or horizontal line
    Split {
        #[arg(long)]
        polygon: PathBuf,
        #[arg(long)]
        total_area: f64,
        #[arg(long, default_value_t = Direction::Vertical)]
        direction: Direction,
        #[arg(long, allow_negative_numbers = true)]
        at: f64,
        /// Source image width
        #[arg(long)]
        width: f64,
        /// Source image height
        #[arg(long)]
        height: f64,
        /// Write JSON here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay a JSON list of session events and print the final state
    Replay {
        #[arg(long)]
        events: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Area { polygon } => area_cmd(&polygon, cmd.tag),
        Action::Contains { polygon, x, y } => contains_cmd(&polygon, x, y, cmd.tag),
        Action::Clip { polygon, window } => clip_cmd(&polygon, window, cmd.tag),
        Action::Split {
            polygon,
            total_area,
            direction,
            at,
            width,
            height,
            out,
        } => split_cmd(
            &polygon,
            total_area,
            SplitSpec {
                direction,
                at: Some(at),
            },
            Extent::new(width, height),
            out,
            cmd.tag,
        ),
        Action::Replay { events, out } => replay_cmd(&events, out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn area_cmd(path: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(polygon = %path.display(), tag = ?tag, "area");
    let poly = input::load_polygon(path)?;
    emit(&json!({ "vertices": poly.len(), "area": poly.area() }), None, None)
}

fn contains_cmd(path: &Path, x: f64, y: f64, tag: Option<String>) -> Result<()> {
    tracing::info!(polygon = %path.display(), x, y, tag = ?tag, "contains");
    let poly = input::load_polygon(path)?;
    let inside = poly.contains(Point::new(x, y));
    emit(&json!({ "point": [x, y], "inside": inside }), None, None)
}

fn clip_cmd(path: &Path, window: Rect, tag: Option<String>) -> Result<()> {
    tracing::info!(polygon = %path.display(), window = ?window, tag = ?tag, "clip");
    let poly = input::load_polygon(path)?;
    let clipped = poly.clipped(&window);
    emit(
        &json!({
            "window": [window.x, window.y, window.width, window.height],
            "vertices": points_json(&clipped.vertices),
            "area": clipped.area(),
        }),
        None,
        None,
    )
}

fn split_cmd(
    path: &Path,
    total_area: f64,
    spec: SplitSpec,
    extent: Extent,
    out: Option<PathBuf>,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(
        polygon = %path.display(),
        total_area,
        direction = %spec.direction,
        at = ?spec.at,
        width = extent.width,
        height = extent.height,
        tag = ?tag,
        "split"
    );
    if !extent.is_valid() {
        bail!("image extent must be positive (got {}x{})", extent.width, extent.height);
    }
    let poly = input::load_polygon(path)?;
    let result = evaluate(&poly, total_area, &spec, extent);
    if !result.is_computed() {
        tracing::warn!(
            vertices = poly.len(),
            total_area,
            "split not computable; emitting zero result"
        );
    }
    let params = json!({
        "polygon": path.to_string_lossy(),
        "total_area": total_area,
        "direction": spec.direction.to_string(),
        "at": spec.at,
        "extent": [extent.width, extent.height],
    });
    let payload = provenance::Payload::new(params, tag).with_split(&result, total_area);
    emit(&result_json(&result), out.as_deref(), Some(payload))
}

fn replay_cmd(path: &Path, out: Option<PathBuf>, tag: Option<String>) -> Result<()> {
    tracing::info!(events = %path.display(), tag = ?tag, "replay");
    let script = replay::load_script(path)?;
    let (session, rejected) = replay::run(&script);
    let params = json!({ "events": path.to_string_lossy(), "count": script.events.len() });
    let payload = provenance::Payload::new(params, tag)
        .with_phase(session.phase())
        .with_split(session.result(), session.total_area());
    emit(
        &replay::session_json(&session, rejected),
        out.as_deref(),
        Some(payload),
    )
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": parcel::VERSION,
        "tag": tag,
        "tolerances": {
            "eps_inside": GeomCfg::default().eps_inside,
            "eps_parallel": GeomCfg::default().eps_parallel,
            "eps_area": GeomCfg::default().eps_area,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Print `value` to stdout, or write it to `out` with a provenance sidecar.
fn emit(value: &Value, out: Option<&Path>, payload: Option<provenance::Payload>) -> Result<()> {
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)?;
    if let Some(payload) = payload {
        let sidecar = provenance::write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), provenance = %sidecar.display(), "written");
    }
    Ok(())
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("window must be X,Y,W,H: {e}"))?;
    match parts[..] {
        [x, y, w, h] => Ok(Rect::new(x, y, w, h)),
        _ => Err(format!("window must have 4 numbers, got {}", parts.len())),
    }
}

pub(crate) fn points_json(points: &[Point]) -> Value {
    Value::from(points.iter().map(|p| json!([p.x, p.y])).collect::<Vec<_>>())
}

pub(crate) fn result_json(r: &SplitResult) -> Value {
    json!({
        "computed": r.is_computed(),
        "area1": r.area1,
        "area2": r.area2,
        "label1": r.label1,
        "label2": r.label2,
        "percentages": r.percentages().map(|(a, b)| [a, b]),
        "sub1": points_json(&r.sub1.vertices),
        "sub2": points_json(&r.sub2.vertices),
    })
}
