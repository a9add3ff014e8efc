use anyhow::{Context, Result};
use parcel::prelude::{GeomCfg, Phase, SplitResult};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an output file: the command's parameters, the run tag and,
/// for split runs, the outcome that was written.
pub struct Payload {
    pub params: Value,
    pub tag: Option<String>,
    pub phase: Option<Phase>,
    pub split: Option<Value>,
}

impl Payload {
    pub fn new(params: Value, tag: Option<String>) -> Self {
        Self {
            params,
            tag,
            phase: None,
            split: None,
        }
    }

    /// Record the split outcome so a sidecar can be checked without the output.
    pub fn with_split(mut self, result: &SplitResult, total_area: f64) -> Self {
        self.split = Some(split_summary(result, total_area));
        self
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// Areas, labels and sub-polygon sizes of `result`, with the deviation of
/// `area1 + area2` from `total_area` (null when not computed).
pub fn split_summary(result: &SplitResult, total_area: f64) -> Value {
    let computed = result.is_computed();
    json!({
        "computed": computed,
        "labels": [result.label1, result.label2],
        "areas": [result.area1, result.area2],
        "percentages": result.percentages().map(|(a, b)| [a, b]),
        "sub_vertices": [result.sub1.len(), result.sub2.len()],
        "sum_error": computed.then(|| result.area1 + result.area2 - total_area),
    })
}

/// Write `<stem>.provenance.json` beside `output`, recording git revision,
/// callsite, tolerances, tag, params, the split outcome and the output path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(output: P, payload: Payload) -> Result<PathBuf> {
    let output = output.as_ref();
    let sidecar = sidecar_path(output);
    if let Some(parent) = sidecar.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let cfg = GeomCfg::default();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": parcel::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "tolerances": {
            "eps_inside": cfg.eps_inside,
            "eps_parallel": cfg.eps_parallel,
            "eps_area": cfg.eps_area,
        },
        "tag": payload.tag,
        "params": payload.params,
        "phase": payload.phase.map(|p| p.to_string()),
        "split": payload.split,
        "outputs": [output.to_string_lossy()]
    });
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

fn sidecar_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".provenance.json");
    output.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
