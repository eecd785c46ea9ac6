//! Provenance sidecars for `--out` reports.
//!
//! A report `routes/downtown.json` gets `routes/downtown.provenance.json`
//! recording the code revision, the library version, the call site that wrote
//! it, the effective parameters and the inputs it was computed from.

use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// What went into a report.
pub struct Payload {
    /// Effective route configuration and budgets.
    pub params: Value,
    /// Problem files read, or the replay token for sampled grids.
    pub inputs: Vec<String>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }
}

#[derive(Serialize)]
struct CallSite<'a> {
    file: &'a str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    sweep_version: &'static str,
    callsite: CallSite<'a>,
    params: &'a Value,
    inputs: &'a [String],
    outputs: [String; 1],
}

/// Write the sidecar of `report` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(report: P, payload: Payload) -> Result<PathBuf> {
    let report = report.as_ref();
    let caller = Location::caller();
    let sidecar = Sidecar {
        code_rev: current_git_rev(),
        sweep_version: sweep::VERSION,
        callsite: CallSite {
            file: caller.file(),
            line: caller.line(),
        },
        params: &payload.params,
        inputs: &payload.inputs,
        outputs: [report.display().to_string()],
    };
    let path = sidecar_path(report);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let bytes = serde_json::to_vec_pretty(&sidecar)?;
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `downtown.json` -> `downtown.provenance.json`; extensionless names keep their stem.
fn sidecar_path(report: &Path) -> PathBuf {
    report.with_extension("provenance.json")
}

/// Revision of the running code: `GIT_COMMIT` (build time, then run time),
/// else `git rev-parse HEAD`, else `unknown`.
pub fn current_git_rev() -> String {
    let nonempty = |rev: &String| !rev.is_empty();
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .filter(nonempty)
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(nonempty))
        .or_else(rev_parse_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn rev_parse_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout).ok().map(|s| s.trim().to_owned())
}
