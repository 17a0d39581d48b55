//! Run reports and failure artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::trace::TraceEntry;

/// Terminal state of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Status {
    Passed,
    Failed { kind: String, error: String },
    Skipped { reason: String },
}

impl Status {
    pub fn is_failed(&self) -> bool {
        matches!(self, Status::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Trace,
    Screenshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub id: String,
    pub title: String,
    pub group: String,
    #[serde(flatten)]
    pub status: Status,
    pub attempts: u32,
    pub duration_ms: u64,
    pub artifacts: Vec<Artifact>,
}

/// Aggregated run outcome, persisted as `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn from_results(
        suite: &str,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        results: Vec<ScenarioReport>,
    ) -> Self {
        let passed = results
            .iter()
            .filter(|r| r.status == Status::Passed)
            .count();
        let failed = results.iter().filter(|r| r.status.is_failed()).count();
        let skipped = results
            .iter()
            .filter(|r| matches!(r.status, Status::Skipped { .. }))
            .count();
        Self {
            suite: suite.to_string(),
            started_at,
            duration_ms,
            total: results.len(),
            passed,
            failed,
            skipped,
            results,
        }
    }

    /// Exit contract: success iff no non-skipped scenario failed. Skips
    /// (including declared fixmes) never fail a run.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Human summary printed at the end of a run and by the `report`
    /// subcommand.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            let line = match &result.status {
                Status::Passed => format!("  ok      {} {}", result.id, result.title),
                Status::Failed { error, .. } => {
                    format!("  FAILED  {} {}: {}", result.id, result.title, error)
                }
                Status::Skipped { reason } => {
                    format!("  skipped {} {} ({})", result.id, result.title, reason)
                }
            };
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&format!(
            "{}: {} passed, {} failed, {} skipped in {:.1}s\n",
            self.suite,
            self.passed,
            self.failed,
            self.skipped,
            self.duration_ms as f64 / 1000.0
        ));
        out
    }
}

/// Filesystem store for failure diagnostics and the final report.
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist the action trace and, when the driver provided one, a
    /// screenshot for a failed attempt. Artifact trouble is logged, never
    /// escalated: diagnostics must not mask the original failure.
    pub fn persist_failure(
        &self,
        scenario_id: &str,
        attempt: u32,
        trace: &[TraceEntry],
        screenshot: Option<&[u8]>,
    ) -> Vec<Artifact> {
        let dir = self.root.join(scenario_id).join(format!("attempt-{attempt}"));
        if let Err(err) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %err, "cannot create artifact dir");
            return Vec::new();
        }

        let mut artifacts = Vec::new();

        let trace_path = dir.join("trace.json");
        match serde_json::to_vec_pretty(trace) {
            Ok(bytes) => match fs::write(&trace_path, bytes) {
                Ok(()) => artifacts.push(Artifact {
                    kind: ArtifactKind::Trace,
                    path: trace_path,
                }),
                Err(err) => warn!(error = %err, "cannot write trace artifact"),
            },
            Err(err) => warn!(error = %err, "cannot serialize trace"),
        }

        if let Some(png) = screenshot {
            let shot_path = dir.join("screenshot.png");
            match fs::write(&shot_path, png) {
                Ok(()) => artifacts.push(Artifact {
                    kind: ArtifactKind::Screenshot,
                    path: shot_path,
                }),
                Err(err) => warn!(error = %err, "cannot write screenshot artifact"),
            }
        }

        info!(
            scenario = scenario_id,
            attempt,
            artifacts = artifacts.len(),
            "failure artifacts captured"
        );
        artifacts
    }

    pub fn write_report(&self, report: &SuiteReport) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join("report.json");
        fs::write(&path, serde_json::to_vec_pretty(report)?)?;
        Ok(path)
    }

    pub fn read_report(path: &Path) -> anyhow::Result<SuiteReport> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
