use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use tracker_harness::ArtifactStore;

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    /// Path to a report.json written by `run`.
    pub file: PathBuf,
}

pub fn cmd_report(args: ReportArgs) -> Result<ExitCode> {
    let report = ArtifactStore::read_report(&args.file)
        .with_context(|| format!("reading report {}", args.file.display()))?;
    print!("{}", report.render_summary());
    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
