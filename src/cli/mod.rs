//! Command-line surface: run the suite, list the catalog, render a report.

pub mod list;
pub mod report;
pub mod run;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use list::{cmd_list, ListArgs};
pub use report::{cmd_report, ReportArgs};
pub use run::{cmd_run, RunArgs};

#[derive(Parser, Debug)]
#[command(
    name = "tracker-e2e",
    about = "Browser-driven end-to-end suite for the task tracker",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the deployed application.
    Run(RunArgs),

    /// List the scenario catalog without running anything.
    List(ListArgs),

    /// Render a previously written report and reproduce its exit code.
    Report(ReportArgs),
}

pub async fn dispatch(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Run(args) => cmd_run(args).await,
        Commands::List(args) => cmd_list(args),
        Commands::Report(args) => cmd_report(args),
    }
}
