use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use tracker_harness::Mode;

use crate::scenarios;

#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Same substring filter as `run --filter`.
    #[arg(short, long)]
    pub filter: Option<String>,
}

pub fn cmd_list(args: ListArgs) -> Result<ExitCode> {
    let suite = scenarios::suite();
    for scenario in suite.select(args.filter.as_deref()) {
        match scenario.mode {
            Mode::Normal => {
                println!("{}  [{}] {}", scenario.id, scenario.group, scenario.title)
            }
            Mode::Fixme { reason } => println!(
                "{}  [{}] {} (fixme: {})",
                scenario.id, scenario.group, scenario.title, reason
            ),
        }
    }
    Ok(ExitCode::SUCCESS)
}
