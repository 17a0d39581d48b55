use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use tracker_cdp::{CdpBrowser, CdpBrowserConfig};
use tracker_driver::SessionFactory;
use tracker_harness::{ArtifactStore, Runner, SuiteConfig};

use crate::scenarios;

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Only run scenarios whose id, title or group contains this substring.
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Configuration file (TOML); defaults and env overrides apply either way.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run with a visible browser window.
    #[arg(long)]
    pub headed: bool,

    /// Override the artifact/report directory.
    #[arg(long)]
    pub artifacts: Option<PathBuf>,
}

pub async fn cmd_run(args: RunArgs) -> Result<ExitCode> {
    let mut config = SuiteConfig::load(args.config.as_deref())?;
    if args.headed {
        config.headless = false;
    }
    if let Some(dir) = args.artifacts {
        config.artifacts_dir = dir;
    }
    let config = Arc::new(config);

    let browser = Arc::new(
        CdpBrowser::launch(CdpBrowserConfig {
            headless: config.headless,
            viewport_width: config.viewport.width,
            viewport_height: config.viewport.height,
            executable: None,
            request_timeout: Duration::from_secs(30),
        })
        .await
        .context("launching browser")?,
    );

    let factory: Arc<dyn SessionFactory> = Arc::clone(&browser) as _;
    let runner = Runner::new(factory, Arc::clone(&config));
    let suite = scenarios::suite();
    let report = runner.run(&suite, args.filter.as_deref()).await;
    drop(runner);

    match Arc::try_unwrap(browser) {
        Ok(browser) => {
            if let Err(err) = browser.shutdown().await {
                warn!(error = %err, "browser shutdown failed");
            }
        }
        Err(_) => warn!("browser still referenced at shutdown; leaving process to clean up"),
    }

    let store = ArtifactStore::new(config.artifacts_dir.clone());
    let path = store.write_report(&report).context("writing report")?;
    print!("{}", report.render_summary());
    println!("report: {}", path.display());

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
