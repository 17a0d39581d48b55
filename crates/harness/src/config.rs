//! Suite configuration.
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `TRACKER_E2E_*` environment overrides. Read once at suite start; the
//! harness only consumes it as default timeout values and runner limits.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Browser viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Positions of the three identically-named comboboxes in the creation
/// modal. The target application labels project, priority and assignee all
/// as "Проект", so the operations must pick by ordinal, a fragile contract
/// kept configurable instead of hard-coded, so a field reorder is a config
/// change rather than a code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboboxOrdinals {
    pub project: usize,
    pub priority: usize,
    pub assignee: usize,
}

impl Default for ComboboxOrdinals {
    fn default() -> Self {
        // Observed modal layout; index 2 is an unrelated status combobox.
        Self {
            project: 0,
            priority: 1,
            assignee: 3,
        }
    }
}

/// All knobs for one suite run. Defaults mirror the deployed instance and
/// the original run profile (headless 1280x720, 5s action/assertion bounds,
/// 10s navigation bound).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Base address of the application under test.
    pub base_url: String,

    pub headless: bool,
    pub viewport: Viewport,

    /// Bound for element-targeting actions (click, fill, key press).
    pub action_timeout_ms: u64,

    /// Bound for assertions/waits unless a call site overrides it.
    pub expect_timeout_ms: u64,

    pub navigation_timeout_ms: u64,

    /// Bound for the list-view marker in the setup contract.
    pub ready_timeout_ms: u64,

    /// Bound for the best-effort spinner-absence wait.
    pub spinner_timeout_ms: u64,

    /// Max scenarios running concurrently, each on its own session.
    pub workers: usize,

    /// Extra attempts after a first failure.
    pub retries: u32,

    pub artifacts_dir: PathBuf,

    pub comboboxes: ComboboxOrdinals,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://avito-tech-internship-psi.vercel.app/".to_string(),
            headless: true,
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            action_timeout_ms: 5_000,
            expect_timeout_ms: 5_000,
            navigation_timeout_ms: 10_000,
            ready_timeout_ms: 10_000,
            spinner_timeout_ms: 5_000,
            workers: 4,
            retries: 0,
            artifacts_dir: PathBuf::from("e2e-artifacts"),
            comboboxes: ComboboxOrdinals::default(),
        }
    }
}

impl SuiteConfig {
    /// Load defaults, an optional TOML file and `TRACKER_E2E_*` overrides
    /// (double underscore for nesting, e.g. `TRACKER_E2E_VIEWPORT__WIDTH`).
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&SuiteConfig::default())?);
        if let Some(file) = file {
            builder = builder.add_source(File::from(file));
        }
        let loaded: SuiteConfig = builder
            .add_source(
                Environment::with_prefix("TRACKER_E2E")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("building configuration")?
            .try_deserialize()
            .context("deserializing configuration")?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> anyhow::Result<()> {
        url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url: {}", self.base_url))?;
        anyhow::ensure!(self.workers > 0, "workers must be at least 1");
        Ok(())
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    pub fn expect_timeout(&self) -> Duration {
        Duration::from_millis(self.expect_timeout_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn spinner_timeout(&self) -> Duration {
        Duration::from_millis(self.spinner_timeout_ms)
    }
}
