//! Scenario and suite definitions.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::config::SuiteConfig;
use crate::error::ScenarioError;
use crate::trace::RecordingDriver;

pub type ScenarioResult = Result<(), ScenarioError>;

/// Body of one scenario (or the shared setup): runs against the session in
/// its context, strictly sequentially.
pub type ScenarioFn = fn(Arc<ScenarioCtx>) -> BoxFuture<'static, ScenarioResult>;

/// How a scenario participates in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,

    /// Known defect in the target application: declared, never executed,
    /// reported as skipped with the reason. Distinct from a failure.
    Fixme { reason: &'static str },
}

/// One independent, named test case.
#[derive(Clone, Copy)]
pub struct Scenario {
    /// Stable human-readable code, e.g. `TC_E2E_05`.
    pub id: &'static str,

    pub title: &'static str,

    /// Grouping label for reports (mirrors the original describe blocks).
    pub group: &'static str,

    pub mode: Mode,

    pub run: ScenarioFn,
}

impl Scenario {
    pub const fn new(
        id: &'static str,
        title: &'static str,
        group: &'static str,
        run: ScenarioFn,
    ) -> Self {
        Self {
            id,
            title,
            group,
            mode: Mode::Normal,
            run,
        }
    }

    pub const fn fixme(
        id: &'static str,
        title: &'static str,
        group: &'static str,
        reason: &'static str,
        run: ScenarioFn,
    ) -> Self {
        Self {
            id,
            title,
            group,
            mode: Mode::Fixme { reason },
            run,
        }
    }

    /// Name-pattern filter used by `run --filter`: substring over id, title
    /// and group, case-insensitive.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        self.id.to_lowercase().contains(&needle)
            || self.title.to_lowercase().contains(&needle)
            || self.group.to_lowercase().contains(&needle)
    }
}

/// The fixed catalog plus the setup contract run before every scenario.
pub struct Suite {
    pub name: &'static str,
    pub setup: ScenarioFn,
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    pub fn select<'a>(&'a self, filter: Option<&str>) -> Vec<&'a Scenario> {
        self.scenarios
            .iter()
            .filter(|scenario| filter.map_or(true, |f| scenario.matches_filter(f)))
            .collect()
    }
}

/// Everything a scenario body sees: the recorded session and the config.
pub struct ScenarioCtx {
    driver: Arc<RecordingDriver>,
    config: Arc<SuiteConfig>,
}

impl ScenarioCtx {
    pub fn new(driver: Arc<RecordingDriver>, config: Arc<SuiteConfig>) -> Self {
        Self { driver, config }
    }

    pub fn driver(&self) -> &RecordingDriver {
        &self.driver
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }
}
