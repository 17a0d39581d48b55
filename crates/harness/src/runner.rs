//! Suite runner.
//!
//! Executes the selected scenarios across isolated sessions, at most
//! `workers` concurrently. One scenario = one session per attempt; within a
//! session the scenario body issues driver calls strictly sequentially. A
//! failing scenario aborts only itself; its final attempt leaves a trace and
//! screenshot in the artifact store.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use tracker_driver::{BrowserDriver, SessionFactory};

use crate::config::SuiteConfig;
use crate::error::ScenarioError;
use crate::report::{ArtifactStore, ScenarioReport, Status, SuiteReport};
use crate::scenario::{Mode, Scenario, ScenarioCtx, Suite};
use crate::trace::{RecordingDriver, TraceEntry};

pub struct Runner {
    factory: Arc<dyn SessionFactory>,
    config: Arc<SuiteConfig>,
}

impl Runner {
    pub fn new(factory: Arc<dyn SessionFactory>, config: Arc<SuiteConfig>) -> Self {
        Self { factory, config }
    }

    pub async fn run(&self, suite: &Suite, filter: Option<&str>) -> SuiteReport {
        let started_at = Utc::now();
        let started = Instant::now();
        let selected = suite.select(filter);
        info!(
            suite = suite.name,
            selected = selected.len(),
            workers = self.config.workers,
            "starting run"
        );

        let store = Arc::new(ArtifactStore::new(self.config.artifacts_dir.clone()));
        let permits = Arc::new(Semaphore::new(self.config.workers));
        let mut tasks = JoinSet::new();

        for (index, scenario) in selected.iter().enumerate() {
            let scenario = **scenario;
            let factory = Arc::clone(&self.factory);
            let config = Arc::clone(&self.config);
            let store = Arc::clone(&store);
            let permits = Arc::clone(&permits);
            let setup = suite.setup;
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.expect("semaphore open");
                let report = run_scenario(factory, config, store, setup, scenario).await;
                (index, report)
            });
        }

        let mut results: Vec<(usize, ScenarioReport)> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => results.push(entry),
                // A panicking scenario body is a harness bug; surface it
                // loudly but keep the rest of the run alive.
                Err(err) => error!(error = %err, "scenario task panicked"),
            }
        }
        results.sort_by_key(|(index, _)| *index);

        let report = SuiteReport::from_results(
            suite.name,
            started_at,
            started.elapsed().as_millis() as u64,
            results.into_iter().map(|(_, report)| report).collect(),
        );
        info!(
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            "run finished"
        );
        report
    }
}

async fn run_scenario(
    factory: Arc<dyn SessionFactory>,
    config: Arc<SuiteConfig>,
    store: Arc<ArtifactStore>,
    setup: crate::scenario::ScenarioFn,
    scenario: Scenario,
) -> ScenarioReport {
    if let Mode::Fixme { reason } = scenario.mode {
        info!(scenario = scenario.id, reason, "declared fixme, not running");
        return ScenarioReport {
            id: scenario.id.to_string(),
            title: scenario.title.to_string(),
            group: scenario.group.to_string(),
            status: Status::Skipped {
                reason: reason.to_string(),
            },
            attempts: 0,
            duration_ms: 0,
            artifacts: Vec::new(),
        };
    }

    let started = Instant::now();
    let max_attempts = config.retries + 1;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match run_attempt(&factory, &config, setup, &scenario).await {
            Ok(()) => {
                info!(scenario = scenario.id, attempt, "passed");
                return ScenarioReport {
                    id: scenario.id.to_string(),
                    title: scenario.title.to_string(),
                    group: scenario.group.to_string(),
                    status: Status::Passed,
                    attempts: attempt,
                    duration_ms: started.elapsed().as_millis() as u64,
                    artifacts: Vec::new(),
                };
            }
            Err(failure) => {
                warn!(
                    scenario = scenario.id,
                    attempt,
                    error = %failure.error,
                    "attempt failed"
                );
                if attempt >= max_attempts {
                    let artifacts = store.persist_failure(
                        scenario.id,
                        attempt,
                        &failure.trace,
                        failure.screenshot.as_deref(),
                    );
                    return ScenarioReport {
                        id: scenario.id.to_string(),
                        title: scenario.title.to_string(),
                        group: scenario.group.to_string(),
                        status: Status::Failed {
                            kind: failure.error.kind().to_string(),
                            error: failure.error.to_string(),
                        },
                        attempts: attempt,
                        duration_ms: started.elapsed().as_millis() as u64,
                        artifacts,
                    };
                }
            }
        }
    }
}

struct AttemptFailure {
    error: ScenarioError,
    trace: Vec<TraceEntry>,
    screenshot: Option<Vec<u8>>,
}

async fn run_attempt(
    factory: &Arc<dyn SessionFactory>,
    config: &Arc<SuiteConfig>,
    setup: crate::scenario::ScenarioFn,
    scenario: &Scenario,
) -> Result<(), AttemptFailure> {
    let session = factory.open_session().await.map_err(|err| AttemptFailure {
        error: ScenarioError::Setup(format!("cannot open session: {err}")),
        trace: Vec::new(),
        screenshot: None,
    })?;
    let driver = Arc::new(RecordingDriver::new(session));
    let ctx = Arc::new(ScenarioCtx::new(Arc::clone(&driver), Arc::clone(config)));

    let outcome = match (setup)(Arc::clone(&ctx)).await {
        Ok(()) => (scenario.run)(ctx).await,
        Err(err) => Err(err),
    };

    let result = match outcome {
        Ok(()) => Ok(()),
        Err(error) => {
            // Diagnostics before teardown; the screenshot is best effort.
            let screenshot = driver.screenshot().await.ok();
            Err(AttemptFailure {
                error,
                trace: driver.trace(),
                screenshot,
            })
        }
    };

    if let Err(err) = driver.close().await {
        warn!(scenario = scenario.id, error = %err, "session close failed");
    }
    result
}
