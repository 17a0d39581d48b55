//! Scenario orchestration for the tracker E2E suite.
//!
//! The harness owns everything between "a catalog of named scenarios" and
//! "an exit code": per-scenario isolated sessions, the setup contract,
//! retries, action-trace recording, failure artifacts, and the suite report.
//! It knows nothing about the target application's UI; that contract lives
//! with the scenario catalog in the root package.

pub mod check;
pub mod config;
pub mod error;
pub mod fixture;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod trace;

pub use config::{ComboboxOrdinals, SuiteConfig, Viewport};
pub use error::ScenarioError;
pub use report::{Artifact, ArtifactKind, ArtifactStore, ScenarioReport, Status, SuiteReport};
pub use runner::Runner;
pub use scenario::{Mode, Scenario, ScenarioCtx, ScenarioFn, ScenarioResult, Suite};
pub use trace::{RecordingDriver, TraceEntry};
