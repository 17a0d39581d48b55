//! Scenario-level error taxonomy.

use thiserror::Error;
use tracker_driver::DriverError;

/// Anything that aborts one scenario. Other scenarios are unaffected: each
/// runs on its own session and the runner isolates failures per task.
#[derive(Debug, Error, Clone)]
pub enum ScenarioError {
    /// The browser driver failed: element not found, ambiguity, timeout,
    /// protocol trouble.
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// A post-action expectation did not hold within its bound.
    #[error("assertion failed: {0}")]
    AssertionFailed(String),

    /// The per-scenario setup contract could not be established.
    #[error("setup failed: {0}")]
    Setup(String),
}

impl ScenarioError {
    pub fn assertion(message: impl Into<String>) -> Self {
        ScenarioError::AssertionFailed(message.into())
    }

    /// Short classification used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioError::Driver(DriverError::ElementNotFound(_)) => "element-not-found",
            ScenarioError::Driver(DriverError::AmbiguousElement { .. }) => "ambiguous-element",
            ScenarioError::Driver(DriverError::Timeout { .. }) => "timeout",
            ScenarioError::Driver(_) => "driver",
            ScenarioError::AssertionFailed(_) => "assertion-failed",
            ScenarioError::Setup(_) => "setup",
        }
    }
}
