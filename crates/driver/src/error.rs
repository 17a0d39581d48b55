//! Error taxonomy shared by every driver implementation.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by a [`crate::BrowserDriver`].
///
/// Any of these aborts the scenario that triggered it unless the call site
/// explicitly routes a timeout through [`crate::best_effort`].
#[derive(Debug, Error, Clone)]
pub enum DriverError {
    /// The locator resolved to zero elements at the moment of use.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// The locator resolved to more than one element where exactly one was
    /// required. Actions resolve first-match; state probes such as
    /// enablement demand uniqueness and surface this instead of guessing.
    #[error("ambiguous locator ({matches} matches): {locator}")]
    AmbiguousElement { locator: String, matches: usize },

    /// A wait or action exceeded its bound.
    #[error("{what} timed out after {after_ms}ms")]
    Timeout { what: String, after_ms: u64 },

    /// The underlying automation protocol failed.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The session was closed underneath the caller.
    #[error("session closed")]
    SessionClosed,

    /// The driver does not implement an optional capability.
    #[error("driver does not support {0}")]
    Unsupported(&'static str),
}

impl DriverError {
    pub fn timeout(what: impl Into<String>, after: Duration) -> Self {
        DriverError::Timeout {
            what: what.into(),
            after_ms: after.as_millis() as u64,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DriverError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_carries_bound() {
        let err = DriverError::timeout("wait for heading", Duration::from_secs(10));
        assert_eq!(err.to_string(), "wait for heading timed out after 10000ms");
        assert!(err.is_timeout());
    }

    #[test]
    fn only_timeouts_report_as_timeouts() {
        assert!(!DriverError::ElementNotFound("x".into()).is_timeout());
        assert!(!DriverError::SessionClosed.is_timeout());
    }
}
