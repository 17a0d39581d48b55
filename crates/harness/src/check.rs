//! Assertion helpers.
//!
//! Thin wrappers that turn driver observations into scenario verdicts: a
//! wait that exhausts its bound here is an `AssertionFailed`, not a bare
//! timeout, because the caller asserted the condition would hold.

use std::time::Duration;

use tracker_driver::{BrowserDriver, Locator};

use crate::error::ScenarioError;

pub async fn expect_visible(
    driver: &dyn BrowserDriver,
    locator: &Locator,
    timeout: Duration,
) -> Result<(), ScenarioError> {
    match driver.wait_visible(locator, timeout).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_timeout() => Err(ScenarioError::assertion(format!(
            "expected {locator} to become visible within {}ms",
            timeout.as_millis()
        ))),
        Err(err) => Err(err.into()),
    }
}

pub async fn expect_hidden(
    driver: &dyn BrowserDriver,
    locator: &Locator,
    timeout: Duration,
) -> Result<(), ScenarioError> {
    match driver.wait_hidden(locator, timeout).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_timeout() => Err(ScenarioError::assertion(format!(
            "expected {locator} to disappear within {}ms",
            timeout.as_millis()
        ))),
        Err(err) => Err(err.into()),
    }
}

pub async fn expect_url_matches(
    driver: &dyn BrowserDriver,
    pattern: &str,
    timeout: Duration,
) -> Result<(), ScenarioError> {
    match driver.wait_url_matches(pattern, timeout).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_timeout() => {
            let url = driver.current_url().await.unwrap_or_default();
            Err(ScenarioError::assertion(format!(
                "expected url to match /{pattern}/i within {}ms, last saw {url:?}",
                timeout.as_millis()
            )))
        }
        Err(err) => Err(err.into()),
    }
}

/// Immediate count assertion, no wait. Use after an explicit wait has
/// already synchronized the view.
pub async fn expect_count_eq(
    driver: &dyn BrowserDriver,
    locator: &Locator,
    expected: usize,
) -> Result<(), ScenarioError> {
    let actual = driver.count(locator).await?;
    if actual == expected {
        Ok(())
    } else {
        Err(ScenarioError::assertion(format!(
            "expected {locator} count == {expected}, got {actual}"
        )))
    }
}

pub async fn expect_count_greater(
    driver: &dyn BrowserDriver,
    locator: &Locator,
    floor: usize,
) -> Result<(), ScenarioError> {
    let actual = driver.count(locator).await?;
    if actual > floor {
        Ok(())
    } else {
        Err(ScenarioError::assertion(format!(
            "expected {locator} count > {floor}, got {actual}"
        )))
    }
}

/// The control must currently be disabled. Read-only: probing enablement has
/// no side effect, so this check is idempotent.
pub async fn expect_disabled(
    driver: &dyn BrowserDriver,
    locator: &Locator,
) -> Result<(), ScenarioError> {
    if driver.is_enabled(locator).await? {
        Err(ScenarioError::assertion(format!(
            "expected {locator} to be disabled"
        )))
    } else {
        Ok(())
    }
}

/// Plain condition assertion for facts already computed by the scenario.
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<(), ScenarioError> {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::assertion(message))
    }
}
