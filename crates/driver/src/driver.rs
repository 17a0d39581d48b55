//! The browser session capability trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;
use crate::keys::Key;
use crate::locator::Locator;

/// One isolated browser session driving the target application.
///
/// Methods take a [`Locator`], never a cached element handle: resolution is
/// re-evaluated at the moment of each call because the application re-renders
/// asynchronously. Actions that target an element suspend until the element
/// resolves, bounded by `timeout`; waits suspend until their condition holds
/// or the bound elapses. Within one session calls are issued strictly
/// sequentially by the harness.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate the session to `url` and wait for the load to settle.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Click the element, resolving the locator first.
    async fn click(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError>;

    /// Replace the element's value with `text` (not append), firing the
    /// input events the application listens for.
    async fn fill(
        &self,
        locator: &Locator,
        text: &str,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Press a key on the element, or at page level when `locator` is `None`.
    async fn press_key(
        &self,
        locator: Option<&Locator>,
        key: Key,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Whether at least one match is currently rendered and visible.
    /// A snapshot, not a wait: zero matches is `Ok(false)`, not an error.
    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError>;

    /// Whether the match is enabled for interaction. The locator must
    /// resolve to exactly one element unless it carries an explicit `nth`;
    /// more surfaces [`DriverError::AmbiguousElement`].
    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError>;

    /// Number of currently rendered matches.
    async fn count(&self, locator: &Locator) -> Result<usize, DriverError>;

    /// Current page URL.
    async fn current_url(&self) -> Result<String, DriverError>;

    /// Suspend until the locator has a visible match.
    async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError>;

    /// Suspend until the locator has no visible match (absent counts).
    async fn wait_hidden(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError>;

    /// Suspend until the page URL matches the case-insensitive pattern.
    async fn wait_url_matches(&self, pattern: &str, timeout: Duration)
        -> Result<(), DriverError>;

    /// PNG screenshot of the current viewport. Optional capability; drivers
    /// without one report [`DriverError::Unsupported`] and the reporter
    /// skips the artifact.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        Err(DriverError::Unsupported("screenshot"))
    }

    /// Tear the session down. Idempotent.
    async fn close(&self) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Produces one fresh, isolated session per scenario. Factories are shared
/// across concurrently running scenarios and must hand out sessions that do
/// not observe each other's in-process state.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn BrowserDriver>, DriverError>;
}
