//! Action trace recording.
//!
//! Every driver call a scenario makes is appended to an in-memory trace.
//! On failure the trace becomes the primary diagnostic artifact: it shows
//! exactly which action, against which locator, with what outcome and
//! latency, led up to the abort.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tracker_driver::{BrowserDriver, DriverError, Key, Locator};

/// One recorded driver call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub seq: usize,
    pub at: DateTime<Utc>,
    pub action: String,
    pub target: Option<String>,
    pub latency_ms: u64,
    /// `None` for success, otherwise the error rendered as text.
    pub error: Option<String>,
}

/// A [`BrowserDriver`] decorator that records every call before delegating.
pub struct RecordingDriver {
    inner: Box<dyn BrowserDriver>,
    entries: Mutex<Vec<TraceEntry>>,
}

impl RecordingDriver {
    pub fn new(inner: Box<dyn BrowserDriver>) -> Self {
        Self {
            inner,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the trace so far.
    pub fn trace(&self) -> Vec<TraceEntry> {
        self.entries.lock().expect("trace lock").clone()
    }

    fn record<T>(
        &self,
        action: &str,
        target: Option<String>,
        started: Instant,
        result: &Result<T, DriverError>,
    ) {
        let mut entries = self.entries.lock().expect("trace lock");
        let entry = TraceEntry {
            seq: entries.len(),
            at: Utc::now(),
            action: action.to_string(),
            target,
            latency_ms: started.elapsed().as_millis() as u64,
            error: result.as_ref().err().map(ToString::to_string),
        };
        debug!(
            action = %entry.action,
            target = entry.target.as_deref().unwrap_or("-"),
            latency_ms = entry.latency_ms,
            ok = entry.error.is_none(),
            "driver call"
        );
        entries.push(entry);
    }
}

#[async_trait]
impl BrowserDriver for RecordingDriver {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let started = Instant::now();
        let result = self.inner.navigate(url, timeout).await;
        self.record("navigate", Some(url.to_string()), started, &result);
        result
    }

    async fn click(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let started = Instant::now();
        let result = self.inner.click(locator, timeout).await;
        self.record("click", Some(locator.to_string()), started, &result);
        result
    }

    async fn fill(
        &self,
        locator: &Locator,
        text: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let started = Instant::now();
        let result = self.inner.fill(locator, text, timeout).await;
        // The text itself is fixture data, safe to keep in the trace.
        self.record(
            "fill",
            Some(format!("{locator} <- {text:?}")),
            started,
            &result,
        );
        result
    }

    async fn press_key(
        &self,
        locator: Option<&Locator>,
        key: Key,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let started = Instant::now();
        let result = self.inner.press_key(locator, key, timeout).await;
        let target = match locator {
            Some(locator) => format!("{key} on {locator}"),
            None => format!("{key} on page"),
        };
        self.record("press_key", Some(target), started, &result);
        result
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError> {
        let started = Instant::now();
        let result = self.inner.is_visible(locator).await;
        self.record("is_visible", Some(locator.to_string()), started, &result);
        result
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError> {
        let started = Instant::now();
        let result = self.inner.is_enabled(locator).await;
        self.record("is_enabled", Some(locator.to_string()), started, &result);
        result
    }

    async fn count(&self, locator: &Locator) -> Result<usize, DriverError> {
        let started = Instant::now();
        let result = self.inner.count(locator).await;
        self.record("count", Some(locator.to_string()), started, &result);
        result
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        let started = Instant::now();
        let result = self.inner.current_url().await;
        self.record("current_url", None, started, &result);
        result
    }

    async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let started = Instant::now();
        let result = self.inner.wait_visible(locator, timeout).await;
        self.record("wait_visible", Some(locator.to_string()), started, &result);
        result
    }

    async fn wait_hidden(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let started = Instant::now();
        let result = self.inner.wait_hidden(locator, timeout).await;
        self.record("wait_hidden", Some(locator.to_string()), started, &result);
        result
    }

    async fn wait_url_matches(
        &self,
        pattern: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let started = Instant::now();
        let result = self.inner.wait_url_matches(pattern, timeout).await;
        self.record(
            "wait_url_matches",
            Some(format!("/{pattern}/i")),
            started,
            &result,
        );
        result
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        // Not recorded: screenshots are taken by the reporter after the
        // scenario already ended, and would only pad the trace.
        self.inner.screenshot().await
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.inner.close().await
    }
}
