//! One scenario's browser session.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use chromiumoxide::Element;
use regex::RegexBuilder;
use serde_json::Value;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use tracker_driver::{
    poll_until, wait::DEFAULT_POLL_INTERVAL, BrowserDriver, DriverError, Key, Locator,
};

use crate::eval::{self, ScriptStatus};

/// CDP-backed [`BrowserDriver`] session over a single page.
///
/// Element-targeting actions poll locator resolution until the element
/// appears (bounded by the action timeout), then act through real CDP input
/// events so the application sees trusted interactions.
pub struct CdpSession {
    page: Page,
    poll_interval: Duration,
}

impl CdpSession {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    async fn evaluate(&self, script: String) -> Result<Value, DriverError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|err| DriverError::Protocol(err.to_string()))?
            .into_value()
            .map_err(|err| DriverError::Protocol(err.to_string()))
    }

    /// One resolution attempt: run the tagging script and look the tagged
    /// element up. `Ok(None)` means "no match right now".
    async fn try_resolve(&self, locator: &Locator) -> Result<Option<Element>, DriverError> {
        let token = format!("anchor-{}", Uuid::new_v4().simple());
        let value = self.evaluate(eval::resolve_script(locator, &token)).await?;
        match ScriptStatus::parse(&value) {
            Some(ScriptStatus::Ok { matches, selector }) => {
                if matches > 1 {
                    // First-match policy for ambiguous locators; kept loud.
                    debug!(locator = %locator, matches, "ambiguous locator, using first match");
                }
                let selector = selector
                    .ok_or_else(|| DriverError::Protocol("resolution missing selector".into()))?;
                let element = self
                    .page
                    .find_element(&selector)
                    .await
                    .map_err(|err| DriverError::Protocol(err.to_string()))?;
                Ok(Some(element))
            }
            Some(ScriptStatus::NotFound { .. }) => Ok(None),
            Some(ScriptStatus::NotEnabled) => Err(DriverError::Protocol(
                "resolution reported not-enabled".into(),
            )),
            None => Err(DriverError::Protocol(format!(
                "unexpected resolution result: {value}"
            ))),
        }
    }

    /// Resolve within `timeout`, suspending between attempts. Exhausting the
    /// bound surfaces as `ElementNotFound`: the element never rendered.
    async fn resolve_within(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Element, DriverError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(element) = self.try_resolve(locator).await? {
                return Ok(element);
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(DriverError::ElementNotFound(format!(
                    "{locator} (no match within {}ms)",
                    timeout.as_millis()
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn probe(&self, locator: &Locator) -> Result<Value, DriverError> {
        self.evaluate(eval::probe_script(locator)).await
    }
}

#[async_trait]
impl BrowserDriver for CdpSession {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        debug!(url = %url, "navigate");
        let navigation = async {
            self.page
                .goto(url)
                .await
                .map_err(|err| DriverError::Protocol(err.to_string()))?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|err| DriverError::Protocol(err.to_string()))?;
            Ok::<_, DriverError>(())
        };
        tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| DriverError::timeout(format!("navigation to {url}"), timeout))?
    }

    async fn click(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        trace!(locator = %locator, "click");
        let element = self.resolve_within(locator, timeout).await?;
        element
            .scroll_into_view()
            .await
            .map_err(|err| DriverError::Protocol(err.to_string()))?;
        element
            .click()
            .await
            .map_err(|err| DriverError::Protocol(err.to_string()))?;
        Ok(())
    }

    async fn fill(
        &self,
        locator: &Locator,
        text: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        trace!(locator = %locator, chars = text.chars().count(), "fill");
        // Wait for the field to render, then write through the page script
        // so controlled inputs observe a single atomic value change.
        self.resolve_within(locator, timeout).await?;
        let value = self.evaluate(eval::fill_script(locator, text)).await?;
        match ScriptStatus::parse(&value) {
            Some(ScriptStatus::Ok { .. }) => Ok(()),
            Some(ScriptStatus::NotFound { .. }) => {
                Err(DriverError::ElementNotFound(locator.to_string()))
            }
            Some(ScriptStatus::NotEnabled) => Err(DriverError::Protocol(format!(
                "cannot fill disabled field {locator}"
            ))),
            None => Err(DriverError::Protocol(format!(
                "unexpected fill result: {value}"
            ))),
        }
    }

    async fn press_key(
        &self,
        locator: Option<&Locator>,
        key: Key,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        trace!(key = %key, targeted = locator.is_some(), "press key");
        match locator {
            Some(locator) => {
                let element = self.resolve_within(locator, timeout).await?;
                element
                    .press_key(key.as_str())
                    .await
                    .map_err(|err| DriverError::Protocol(err.to_string()))?;
            }
            None => {
                // Page-level key press: raw down + up through the Input domain.
                for event_type in [DispatchKeyEventType::RawKeyDown, DispatchKeyEventType::KeyUp] {
                    let params = DispatchKeyEventParams::builder()
                        .r#type(event_type)
                        .key(key.as_str())
                        .code(key.as_str())
                        .windows_virtual_key_code(key.windows_virtual_key_code())
                        .build()
                        .map_err(DriverError::Protocol)?;
                    self.page
                        .execute(params)
                        .await
                        .map_err(|err| DriverError::Protocol(err.to_string()))?;
                }
            }
        }
        Ok(())
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError> {
        let probe = self.probe(locator).await?;
        Ok(probe.get("visible").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError> {
        let probe = self.probe(locator).await?;
        let count = probe.get("count").and_then(Value::as_u64).unwrap_or(0) as usize;
        if count == 0 {
            return Err(DriverError::ElementNotFound(locator.to_string()));
        }
        // Enablement is a state assertion about one specific control; a
        // first-match guess could silently probe the wrong one. Without an
        // explicit nth the locator must resolve uniquely.
        if count > 1 && locator.nth.is_none() {
            return Err(DriverError::AmbiguousElement {
                locator: locator.to_string(),
                matches: count,
            });
        }
        Ok(probe.get("enabled").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn count(&self, locator: &Locator) -> Result<usize, DriverError> {
        let probe = self.probe(locator).await?;
        Ok(probe.get("count").and_then(Value::as_u64).unwrap_or(0) as usize)
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        self.page
            .url()
            .await
            .map_err(|err| DriverError::Protocol(err.to_string()))?
            .ok_or(DriverError::SessionClosed)
    }

    async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let what = format!("{locator} visible");
        poll_until(&what, timeout, self.poll_interval, || async {
            self.is_visible(locator).await
        })
        .await
    }

    async fn wait_hidden(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let what = format!("{locator} hidden");
        poll_until(&what, timeout, self.poll_interval, || async {
            Ok(!self.is_visible(locator).await?)
        })
        .await
    }

    async fn wait_url_matches(
        &self,
        pattern: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| DriverError::Protocol(format!("invalid url pattern: {err}")))?;
        let what = format!("url matches /{pattern}/i");
        poll_until(&what, timeout, self.poll_interval, || {
            let re = re.clone();
            async move {
                let url = self.current_url().await?;
                Ok(re.is_match(&url))
            }
        })
        .await
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(false)
                    .build(),
            )
            .await
            .map_err(|err| DriverError::Protocol(err.to_string()))
    }

    async fn close(&self) -> Result<(), DriverError> {
        if let Err(err) = self.page.clone().close().await {
            // The page may already be gone when the browser shuts down first.
            warn!(error = %err, "closing page failed");
        }
        Ok(())
    }
}
