//! Browser lifecycle and per-scenario session creation.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use tracker_driver::{BrowserDriver, DriverError, SessionFactory};

use crate::session::CdpSession;

/// Launch options for the shared Chromium instance.
#[derive(Debug, Clone)]
pub struct CdpBrowserConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Explicit Chromium binary; `None` lets chromiumoxide auto-detect.
    pub executable: Option<PathBuf>,
    /// Default bound for session-level protocol calls.
    pub request_timeout: Duration,
}

impl Default for CdpBrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            executable: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// A launched Chromium instance shared by all scenario sessions.
///
/// The CDP event handler runs on a background task for the browser's
/// lifetime; dropping the handle aborts it after [`CdpBrowser::shutdown`].
pub struct CdpBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl CdpBrowser {
    pub async fn launch(config: CdpBrowserConfig) -> Result<Self, DriverError> {
        let mut builder = BrowserConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .request_timeout(config.request_timeout);
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &config.executable {
            builder = builder.chrome_executable(executable);
        }
        let browser_config = builder.build().map_err(DriverError::Protocol)?;

        info!(
            headless = config.headless,
            viewport = %format!("{}x{}", config.viewport_width, config.viewport_height),
            "launching chromium"
        );
        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|err| DriverError::Protocol(err.to_string()))?;

        // The handler stream must be polled for the duration of the browser,
        // otherwise every CDP call stalls.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    error!(error = %err, "cdp handler error");
                }
            }
            debug!("cdp handler stream ended");
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Close the browser and stop the handler task.
    pub async fn shutdown(mut self) -> Result<(), DriverError> {
        self.browser
            .close()
            .await
            .map_err(|err| DriverError::Protocol(err.to_string()))?;
        self.handler_task.abort();
        Ok(())
    }
}

#[async_trait]
impl SessionFactory for CdpBrowser {
    async fn open_session(&self) -> Result<Box<dyn BrowserDriver>, DriverError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|err| DriverError::Protocol(err.to_string()))?;
        debug!("opened new page session");
        Ok(Box::new(CdpSession::new(page)))
    }
}
