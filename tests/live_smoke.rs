//! Live smoke test against a real Chromium and the deployed application.
//!
//! Off by default: set `TRACKER_E2E_LIVE=1` to run it. CI and offline
//! machines skip it; the fake-backed tests in `suite_runner` cover the
//! harness itself.

use std::sync::Arc;
use std::time::Duration;

use tracker_cdp::{CdpBrowser, CdpBrowserConfig};
use tracker_driver::SessionFactory;
use tracker_harness::{Runner, SuiteConfig};

#[tokio::test(flavor = "multi_thread")]
async fn one_scenario_against_the_deployed_app() {
    if std::env::var("TRACKER_E2E_LIVE").is_err() {
        eprintln!("skipping live smoke test; set TRACKER_E2E_LIVE=1 to run");
        return;
    }

    let artifacts = tempfile::tempdir().expect("tempdir");
    let mut config = SuiteConfig::default();
    config.artifacts_dir = artifacts.path().to_path_buf();
    config.workers = 1;
    let config = Arc::new(config);

    let browser = Arc::new(
        CdpBrowser::launch(CdpBrowserConfig {
            headless: true,
            viewport_width: config.viewport.width,
            viewport_height: config.viewport.height,
            executable: None,
            request_timeout: Duration::from_secs(30),
        })
        .await
        .expect("chromium launch"),
    );
    let factory: Arc<dyn SessionFactory> = Arc::clone(&browser) as _;

    let runner = Runner::new(factory, Arc::clone(&config));
    let suite = tracker_e2e::scenarios::suite();
    let report = runner.run(&suite, Some("TC_E2E_06")).await;

    drop(runner);
    if let Ok(browser) = Arc::try_unwrap(browser) {
        let _ = browser.shutdown().await;
    }

    assert!(report.all_passed(), "{}", report.render_summary());
}
