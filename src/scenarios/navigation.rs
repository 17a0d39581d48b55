//! Навигация: navigation scenarios.

use std::sync::Arc;

use tracker_driver::{BrowserDriver, Locator, NameMatch};
use tracker_harness::check;
use tracker_harness::{ScenarioCtx, ScenarioResult};

use crate::app::selectors;

/// TC_E2E_12: the projects link leads to the boards view.
pub async fn go_to_boards(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    ctx.driver()
        .click(&selectors::projects_link(), ctx.config().action_timeout())
        .await?;
    check::expect_url_matches(
        ctx.driver(),
        selectors::BOARDS_URL_PATTERN,
        ctx.config().expect_timeout(),
    )
    .await?;
    check::expect_visible(
        ctx.driver(),
        &Locator::role("heading", NameMatch::pattern("проекты")).first(),
        ctx.config().expect_timeout(),
    )
    .await
}

/// TC_E2E_13: and back to the issues list, verified by URL and list marker.
pub async fn back_to_issues(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    ctx.driver()
        .click(&selectors::projects_link(), ctx.config().action_timeout())
        .await?;
    ctx.driver()
        .click(&selectors::issues_link(), ctx.config().action_timeout())
        .await?;
    check::expect_url_matches(
        ctx.driver(),
        selectors::ISSUES_URL_PATTERN,
        ctx.config().expect_timeout(),
    )
    .await?;
    check::expect_visible(
        ctx.driver(),
        &selectors::list_marker(),
        ctx.config().expect_timeout(),
    )
    .await
}
