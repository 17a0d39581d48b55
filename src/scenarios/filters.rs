//! Фильтры: list filter scenarios.

use std::sync::Arc;

use tracker_driver::{BrowserDriver, Locator, NameMatch};
use tracker_harness::check;
use tracker_harness::{ScenarioCtx, ScenarioResult};

use crate::app::selectors;

/// TC_E2E_14: filtering by status Backlog shows Backlog entries.
pub async fn filter_by_status(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    ctx.driver()
        .click(
            &selectors::filter_combobox().first(),
            ctx.config().action_timeout(),
        )
        .await?;
    ctx.driver()
        .click(&selectors::option("Backlog"), ctx.config().action_timeout())
        .await?;
    check::expect_visible(
        ctx.driver(),
        &Locator::text(NameMatch::pattern("Backlog")).first(),
        ctx.config().expect_timeout(),
    )
    .await
}

/// TC_E2E_15: picking any board in the board filter keeps issues rendered.
pub async fn filter_by_board(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    ctx.driver()
        .click(
            &selectors::filter_combobox().last(),
            ctx.config().action_timeout(),
        )
        .await?;
    ctx.driver()
        .click(
            &selectors::any_option().first(),
            ctx.config().action_timeout(),
        )
        .await?;
    check::expect_visible(
        ctx.driver(),
        &selectors::any_heading().first(),
        ctx.config().expect_timeout(),
    )
    .await
}
