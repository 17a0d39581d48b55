//! Поиск задачи: search scenarios.

use std::sync::Arc;

use tracker_driver::BrowserDriver;
use tracker_harness::check;
use tracker_harness::{ScenarioCtx, ScenarioResult};

use crate::app::ops::{self, IssueFields};
use crate::app::selectors;

/// TC_E2E_09: searching by the exact title finds it.
pub async fn search_exact_title(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let title = ops::create_issue(&ctx, IssueFields::titled("Задача93")).await?;
    ctx.driver()
        .fill(&selectors::search_input(), &title, ctx.config().action_timeout())
        .await?;
    check::expect_visible(
        ctx.driver(),
        &selectors::heading(&title).first(),
        ctx.config().expect_timeout(),
    )
    .await
}

/// TC_E2E_10: a common substring still surfaces the created issue.
pub async fn search_partial_title(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let title = ops::create_issue(&ctx, IssueFields::titled("Задача94")).await?;
    ctx.driver()
        .fill(
            &selectors::search_input(),
            "Задача",
            ctx.config().action_timeout(),
        )
        .await?;
    check::expect_visible(
        ctx.driver(),
        &selectors::heading(&title).first(),
        ctx.config().expect_timeout(),
    )
    .await
}

/// TC_E2E_11: a non-matching query shows the explicit not-found state.
pub async fn search_without_results(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    ctx.driver()
        .fill(
            &selectors::search_input(),
            "НЕСУЩЕСТВУЕТ",
            ctx.config().action_timeout(),
        )
        .await?;
    check::expect_visible(
        ctx.driver(),
        &selectors::not_found_marker(),
        ctx.config().expect_timeout(),
    )
    .await
}
