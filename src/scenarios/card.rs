//! Карточка задачи: issue card scenarios.

use std::sync::Arc;

use tracker_driver::{BrowserDriver, Key};
use tracker_harness::check;
use tracker_harness::{ScenarioCtx, ScenarioResult};

use crate::app::ops::{self, IssueFields};
use crate::app::selectors;

/// TC_E2E_06: clicking an issue heading opens its card.
pub async fn open_card(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let title = ops::create_issue(&ctx, IssueFields::titled("Задача91")).await?;
    ctx.driver()
        .click(
            &selectors::heading(&title).first(),
            ctx.config().action_timeout(),
        )
        .await?;
    check::expect_visible(
        ctx.driver(),
        &selectors::title_input(),
        ctx.config().expect_timeout(),
    )
    .await
}

/// TC_E2E_07: escape closes the card again.
pub async fn close_card_with_escape(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let title = ops::create_issue(&ctx, IssueFields::titled("Задача92")).await?;
    ctx.driver()
        .click(
            &selectors::heading(&title).first(),
            ctx.config().action_timeout(),
        )
        .await?;
    ctx.driver()
        .press_key(None, Key::Escape, ctx.config().action_timeout())
        .await?;
    check::expect_count_eq(ctx.driver(), &selectors::modal_marker(), 0).await
}

/// TC_E2E_08 body. Never executed: the scenario is declared `Fixme` in the
/// catalog because card edits do not persist in the target application.
pub async fn edit_card(_ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    Ok(())
}
