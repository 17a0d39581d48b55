//! Создание задачи: issue creation scenarios.

use std::sync::Arc;

use tracker_driver::{best_effort, BrowserDriver, Key, Locator, NameMatch};
use tracker_harness::check;
use tracker_harness::fixture::random_title;
use tracker_harness::{ScenarioCtx, ScenarioResult};

use crate::app::ops::{self, IssueFields};
use crate::app::selectors;

/// TC_E2E_01: creation with only the required fields filled.
pub async fn create_with_required_fields(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let title = ops::create_issue(&ctx, IssueFields::titled(random_title("Задача87-"))).await?;
    check::expect_visible(
        ctx.driver(),
        &selectors::heading(&title).first(),
        ctx.config().expect_timeout(),
    )
    .await
}

/// TC_E2E_02: creation with every field, then the card shows the description.
pub async fn create_with_all_fields(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let fields = IssueFields {
        title: Some(random_title("Задача88-")),
        description: "Полное описание".to_string(),
        ..IssueFields::default()
    };
    let title = ops::create_issue(&ctx, fields).await?;
    ctx.driver()
        .click(
            &selectors::heading(&title).first(),
            ctx.config().action_timeout(),
        )
        .await?;
    check::expect_visible(
        ctx.driver(),
        &Locator::text(NameMatch::pattern("Полное описание")),
        ctx.config().expect_timeout(),
    )
    .await
}

/// TC_E2E_03: an empty title keeps the submit control disabled.
pub async fn empty_title_disables_submit(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    ops::open_create_modal(&ctx).await?;
    ctx.driver()
        .fill(&selectors::title_input(), "", ctx.config().action_timeout())
        .await?;
    check::expect_disabled(ctx.driver(), &selectors::submit_button()).await
}

/// TC_E2E_04: escape cancels the creation flow without a partial commit.
pub async fn cancel_leaves_no_issue(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let title = "Задача89";
    ops::open_create_modal(&ctx).await?;
    ctx.driver()
        .fill(&selectors::title_input(), title, ctx.config().action_timeout())
        .await?;
    ctx.driver()
        .press_key(
            Some(&selectors::any_create_button()),
            Key::Escape,
            ctx.config().action_timeout(),
        )
        .await?;
    // The modal may close instantly or animate out; either way is fine.
    best_effort(
        ctx.driver()
            .wait_hidden(&selectors::submit_button(), ctx.config().expect_timeout())
            .await,
    )?;
    // Re-open once to land back on the list view.
    ctx.driver()
        .click(&selectors::create_button(), ctx.config().action_timeout())
        .await?;
    check::expect_count_eq(ctx.driver(), &selectors::heading(title), 0).await
}

/// TC_E2E_05: identical titles are permitted, not deduplicated.
pub async fn duplicate_titles_accumulate(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let title = "Задача90";
    ops::create_issue(&ctx, IssueFields::titled(title)).await?;
    ops::create_issue(&ctx, IssueFields::titled(title)).await?;
    check::expect_count_greater(ctx.driver(), &selectors::heading(title), 1).await
}
