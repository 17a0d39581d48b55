//! Reusable operations against the tracker UI: the setup contract,
//! modal opening, and the full issue-creation round trip.

use std::sync::Arc;

use tracing::debug;

use tracker_harness::check;
use tracker_harness::fixture::{random_title, TITLE_PREFIX};
use tracker_harness::{ScenarioCtx, ScenarioError, ScenarioResult};
use tracker_driver::{best_effort, BrowserDriver};

use crate::app::selectors;

/// Project option selected for every created issue.
pub const PROJECT_OPTION: &str = "Редизайн карточки товара";

/// Priority option selected for every created issue.
pub const PRIORITY_OPTION: &str = "Low";

/// Default assignee.
pub const DEFAULT_ASSIGNEE: &str = "Александра Ветрова";

/// Default description.
pub const DEFAULT_DESCRIPTION: &str = "Описание задачи";

/// Input for [`create_issue`]. A `None` title draws a fresh randomized one.
#[derive(Debug, Clone)]
pub struct IssueFields {
    pub title: Option<String>,
    pub description: String,
    pub assignee: String,
}

impl Default for IssueFields {
    fn default() -> Self {
        Self {
            title: None,
            description: DEFAULT_DESCRIPTION.to_string(),
            assignee: DEFAULT_ASSIGNEE.to_string(),
        }
    }
}

impl IssueFields {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Setup contract, run before every scenario: navigate to the application
/// root and synchronize on the list view being ready.
pub async fn setup(ctx: Arc<ScenarioCtx>) -> ScenarioResult {
    let driver = ctx.driver();
    let config = ctx.config();
    driver
        .navigate(&config.base_url, config.navigation_timeout())
        .await
        .map_err(|err| ScenarioError::Setup(format!("navigation failed: {err}")))?;
    wait_for_list(&ctx).await
}

/// Synchronize on the issues list: the list marker must appear; the loading
/// spinner must then go away, best-effort: an already-loaded page
/// never shows one and its absence is exactly the state we want.
pub async fn wait_for_list(ctx: &ScenarioCtx) -> ScenarioResult {
    let driver = ctx.driver();
    let config = ctx.config();
    check::expect_visible(driver, &selectors::list_marker(), config.ready_timeout()).await?;
    let spinner = best_effort(
        driver
            .wait_hidden(&selectors::spinner(), config.spinner_timeout())
            .await,
    )?;
    if !spinner.is_ready() {
        debug!("spinner still reported visible at the bound; continuing with loaded list");
    }
    Ok(())
}

/// Open the creation modal: trigger in the banner, then the modal marker.
pub async fn open_create_modal(ctx: &ScenarioCtx) -> ScenarioResult {
    let driver = ctx.driver();
    let config = ctx.config();
    check::expect_visible(driver, &selectors::create_button(), config.ready_timeout()).await?;
    driver
        .click(&selectors::create_button(), config.action_timeout())
        .await?;
    check::expect_visible(driver, &selectors::modal_marker(), config.expect_timeout()).await
}

/// Pick an option from one of the modal's same-named comboboxes: click to
/// open, click the option by visible label. Assumes the label is unique
/// among the currently rendered options; collisions select the first match.
async fn pick_option(ctx: &ScenarioCtx, combobox_nth: usize, label: &str) -> ScenarioResult {
    let driver = ctx.driver();
    let timeout = ctx.config().action_timeout();
    driver
        .click(&selectors::modal_combobox(combobox_nth), timeout)
        .await?;
    driver.click(&selectors::option(label), timeout).await?;
    Ok(())
}

/// Full creation round trip. Blocks until a heading with the submitted
/// title renders, confirming the backend accepted the issue; returns the
/// resolved title so callers assert on it without recomputing randomized
/// values.
pub async fn create_issue(
    ctx: &ScenarioCtx,
    fields: IssueFields,
) -> Result<String, ScenarioError> {
    let driver = ctx.driver();
    let config = ctx.config();
    let title = fields
        .title
        .unwrap_or_else(|| random_title(TITLE_PREFIX));

    open_create_modal(ctx).await?;
    driver
        .fill(&selectors::title_input(), &title, config.action_timeout())
        .await?;
    driver
        .fill(
            &selectors::description_input(),
            &fields.description,
            config.action_timeout(),
        )
        .await?;

    let ordinals = config.comboboxes;
    pick_option(ctx, ordinals.project, PROJECT_OPTION).await?;
    pick_option(ctx, ordinals.priority, PRIORITY_OPTION).await?;
    pick_option(ctx, ordinals.assignee, &fields.assignee).await?;

    driver
        .click(&selectors::submit_button(), config.action_timeout())
        .await?;
    // The create round trip is done once the new issue's heading renders.
    check::expect_visible(
        driver,
        &selectors::heading(&title).first(),
        config.ready_timeout(),
    )
    .await?;
    Ok(title)
}
