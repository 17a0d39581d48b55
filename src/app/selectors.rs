//! UI contract of the target task tracker.
//!
//! Every locator the scenarios use, in one place. Role+name locators are
//! preferred; patterns are case-insensitive. The three identically-named
//! comboboxes in the creation modal are the one exception where ordinal
//! disambiguation is unavoidable; the ordinals live in `SuiteConfig`, not
//! here.

use tracker_driver::{Locator, NameMatch};

/// URL fragment patterns for the two main views.
pub const BOARDS_URL_PATTERN: &str = "boards";
pub const ISSUES_URL_PATTERN: &str = "issues";

pub fn banner() -> Locator {
    Locator::role("banner", NameMatch::Any)
}

/// The creation trigger lives in the page banner; an identically labeled
/// control exists inside the modal, so the scope matters.
pub fn create_button() -> Locator {
    Locator::role("button", NameMatch::pattern("создать задачу")).within(banner())
}

/// Modal submit. Anchored pattern: the banner trigger is "Создать задачу",
/// the submit is exactly "Создать".
pub fn submit_button() -> Locator {
    Locator::role("button", NameMatch::pattern("^создать$"))
}

/// Loose "создать" button match, used by the cancel flow which targets
/// whichever creation control currently has focus context.
pub fn any_create_button() -> Locator {
    Locator::role("button", NameMatch::pattern("создать"))
}

pub fn title_input() -> Locator {
    Locator::role("textbox", NameMatch::pattern("название"))
}

pub fn description_input() -> Locator {
    Locator::role("textbox", NameMatch::pattern("описание"))
}

/// The Nth combobox of the creation modal. All of them expose the
/// accessible name "Проект", an application defect the suite works around
/// by position.
pub fn modal_combobox(nth: usize) -> Locator {
    Locator::role("combobox", NameMatch::exact("Проект")).nth(nth)
}

pub fn option(label: &str) -> Locator {
    Locator::role("option", NameMatch::exact(label))
}

pub fn any_option() -> Locator {
    Locator::role("option", NameMatch::Any)
}

/// "Создание задачи" heading shown while the creation modal is open.
pub fn modal_marker() -> Locator {
    Locator::text(NameMatch::pattern("создание задачи"))
}

/// "Список задач" marker identifying the issues list view.
pub fn list_marker() -> Locator {
    Locator::text(NameMatch::pattern("список задач"))
}

/// MUI progress spinner. No accessible identity, hence the CSS escape hatch.
pub fn spinner() -> Locator {
    Locator::css(".MuiCircularProgress-root").first()
}

pub fn heading(title: &str) -> Locator {
    Locator::role("heading", NameMatch::exact(title))
}

pub fn any_heading() -> Locator {
    Locator::role("heading", NameMatch::Any)
}

pub fn search_input() -> Locator {
    Locator::placeholder(NameMatch::pattern("поиск"))
}

/// Explicit empty-search state; distinguishes "nothing found" from
/// "still loading".
pub fn not_found_marker() -> Locator {
    Locator::text(NameMatch::pattern("задачи не найдены"))
}

pub fn projects_link() -> Locator {
    Locator::role("link", NameMatch::pattern("проекты"))
}

pub fn issues_link() -> Locator {
    Locator::role("link", NameMatch::pattern("задачи"))
}

/// Filter comboboxes on the list view (status first, board last). Unnamed,
/// located by role alone.
pub fn filter_combobox() -> Locator {
    Locator::role("combobox", NameMatch::Any)
}
