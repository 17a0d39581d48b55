//! In-memory fake of the task tracker, driving the real harness without a
//! browser.
//!
//! The fake renders the application state as a flat list of virtual
//! elements (role, accessible name, placeholder, text, region) and
//! re-renders on every driver call, the same "resolution is fresh per use"
//! contract the real driver honors. Sessions are isolated page states over a
//! shared backend store, mirroring the deployed app: issues created by one
//! session are visible to all others, with no rollback between scenarios.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use tracker_driver::{
    poll_until, BrowserDriver, DriverError, Key, Locator, LocatorKind, NameMatch, Nth,
    SessionFactory,
};

pub const BASE_URL: &str = "https://fake.tracker.test/";

const PROJECT_OPTIONS: [&str; 2] = ["Редизайн карточки товара", "Личный кабинет"];
const PRIORITY_OPTIONS: [&str; 3] = ["Low", "Medium", "High"];
const STATUS_OPTIONS: [&str; 3] = ["Backlog", "InProgress", "Done"];
const ASSIGNEE_OPTIONS: [&str; 2] = ["Александра Ветрова", "Иван Петров"];

#[derive(Debug, Clone)]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub project: String,
    pub priority: String,
    pub assignee: String,
    pub status: String,
}

/// Application backend shared by every session of one factory.
#[derive(Default)]
pub struct Backend {
    issues: Mutex<Vec<Issue>>,
}

impl Backend {
    fn seeded() -> Self {
        let backend = Backend::default();
        {
            let mut issues = backend.issues.lock().unwrap();
            for (title, status) in [
                ("Починить загрузку фотографий", "Backlog"),
                ("Обновить карточку товара", "Backlog"),
                ("Ускорить поиск", "InProgress"),
            ] {
                issues.push(Issue {
                    title: title.to_string(),
                    description: "Описание задачи".to_string(),
                    project: PROJECT_OPTIONS[0].to_string(),
                    priority: "Medium".to_string(),
                    assignee: ASSIGNEE_OPTIONS[0].to_string(),
                    status: status.to_string(),
                });
            }
        }
        backend
    }

    pub fn issue_count(&self) -> usize {
        self.issues.lock().unwrap().len()
    }

    pub fn count_titled(&self, title: &str) -> usize {
        self.issues
            .lock()
            .unwrap()
            .iter()
            .filter(|issue| issue.title == title)
            .count()
    }
}

/// Quirks for exercising harness failure paths.
#[derive(Debug, Clone, Copy, Default)]
struct Quirks {
    /// Render a progress spinner that never goes away.
    sticky_spinner: bool,
    /// Never render the list marker, so the setup contract cannot settle.
    never_ready: bool,
    /// The first N sessions fail their initial navigation.
    broken_sessions: usize,
}

/// Session factory over one shared backend.
pub struct FakeTracker {
    backend: Arc<Backend>,
    quirks: Mutex<Quirks>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self {
            backend: Arc::new(Backend::seeded()),
            quirks: Mutex::new(Quirks::default()),
        }
    }

    pub fn with_sticky_spinner() -> Self {
        let tracker = Self::new();
        tracker.quirks.lock().unwrap().sticky_spinner = true;
        tracker
    }

    pub fn that_never_loads() -> Self {
        let tracker = Self::new();
        tracker.quirks.lock().unwrap().never_ready = true;
        tracker
    }

    /// The first `n` sessions fail to navigate; later ones work. Exercises
    /// the runner's retry path.
    pub fn with_broken_first_sessions(n: usize) -> Self {
        let tracker = Self::new();
        tracker.quirks.lock().unwrap().broken_sessions = n;
        tracker
    }

    pub fn backend(&self) -> Arc<Backend> {
        Arc::clone(&self.backend)
    }
}

#[async_trait]
impl SessionFactory for FakeTracker {
    async fn open_session(&self) -> Result<Box<dyn BrowserDriver>, DriverError> {
        let mut quirks = self.quirks.lock().unwrap();
        let broken = if quirks.broken_sessions > 0 {
            quirks.broken_sessions -= 1;
            true
        } else {
            false
        };
        let session_quirks = *quirks;
        drop(quirks);
        Ok(Box::new(FakeSession {
            backend: Arc::clone(&self.backend),
            state: Mutex::new(PageState::default()),
            sticky_spinner: session_quirks.sticky_spinner,
            never_ready: session_quirks.never_ready,
            broken,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Issues,
    Boards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dropdown {
    ModalProject,
    ModalPriority,
    ModalStatus,
    ModalAssignee,
    FilterStatus,
    FilterBoard,
}

#[derive(Debug, Clone, Default)]
struct Draft {
    title: String,
    description: String,
    project: Option<String>,
    priority: Option<String>,
    assignee: Option<String>,
}

#[derive(Debug, Clone)]
struct PageState {
    url: String,
    view: View,
    search: String,
    modal: Option<Draft>,
    /// Index into the backend issue list of the opened card.
    card: Option<usize>,
    open_dropdown: Option<Dropdown>,
    status_filter: Option<String>,
    board_filter: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            view: View::Issues,
            search: String::new(),
            modal: None,
            card: None,
            open_dropdown: None,
            status_filter: None,
            board_filter: None,
        }
    }
}

/// What clicking or filling a rendered element means.
#[derive(Debug, Clone, PartialEq)]
enum Tag {
    Static,
    CreateButton,
    SubmitButton,
    TitleInput,
    DescriptionInput,
    SearchInput,
    CardTitleInput,
    ProjectsLink,
    IssuesLink,
    Heading(usize),
    Combobox(Dropdown),
    OptionItem(Dropdown, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Region {
    Banner,
    Main,
}

#[derive(Debug, Clone)]
struct Element {
    tag: Tag,
    role: &'static str,
    name: String,
    placeholder: Option<String>,
    text: String,
    css: &'static str,
    enabled: bool,
    region: Region,
}

impl Element {
    fn new(tag: Tag, role: &'static str, name: &str) -> Self {
        Self {
            tag,
            role,
            name: name.to_string(),
            placeholder: None,
            text: name.to_string(),
            css: "",
            enabled: true,
            region: Region::Main,
        }
    }
}

pub struct FakeSession {
    backend: Arc<Backend>,
    state: Mutex<PageState>,
    sticky_spinner: bool,
    never_ready: bool,
    broken: bool,
}

impl FakeSession {
    fn render(&self) -> Vec<Element> {
        let state = self.state.lock().unwrap().clone();
        let issues = self.backend.issues.lock().unwrap().clone();
        let mut out = Vec::new();

        // Banner with navigation and the creation trigger.
        let mut create = Element::new(Tag::CreateButton, "button", "Создать задачу");
        create.region = Region::Banner;
        out.push(create);
        out.push(Element::new(Tag::ProjectsLink, "link", "Проекты"));
        out.push(Element::new(Tag::IssuesLink, "link", "Задачи"));

        if self.sticky_spinner {
            let mut spinner = Element::new(Tag::Static, "", "");
            spinner.css = "MuiCircularProgress-root";
            spinner.text = String::new();
            out.push(spinner);
        }

        match state.view {
            View::Boards => {
                if !self.never_ready {
                    out.push(Element::new(Tag::Static, "heading", "Проекты"));
                    for project in PROJECT_OPTIONS {
                        out.push(Element::new(Tag::Static, "heading", project));
                    }
                }
            }
            View::Issues => {
                if !self.never_ready {
                    out.push(Element::new(Tag::Static, "", "Список задач"));
                }
                let mut search =
                    Element::new(Tag::SearchInput, "textbox", "");
                search.placeholder = Some("Поиск задач".to_string());
                search.text = state.search.clone();
                out.push(search);

                // Status filter first, board filter last.
                let status_label = state
                    .status_filter
                    .clone()
                    .unwrap_or_else(|| "Все статусы".to_string());
                let mut status_filter =
                    Element::new(Tag::Combobox(Dropdown::FilterStatus), "combobox", "");
                status_filter.text = status_label;
                out.push(status_filter);

                let visible_issues: Vec<(usize, &Issue)> = issues
                    .iter()
                    .enumerate()
                    .filter(|(_, issue)| {
                        (state.search.is_empty() || issue.title.contains(&state.search))
                            && state
                                .status_filter
                                .as_ref()
                                .map_or(true, |status| &issue.status == status)
                            && state
                                .board_filter
                                .as_ref()
                                .map_or(true, |board| &issue.project == board)
                    })
                    .collect();

                if visible_issues.is_empty() && !state.search.is_empty() {
                    out.push(Element::new(Tag::Static, "", "Задачи не найдены"));
                }
                for (index, issue) in &visible_issues {
                    out.push(Element::new(Tag::Heading(*index), "heading", &issue.title));
                    out.push(Element::new(Tag::Static, "", &issue.status));
                }

                let board_label = state
                    .board_filter
                    .clone()
                    .unwrap_or_else(|| "Все доски".to_string());
                let mut board_filter =
                    Element::new(Tag::Combobox(Dropdown::FilterBoard), "combobox", "");
                board_filter.text = board_label;
                out.push(board_filter);
            }
        }

        if let Some(draft) = &state.modal {
            out.push(Element::new(Tag::Static, "", "Создание задачи"));
            let mut title = Element::new(Tag::TitleInput, "textbox", "Название");
            title.text = draft.title.clone();
            out.push(title);
            let mut description =
                Element::new(Tag::DescriptionInput, "textbox", "Описание");
            description.text = draft.description.clone();
            out.push(description);
            // All four comboboxes expose the same accessible name, as the
            // real app does; index 2 is the status combobox the suite never
            // touches.
            for dropdown in [
                Dropdown::ModalProject,
                Dropdown::ModalPriority,
                Dropdown::ModalStatus,
                Dropdown::ModalAssignee,
            ] {
                out.push(Element::new(Tag::Combobox(dropdown), "combobox", "Проект"));
            }
            let mut submit = Element::new(Tag::SubmitButton, "button", "Создать");
            submit.enabled = !draft.title.trim().is_empty();
            out.push(submit);
        }

        if let Some(card_index) = state.card {
            if let Some(issue) = issues.get(card_index) {
                let mut title = Element::new(Tag::CardTitleInput, "textbox", "Название");
                title.text = issue.title.clone();
                out.push(title);
                out.push(Element::new(Tag::Static, "", &issue.description));
            }
        }

        if let Some(dropdown) = state.open_dropdown {
            let labels: Vec<String> = match dropdown {
                Dropdown::ModalProject | Dropdown::FilterBoard => {
                    PROJECT_OPTIONS.iter().map(|s| s.to_string()).collect()
                }
                Dropdown::ModalPriority => {
                    PRIORITY_OPTIONS.iter().map(|s| s.to_string()).collect()
                }
                Dropdown::ModalStatus | Dropdown::FilterStatus => {
                    STATUS_OPTIONS.iter().map(|s| s.to_string()).collect()
                }
                Dropdown::ModalAssignee => {
                    ASSIGNEE_OPTIONS.iter().map(|s| s.to_string()).collect()
                }
            };
            for label in labels {
                out.push(Element::new(
                    Tag::OptionItem(dropdown, label.clone()),
                    "option",
                    &label,
                ));
            }
        }

        out
    }

    fn matching(&self, locator: &Locator) -> Vec<Element> {
        let rendered = self.render();
        rendered
            .into_iter()
            .filter(|element| Self::element_matches(element, locator))
            .collect()
    }

    fn element_matches(element: &Element, locator: &Locator) -> bool {
        if let Some(scope) = &locator.scope {
            // The only scope the suite uses is the banner landmark.
            if let LocatorKind::Role { role, .. } = &scope.kind {
                if role == "banner" && element.region != Region::Banner {
                    return false;
                }
            }
        }
        match &locator.kind {
            LocatorKind::Role { role, name } => {
                element.role == role.as_str() && name.matches(&element.name)
            }
            LocatorKind::Placeholder { name } => element
                .placeholder
                .as_deref()
                .is_some_and(|placeholder| name.matches(placeholder)),
            LocatorKind::Text { name } => !element.text.is_empty() && name.matches(&element.text),
            LocatorKind::Css { selector } => {
                !element.css.is_empty() && selector.contains(element.css)
            }
        }
    }

    fn pick(matches: Vec<Element>, nth: Option<Nth>) -> Option<Element> {
        let mut matches = matches;
        match nth {
            None | Some(Nth::Index(0)) => {
                if matches.is_empty() {
                    None
                } else {
                    Some(matches.remove(0))
                }
            }
            Some(Nth::Index(index)) => {
                if index < matches.len() {
                    Some(matches.remove(index))
                } else {
                    None
                }
            }
            Some(Nth::Last) => matches.pop(),
        }
    }

    fn resolve(&self, locator: &Locator) -> Result<Element, DriverError> {
        Self::pick(self.matching(locator), locator.nth)
            .ok_or_else(|| DriverError::ElementNotFound(locator.to_string()))
    }

    fn apply_click(&self, element: &Element) {
        let mut state = self.state.lock().unwrap();
        match &element.tag {
            Tag::CreateButton => {
                state.card = None;
                state.modal = Some(Draft::default());
                state.open_dropdown = None;
            }
            Tag::SubmitButton => {
                if !element.enabled {
                    return;
                }
                if let Some(draft) = state.modal.take() {
                    self.backend.issues.lock().unwrap().push(Issue {
                        title: draft.title,
                        description: draft.description,
                        project: draft
                            .project
                            .unwrap_or_else(|| PROJECT_OPTIONS[0].to_string()),
                        priority: draft.priority.unwrap_or_else(|| "Medium".to_string()),
                        assignee: draft
                            .assignee
                            .unwrap_or_else(|| ASSIGNEE_OPTIONS[0].to_string()),
                        status: "Backlog".to_string(),
                    });
                }
            }
            Tag::ProjectsLink => {
                state.view = View::Boards;
                state.modal = None;
                state.card = None;
                state.url = format!("{BASE_URL}boards");
            }
            Tag::IssuesLink => {
                state.view = View::Issues;
                state.modal = None;
                state.card = None;
                state.url = format!("{BASE_URL}issues");
            }
            Tag::Heading(index) => {
                if state.modal.is_none() {
                    state.card = Some(*index);
                }
            }
            Tag::Combobox(dropdown) => {
                state.open_dropdown = Some(*dropdown);
            }
            Tag::OptionItem(dropdown, label) => {
                match dropdown {
                    Dropdown::ModalProject => {
                        if let Some(draft) = state.modal.as_mut() {
                            draft.project = Some(label.clone());
                        }
                    }
                    Dropdown::ModalPriority => {
                        if let Some(draft) = state.modal.as_mut() {
                            draft.priority = Some(label.clone());
                        }
                    }
                    Dropdown::ModalAssignee => {
                        if let Some(draft) = state.modal.as_mut() {
                            draft.assignee = Some(label.clone());
                        }
                    }
                    Dropdown::ModalStatus => {}
                    Dropdown::FilterStatus => state.status_filter = Some(label.clone()),
                    Dropdown::FilterBoard => state.board_filter = Some(label.clone()),
                }
                state.open_dropdown = None;
            }
            Tag::TitleInput
            | Tag::DescriptionInput
            | Tag::SearchInput
            | Tag::CardTitleInput
            | Tag::Static => {}
        }
    }
}

#[async_trait]
impl BrowserDriver for FakeSession {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), DriverError> {
        if self.broken {
            return Err(DriverError::Protocol("connection refused".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        *state = PageState::default();
        state.url = url.to_string();
        Ok(())
    }

    async fn click(&self, locator: &Locator, _timeout: Duration) -> Result<(), DriverError> {
        let element = self.resolve(locator)?;
        self.apply_click(&element);
        Ok(())
    }

    async fn fill(
        &self,
        locator: &Locator,
        text: &str,
        _timeout: Duration,
    ) -> Result<(), DriverError> {
        let element = self.resolve(locator)?;
        let mut state = self.state.lock().unwrap();
        match element.tag {
            Tag::TitleInput => {
                if let Some(draft) = state.modal.as_mut() {
                    draft.title = text.to_string();
                }
            }
            Tag::DescriptionInput => {
                if let Some(draft) = state.modal.as_mut() {
                    draft.description = text.to_string();
                }
            }
            Tag::SearchInput => state.search = text.to_string(),
            // Card edits do not persist, the known application defect.
            Tag::CardTitleInput => {}
            _ => {
                return Err(DriverError::Protocol(format!(
                    "cannot fill non-input {locator}"
                )))
            }
        }
        Ok(())
    }

    async fn press_key(
        &self,
        locator: Option<&Locator>,
        key: Key,
        _timeout: Duration,
    ) -> Result<(), DriverError> {
        if let Some(locator) = locator {
            self.resolve(locator)?;
        }
        if key == Key::Escape {
            let mut state = self.state.lock().unwrap();
            if state.open_dropdown.is_some() {
                state.open_dropdown = None;
            } else if state.modal.is_some() {
                state.modal = None;
            } else {
                state.card = None;
            }
        }
        Ok(())
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError> {
        Ok(Self::pick(self.matching(locator), locator.nth).is_some())
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError> {
        let matches = self.matching(locator);
        if matches.is_empty() {
            return Err(DriverError::ElementNotFound(locator.to_string()));
        }
        // Same uniqueness contract as the real driver: an enablement probe
        // without an explicit nth must resolve to exactly one element.
        if matches.len() > 1 && locator.nth.is_none() {
            return Err(DriverError::AmbiguousElement {
                locator: locator.to_string(),
                matches: matches.len(),
            });
        }
        let element = Self::pick(matches, locator.nth)
            .ok_or_else(|| DriverError::ElementNotFound(locator.to_string()))?;
        Ok(element.enabled)
    }

    async fn count(&self, locator: &Locator) -> Result<usize, DriverError> {
        Ok(self.matching(locator).len())
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let what = format!("{locator} visible");
        poll_until(&what, timeout, Duration::from_millis(5), || async {
            self.is_visible(locator).await
        })
        .await
    }

    async fn wait_hidden(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let what = format!("{locator} hidden");
        poll_until(&what, timeout, Duration::from_millis(5), || async {
            Ok(!self.is_visible(locator).await?)
        })
        .await
    }

    async fn wait_url_matches(
        &self,
        pattern: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let matcher = NameMatch::pattern(pattern);
        let what = format!("url matches /{pattern}/i");
        poll_until(&what, timeout, Duration::from_millis(5), || {
            let matcher = matcher.clone();
            async move {
                let url = self.current_url().await?;
                Ok(matcher.matches(&url))
            }
        })
        .await
    }
}
