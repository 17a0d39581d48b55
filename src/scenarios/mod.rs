//! The fixed scenario catalog for the tracker application.
//!
//! Every scenario is independent: the shared setup re-establishes the list
//! view before each one, and no scenario assumes execution order. They do
//! share the application's backend, so data created by one run may be
//! observed by later ones; the duplicate-title scenario relies on
//! "count > 1", never "count == 1", for exactly that reason.

pub mod card;
pub mod creation;
pub mod filters;
pub mod navigation;
pub mod search;

use tracker_harness::{Scenario, Suite};

use crate::app::ops;

pub fn suite() -> Suite {
    Suite {
        name: "issues",
        setup: |ctx| Box::pin(ops::setup(ctx)),
        scenarios: vec![
            Scenario::new(
                "TC_E2E_01",
                "создание с обязательными полями",
                "Создание задачи",
                |ctx| Box::pin(creation::create_with_required_fields(ctx)),
            ),
            Scenario::new(
                "TC_E2E_02",
                "создание с заполнением всех полей",
                "Создание задачи",
                |ctx| Box::pin(creation::create_with_all_fields(ctx)),
            ),
            Scenario::new(
                "TC_E2E_03",
                "валидация пустого названия",
                "Создание задачи",
                |ctx| Box::pin(creation::empty_title_disables_submit(ctx)),
            ),
            Scenario::new(
                "TC_E2E_04",
                "отмена создания",
                "Создание задачи",
                |ctx| Box::pin(creation::cancel_leaves_no_issue(ctx)),
            ),
            Scenario::new(
                "TC_E2E_05",
                "создание дубликатов",
                "Создание задачи",
                |ctx| Box::pin(creation::duplicate_titles_accumulate(ctx)),
            ),
            Scenario::new(
                "TC_E2E_06",
                "открыть карточку",
                "Карточка задачи",
                |ctx| Box::pin(card::open_card(ctx)),
            ),
            Scenario::new(
                "TC_E2E_07",
                "закрыть карточку",
                "Карточка задачи",
                |ctx| Box::pin(card::close_card_with_escape(ctx)),
            ),
            Scenario::fixme(
                "TC_E2E_08",
                "редактирование карточки",
                "Карточка задачи",
                "баг приложения: изменения не сохраняются",
                |ctx| Box::pin(card::edit_card(ctx)),
            ),
            Scenario::new(
                "TC_E2E_09",
                "поиск по точному названию",
                "Поиск задачи",
                |ctx| Box::pin(search::search_exact_title(ctx)),
            ),
            Scenario::new(
                "TC_E2E_10",
                "поиск по части названия",
                "Поиск задачи",
                |ctx| Box::pin(search::search_partial_title(ctx)),
            ),
            Scenario::new(
                "TC_E2E_11",
                "поиск без результатов",
                "Поиск задачи",
                |ctx| Box::pin(search::search_without_results(ctx)),
            ),
            Scenario::new(
                "TC_E2E_12",
                "переход на доску",
                "Навигация",
                |ctx| Box::pin(navigation::go_to_boards(ctx)),
            ),
            Scenario::new(
                "TC_E2E_13",
                "возврат к списку задач",
                "Навигация",
                |ctx| Box::pin(navigation::back_to_issues(ctx)),
            ),
            Scenario::new(
                "TC_E2E_14",
                "фильтр по статусу Backlog",
                "Фильтры",
                |ctx| Box::pin(filters::filter_by_status(ctx)),
            ),
            Scenario::new(
                "TC_E2E_15",
                "фильтр по доске",
                "Фильтры",
                |ctx| Box::pin(filters::filter_by_board(ctx)),
            ),
        ],
    }
}
