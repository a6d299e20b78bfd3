use std::sync::Once;

use courier_core::{update, AppState, CatalogItem, Effect, Msg, QueryState, QueryView};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(courier_logging::initialize_for_tests);
}

fn sample_results() -> Vec<CatalogItem> {
    let mut first = CatalogItem::new("123", "Show A");
    first.episode_info = Some("Episode 2 - Series A".to_string());
    first.duration = Some("00:28:00".to_string());
    vec![first, CatalogItem::new("456", "Show B")]
}

#[test]
fn every_input_event_is_forwarded_as_a_search_request() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::InputChanged("s".to_string()));
    assert_eq!(
        effects,
        vec![Effect::RequestSearch {
            text: "s".to_string()
        }]
    );
    assert_eq!(state.view().input, "s");
    assert!(state.consume_dirty());

    let (_state, effects) = update(state, Msg::InputChanged("sh".to_string()));
    assert_eq!(
        effects,
        vec![Effect::RequestSearch {
            text: "sh".to_string()
        }]
    );
}

#[test]
fn results_render_as_numbered_rows() {
    init_logging();
    let (mut state, _) = update(
        AppState::new(),
        Msg::QueryStateChanged(QueryState::Results(sample_results())),
    );
    let view = state.view();

    assert_eq!(view.query, QueryView::Results);
    assert_eq!(view.query.message(), None);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].number, 1);
    assert_eq!(view.rows[0].label, "Show A");
    assert_eq!(
        view.rows[0].episode_info.as_deref(),
        Some("Episode 2 - Series A")
    );
    assert_eq!(view.rows[1].id.as_str(), "456");
    assert_eq!(view.rows[1].button.label, "Download");
    assert!(view.rows[1].button.enabled);
    assert!(state.consume_dirty());
}

#[test]
fn loading_keeps_previous_results_visible() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::QueryStateChanged(QueryState::Results(sample_results())),
    );
    let (state, _) = update(state, Msg::QueryStateChanged(QueryState::Loading));
    let view = state.view();

    assert_eq!(view.query, QueryView::Loading);
    assert_eq!(view.rows.len(), 2);
}

#[test]
fn too_short_and_error_replace_results() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::QueryStateChanged(QueryState::Results(sample_results())),
    );
    let (state, _) = update(state, Msg::QueryStateChanged(QueryState::TooShort));
    let view = state.view();
    assert!(view.rows.is_empty());
    assert_eq!(
        view.query.message().as_deref(),
        Some("Type at least 2 characters to search...")
    );

    let (state, _) = update(
        state,
        Msg::QueryStateChanged(QueryState::Results(sample_results())),
    );
    let (state, _) = update(
        state,
        Msg::QueryStateChanged(QueryState::Error("backend unreachable".to_string())),
    );
    let view = state.view();
    assert!(view.rows.is_empty());
    assert_eq!(
        view.query.message().as_deref(),
        Some("Error: backend unreachable")
    );
}

#[test]
fn empty_results_show_no_results_hint() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::QueryStateChanged(QueryState::Results(Vec::new())),
    );
    assert_eq!(state.view().query, QueryView::NoResults);
    assert_eq!(
        state.view().query.message().as_deref(),
        Some("No results found. Try a different search term.")
    );
}

#[test]
fn download_click_outside_result_list_is_ignored() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::QueryStateChanged(QueryState::Results(sample_results())),
    );
    let (_state, effects) = update(state, Msg::DownloadClicked { index: 2 });
    assert!(effects.is_empty());
}
