//! Integration tests for the root coordinator.
//!
//! Drives `AppState` through key and mouse events the way the event loop
//! does, checking how map selections, the news popup and the help overlay
//! interact.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use newsglobe::config::{Config, ThemeMode};
use newsglobe::models::{Location, ViewMode};
use newsglobe::news::{NewsFeed, PopupState};
use newsglobe::shortcuts::Action;
use newsglobe::tui::handlers::{dispatch_action, handle_mouse_event};
use newsglobe::tui::{handle_key_event, AppState, PopupType, WORLD_SUBTITLE};

mod fixtures;
use fixtures::*;

fn test_config() -> Config {
    let mut config = Config::default();
    config.ui.theme_mode = ThemeMode::Dark;
    config
}

fn app_state(news: Arc<FakeNews>) -> AppState {
    let controller = controller_with(Arc::new(MemoryProvider::standard()));
    let feed = NewsFeed::new(news, test_config().article_count());
    let mut state = AppState::new(controller, feed, test_config());
    state.map_area = Rect::new(0, 3, 100, 30);
    state
}

fn press(state: &mut AppState, code: KeyCode) -> bool {
    handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE)).expect("handle key")
}

fn tick_until(state: &mut AppState, mut done: impl FnMut(&AppState) -> bool) -> bool {
    wait_for(|| {
        state.tick(Instant::now());
        done(state)
    })
}

/// World dataset order is Germany, France, Chile; BackTab hovers the last.
fn select_chile(state: &mut AppState) {
    press(state, KeyCode::BackTab);
    press(state, KeyCode::Enter);
}

fn drill_into_germany(state: &mut AppState) {
    press(state, KeyCode::Tab);
    press(state, KeyCode::Enter);
    assert!(tick_until(state, |s| s.view == ViewMode::Regions));
}

#[test]
fn test_country_selection_opens_news_popup() {
    let news = Arc::new(
        FakeNews::default().reply("Chile", Reply::Articles(vec![article("Storm hits coast")])),
    );
    let mut state = app_state(news.clone());

    select_chile(&mut state);

    assert_eq!(state.active_popup, Some(PopupType::News));
    assert_eq!(state.selected_location, Some(Location::country("Chile")));
    assert!(state.news.popup().unwrap().state.is_loading());

    assert!(tick_until(&mut state, |s| s
        .news
        .popup()
        .is_some_and(|p| matches!(p.state, PopupState::Loaded(_)))));
    assert_eq!(news.requests(), vec![("Chile".to_string(), 3)]);
}

#[test]
fn test_escape_closes_news_popup() {
    let mut state = app_state(Arc::new(FakeNews::default()));
    select_chile(&mut state);

    assert!(!press(&mut state, KeyCode::Esc));
    assert_eq!(state.active_popup, None);
    assert!(!state.news.is_open());
    assert_eq!(state.selected_location, None);
}

#[test]
fn test_map_keys_ignored_while_popup_open() {
    let mut state = app_state(Arc::new(FakeNews::default()));
    select_chile(&mut state);

    // Tab is not bound in the popup; the map hover does not move
    let before = state.controller.hover_info();
    press(&mut state, KeyCode::Tab);
    assert_eq!(state.controller.hover_info(), before);
    assert_eq!(state.active_popup, Some(PopupType::News));
}

#[test]
fn test_help_overlay_returns_to_news_popup() {
    let mut state = app_state(Arc::new(FakeNews::default()));
    select_chile(&mut state);

    press(&mut state, KeyCode::Char('?'));
    assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));
    assert!(state.active_component.is_some());
    assert!(state.news.is_open());

    press(&mut state, KeyCode::Esc);
    assert_eq!(state.active_popup, Some(PopupType::News));
    assert!(state.active_component.is_none());
}

#[test]
fn test_help_overlay_from_map() {
    let mut state = app_state(Arc::new(FakeNews::default()));

    press(&mut state, KeyCode::Char('?'));
    assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));
    press(&mut state, KeyCode::Char('?'));
    assert_eq!(state.active_popup, None);
}

#[test]
fn test_quit_from_each_context() {
    let mut state = app_state(Arc::new(FakeNews::default()));
    assert!(press(&mut state, KeyCode::Char('q')));
    assert!(state.should_quit);

    let mut state = app_state(Arc::new(FakeNews::default()));
    select_chile(&mut state);
    assert!(press(&mut state, KeyCode::Char('q')));

    let mut state = app_state(Arc::new(FakeNews::default()));
    press(&mut state, KeyCode::Char('?'));
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(handle_key_event(&mut state, ctrl_c).unwrap());
}

#[test]
fn test_error_overlay_blocks_input_until_dismissed() {
    let mut state = app_state(Arc::new(FakeNews::default()));
    state.set_error("Something broke");

    assert!(!press(&mut state, KeyCode::Char('q')));
    assert!(!state.should_quit);
    assert!(state.error_message.is_some());

    press(&mut state, KeyCode::Enter);
    assert!(state.error_message.is_none());
    assert!(press(&mut state, KeyCode::Char('q')));
}

#[test]
fn test_region_selection_and_back() {
    let news = Arc::new(FakeNews::default());
    let mut state = app_state(news.clone());

    drill_into_germany(&mut state);
    assert_eq!(state.current_country.as_deref(), Some("Germany"));
    assert_eq!(state.header_subtitle(), "Exploring Germany");
    assert_eq!(state.active_popup, None);

    // First region in the dataset is Bavaria
    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Enter);
    assert_eq!(
        state.selected_location,
        Some(Location::region("Bavaria", "Germany"))
    );
    assert!(wait_for(|| !news.requests().is_empty()));
    assert_eq!(news.requests()[0].0, "Bavaria, Germany");

    // Going back to the world closes the popup
    dispatch_action(&mut state, Action::BackToWorld).unwrap();
    assert_eq!(state.view, ViewMode::World);
    assert_eq!(state.current_country, None);
    assert_eq!(state.header_subtitle(), WORLD_SUBTITLE);
    assert_eq!(state.active_popup, None);
    assert!(!state.news.is_open());
}

#[test]
fn test_back_key_in_world_reports_status() {
    let mut state = app_state(Arc::new(FakeNews::default()));
    press(&mut state, KeyCode::Char('b'));
    assert_eq!(state.view, ViewMode::World);
    assert!(!state.status_message.is_empty());
}

#[test]
fn test_selecting_another_location_retargets_popup() {
    let news = Arc::new(FakeNews::default());
    let mut state = app_state(news);

    select_chile(&mut state);
    let first = state.news.generation();

    state.select_location(Location::country("Peru"));
    assert_eq!(state.active_popup, Some(PopupType::News));
    assert_eq!(state.news.location(), Some(&Location::country("Peru")));
    assert!(state.news.generation() > first);
}

#[test]
fn test_mouse_wheel_scrolls_open_popup() {
    let news = Arc::new(FakeNews::default().reply(
        "Chile",
        Reply::Articles(vec![article("One"), article("Two"), article("Three")]),
    ));
    let mut state = app_state(news);
    select_chile(&mut state);
    assert!(tick_until(&mut state, |s| s
        .news
        .popup()
        .is_some_and(|p| matches!(p.state, PopupState::Loaded(_)))));

    let wheel = |kind| MouseEvent {
        kind,
        column: 50,
        row: 15,
        modifiers: KeyModifiers::NONE,
    };

    let camera = state.controller.camera(Instant::now());
    handle_mouse_event(&mut state, wheel(MouseEventKind::ScrollDown), Instant::now());
    handle_mouse_event(&mut state, wheel(MouseEventKind::ScrollDown), Instant::now());
    assert_eq!(state.news.popup().unwrap().scroll, 2);

    // Clicks do not reach the map underneath
    handle_mouse_event(
        &mut state,
        wheel(MouseEventKind::Down(MouseButton::Left)),
        Instant::now(),
    );
    assert_eq!(state.controller.camera(Instant::now()), camera);
    assert_eq!(state.news.location(), Some(&Location::country("Chile")));
}

#[test]
fn test_mouse_wheel_zooms_map() {
    let mut state = app_state(Arc::new(FakeNews::default()));
    let before = state.controller.camera(Instant::now()).zoom;

    let event = MouseEvent {
        kind: MouseEventKind::ScrollUp,
        column: 50,
        row: 15,
        modifiers: KeyModifiers::NONE,
    };
    handle_mouse_event(&mut state, event, Instant::now());

    assert!(state.controller.camera(Instant::now()).zoom > before);
}
