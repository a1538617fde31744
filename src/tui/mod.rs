//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Allow clone assignment patterns - common in UI state management
#![allow(clippy::assigning_clones)]
// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod component;
pub mod handlers;
pub mod help_overlay;
pub mod help_registry;
pub mod map_view;
pub mod news_popup;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::map::{MapController, MapEvent, TerminalMap, Viewport};
use crate::models::{Location, ViewMode};
use crate::news::NewsFeed;
use crate::shortcuts::{contexts, ShortcutRegistry};

// Re-export TUI components
pub use component::{Component, ComponentEvent};
pub use help_overlay::HelpOverlay;
pub use map_view::MapView;
pub use news_popup::NewsPopupView;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Header text while no country is open.
pub const WORLD_SUBTITLE: &str = "Click on a country to explore its regions";

/// Popup types that can be displayed over the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// News for the selected location
    News,
    /// Keyboard shortcut overview
    HelpOverlay,
}

/// Active component holder for overlays with their own state.
#[derive(Debug, Clone)]
pub enum ActiveComponent {
    /// Help overlay component
    HelpOverlay(HelpOverlay),
}

/// Application state - single source of truth.
///
/// Owns the map controller and the news feed and routes the controller's
/// events between them: a selected location opens (or retargets) the news
/// popup, a view change updates the header, and leaving a country closes
/// the popup.
pub struct AppState {
    // Map and news
    /// World/Regions interaction controller
    pub controller: MapController<TerminalMap>,
    /// News popup and its fetches
    pub news: NewsFeed,

    // Coordinator state
    /// Location whose news is shown
    pub selected_location: Option<Location>,
    /// Current view
    pub view: ViewMode,
    /// Country being explored in the Regions view
    pub current_country: Option<String>,

    // UI state
    /// Active popup, if any
    pub active_popup: Option<PopupType>,
    /// Component backing the active overlay
    pub active_component: Option<ActiveComponent>,
    /// Keyboard shortcuts
    pub shortcuts: ShortcutRegistry,
    /// Status line text
    pub status_message: String,
    /// Error shown in an overlay until dismissed
    pub error_message: Option<String>,
    /// Screen area of the map block, updated before every draw
    pub map_area: Rect,
    reported_world_error: Option<String>,

    // System
    /// Application configuration
    pub config: Config,
    /// Current theme
    pub theme: Theme,
    /// Set when the user quits
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state around a controller and a news feed.
    pub fn new(controller: MapController<TerminalMap>, news: NewsFeed, config: Config) -> Self {
        let theme = Theme::from_mode(config.ui.theme_mode);
        let mut state = Self {
            controller,
            news,
            selected_location: None,
            view: ViewMode::World,
            current_country: None,
            active_popup: None,
            active_component: None,
            shortcuts: ShortcutRegistry::new(),
            status_message: String::new(),
            error_message: None,
            map_area: Rect::default(),
            reported_world_error: None,
            config,
            theme,
            should_quit: false,
        };

        if state.config.ui.show_help_on_startup {
            state.open_help_overlay();
        }
        state
    }

    /// Header subtitle for the current view.
    #[must_use]
    pub fn header_subtitle(&self) -> String {
        match (&self.view, &self.current_country) {
            (ViewMode::Regions, Some(country)) => format!("Exploring {country}"),
            _ => WORLD_SUBTITLE.to_string(),
        }
    }

    /// Advances the map, routes its events and applies finished news fetches.
    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
        self.process_map_events();
        self.news.poll();

        let world_error = self.controller.world_load_error().map(str::to_string);
        if world_error.is_some() && world_error != self.reported_world_error {
            if let Some(e) = &world_error {
                self.set_error(format!("Could not load the world map: {e}"));
            }
        }
        self.reported_world_error = world_error;
    }

    /// Routes every queued controller event.
    pub fn process_map_events(&mut self) {
        for event in self.controller.take_events() {
            self.handle_map_event(event);
        }
    }

    /// Applies one controller event.
    pub fn handle_map_event(&mut self, event: MapEvent) {
        tracing::debug!("Map event: {:?}", event);
        match event {
            MapEvent::LocationSelected(location) => self.select_location(location),
            MapEvent::ViewChanged { mode, country } => {
                self.view = mode;
                self.current_country = country;
                match &self.current_country {
                    Some(country) => self.set_status(format!("Exploring {country}")),
                    None => self.set_status("Back to the world map"),
                }
            }
            MapEvent::ClosePopup => self.close_news_popup(),
        }
    }

    /// Shows news for `location`, restarting the fetch if the popup is open.
    pub fn select_location(&mut self, location: Location) {
        self.news.open(location.clone());
        self.selected_location = Some(location);
        if self.active_popup != Some(PopupType::HelpOverlay) {
            self.active_popup = Some(PopupType::News);
        }
    }

    /// Closes the news popup and forgets the selected location.
    pub fn close_news_popup(&mut self) {
        self.news.close();
        self.selected_location = None;
        if self.active_popup == Some(PopupType::News) {
            self.active_popup = None;
        }
    }

    /// Re-fetches news for the selected location.
    pub fn refresh_news(&mut self) {
        if self.news.refresh() {
            self.set_status("Refreshing news...");
        }
    }

    /// Input context for the shortcut registry.
    #[must_use]
    pub fn input_context(&self) -> &'static str {
        match self.active_popup {
            Some(PopupType::HelpOverlay) => contexts::HELP,
            Some(PopupType::News) => contexts::NEWS_POPUP,
            None => contexts::MAP,
        }
    }

    /// Geographic bounds of the map canvas at `now`.
    #[must_use]
    pub fn map_viewport(&self, now: Instant) -> (Rect, Viewport) {
        let inner = self.map_area.inner(Margin::new(1, 1));
        let viewport = Viewport::from_camera(self.controller.camera(now), inner.width, inner.height);
        (inner, viewport)
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    // === Component Management Methods (Component Trait Pattern) ===

    /// Open the help overlay component
    pub fn open_help_overlay(&mut self) {
        self.active_component = Some(ActiveComponent::HelpOverlay(HelpOverlay::new()));
        self.active_popup = Some(PopupType::HelpOverlay);
    }

    /// Close the active component, returning to the news popup if it is open
    pub fn close_component(&mut self) {
        self.active_component = None;
        self.active_popup = self.news.is_open().then_some(PopupType::News);
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        state.tick(Instant::now());

        let size = terminal.size()?;
        state.map_area = screen_layout(Rect::new(0, 0, size.width, size.height))[1];

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => handlers::handle_mouse_event(state, mouse, Instant::now()),
                // Resize re-renders on the next loop
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Splits the screen into title bar, map and status bar.
fn screen_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Map
            Constraint::Length(5), // Status bar
        ])
        .split(area)
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    let now = Instant::now();

    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = screen_layout(f.area());

    render_title_bar(f, chunks[0], state);
    MapView::render(f, chunks[1], state, now);
    StatusBar::render(f, chunks[2], state, &state.theme);

    // The news popup stays visible underneath the help overlay
    if let Some(popup) = state.news.popup() {
        NewsPopupView::render(f, chunks[1], popup, &state.theme);
    }

    if state.active_popup == Some(PopupType::HelpOverlay) {
        if let Some(ActiveComponent::HelpOverlay(ref help)) = state.active_component {
            help.render(f, f.area(), &state.theme);
        }
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with the application name and the view subtitle
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {APP_NAME} "),
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(state.theme.text_muted)),
        Span::styled(
            state.header_subtitle(),
            Style::default().fg(state.theme.text),
        ),
    ]);

    let title_widget = Paragraph::new(title)
        .style(Style::default().bg(state.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(state.theme.primary))
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(60, 30, f.area());

    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Error ")
                .border_style(Style::default().fg(theme.error))
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[0]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            " Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ]))
    .style(Style::default().fg(theme.text).bg(theme.background));
    f.render_widget(help, chunks[1]);
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
///
/// Returns true when the user quits.
pub fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    // Route to popup handler if popup is active
    if state.active_popup.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    handlers::handle_main_input(state, key)
}
