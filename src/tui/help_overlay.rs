//! Help overlay listing every keyboard shortcut by context.
//!
//! Opened with `?` from the map or the news popup. Content comes from the
//! embedded help registry so it cannot drift from the status bar hints.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use super::component::{Component, ComponentEvent};
use super::help_registry::{HelpRegistry, CONTEXT_ORDER};
use super::Theme;
use crate::shortcuts::{contexts, Action, ShortcutRegistry};

/// Scrollable help overlay.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    total_lines: usize,
    registry: HelpRegistry,
    shortcuts: ShortcutRegistry,
    closed: bool,
}

impl HelpOverlay {
    /// Creates a help overlay scrolled to the top.
    #[must_use]
    pub fn new() -> Self {
        let registry = HelpRegistry::default();
        let total_lines = Self::content(&registry, &Theme::dark()).len();
        Self {
            scroll_offset: 0,
            total_lines,
            registry,
            shortcuts: ShortcutRegistry::new(),
            closed: false,
        }
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub const fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    fn content(registry: &HelpRegistry, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("  {}", registry.app_name()),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Hover a country to see whether it has regions. Countries with regions open \
                 a regional map; the others, and every region, open the latest news.",
                Style::default().fg(theme.text_secondary),
            )),
            Line::from(""),
        ];

        for name in CONTEXT_ORDER {
            let Some(context) = registry.get_context(name) else {
                continue;
            };
            lines.push(Line::from(Span::styled(
                format!("═══ {} ═══", context.name.to_uppercase()),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", context.description),
                Style::default().fg(theme.text_muted),
            )));

            for binding in registry.get_bindings(name) {
                let (keys, action) = HelpRegistry::format_binding_for_help(binding);
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<24}"), Style::default().fg(theme.success)),
                    Span::styled(action, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press '?' or Esc to close • ↑↓ to scroll",
            Style::default().fg(theme.text_muted),
        )));
        lines
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match self.shortcuts.lookup(contexts::HELP, key)? {
            Action::ScrollUp => {
                self.scroll_up();
                None
            }
            Action::ScrollDown => {
                self.scroll_down();
                None
            }
            Action::ToggleHelp => {
                self.closed = true;
                Some(ComponentEvent::Closed)
            }
            Action::Quit => Some(ComponentEvent::QuitRequested),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let modal_area = super::centered_rect(70, 80, area);
        frame.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let visible_height = content_area.height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(Self::content(&self.registry, theme))
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.surface))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, content_area);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .style(Style::default().fg(theme.primary));

        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines.saturating_sub(visible_height))
                .position(self.scroll_offset);

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}
