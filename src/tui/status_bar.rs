//! Status bar widget for displaying status messages, hover hints and help

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::help_registry::HelpRegistry;
use super::{AppState, Theme};
use crate::map::{HoverInfo, HoverKind, MapSurface};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        // First line: error or status message
        if let Some(error) = &state.error_message {
            lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.as_str()),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(theme.text),
            )));
        }

        lines.push(Self::map_line(state, theme));
        lines.push(Self::help_line(state.input_context(), theme));

        let status = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// What the map is doing, or what the hovered feature would do on click
    fn map_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let controller = &state.controller;

        if !controller.world_loaded() {
            let text = if controller.world_load_error().is_some() {
                "World map unavailable"
            } else {
                "Loading world map..."
            };
            return Line::from(Span::styled(text, Style::default().fg(theme.warning)));
        }

        if let Some(country) = controller.pending_country() {
            return Line::from(Span::styled(
                format!("Loading regions of {country}..."),
                Style::default().fg(theme.warning),
            ));
        }

        if controller.surface().is_moving(Instant::now()) {
            return Line::from(Span::styled(
                "Moving...",
                Style::default().fg(theme.text_muted),
            ));
        }

        match controller.hover_info() {
            Some(info) => Self::hover_line(&info, controller.current_country(), theme),
            None => Line::from(Span::styled(
                "Hover a country, or press Tab to cycle through them",
                Style::default().fg(theme.text_muted),
            )),
        }
    }

    fn hover_line(info: &HoverInfo, country: Option<&str>, theme: &Theme) -> Line<'static> {
        let name = match (info.kind, country) {
            (HoverKind::Region, Some(country)) => format!("{}, {}", info.name, country),
            _ => info.name.clone(),
        };
        Line::from(vec![
            Span::styled(
                name,
                Style::default()
                    .fg(theme.map_hover)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" - ", Style::default().fg(theme.text_muted)),
            Span::styled(hover_hint(info), Style::default().fg(theme.text_secondary)),
        ])
    }

    /// Contextual help line from the help registry
    fn help_line(context: &str, theme: &Theme) -> Line<'static> {
        let registry = HelpRegistry::default();
        let hints = registry.format_status_bar_hints(context, 5);

        let mut spans: Vec<Span<'static>> = Vec::new();
        spans.push(Span::styled("Help: ", Style::default().fg(theme.primary)));

        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(key, Style::default().fg(theme.accent)));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(action));
        }

        spans.push(Span::raw(" | "));
        spans.push(Span::styled("?", Style::default().fg(theme.accent)));
        spans.push(Span::raw(": Help"));

        Line::from(spans)
    }
}

/// What clicking the hovered feature does.
#[must_use]
pub fn hover_hint(info: &HoverInfo) -> &'static str {
    match info.kind {
        HoverKind::Country if info.has_regions => "click to explore regions",
        _ => "click for news",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_hint() {
        let germany = HoverInfo {
            kind: HoverKind::Country,
            name: "Germany".to_string(),
            has_regions: true,
        };
        assert_eq!(hover_hint(&germany), "click to explore regions");

        let chile = HoverInfo {
            kind: HoverKind::Country,
            name: "Chile".to_string(),
            has_regions: false,
        };
        assert_eq!(hover_hint(&chile), "click for news");

        let bavaria = HoverInfo {
            kind: HoverKind::Region,
            name: "Bavaria".to_string(),
            has_regions: false,
        };
        assert_eq!(hover_hint(&bavaria), "click for news");
    }

    #[test]
    fn test_region_hover_line_names_country() {
        let bavaria = HoverInfo {
            kind: HoverKind::Region,
            name: "Bavaria".to_string(),
            has_regions: false,
        };
        let line = StatusBar::hover_line(&bavaria, Some("Germany"), &Theme::dark());
        assert_eq!(line.to_string(), "Bavaria, Germany - click for news");
    }
}
