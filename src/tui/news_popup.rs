//! News popup rendering.
//!
//! The popup floats over the map. While loading it shows a spinner line;
//! once loaded it lists articles from the scroll position, each coloured by
//! its classifier theme.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::Theme;
use crate::news::{NewsPopup, PopupState};

/// News popup widget
pub struct NewsPopupView;

impl NewsPopupView {
    /// Render `popup` centred in `area`.
    pub fn render(f: &mut Frame, area: Rect, popup: &NewsPopup, theme: &Theme) {
        let popup_area = super::centered_rect(70, 80, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" News: {} ", popup.location.display_name()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let body = Paragraph::new(Self::body_lines(popup, theme))
            .style(Style::default().fg(theme.text).bg(theme.surface))
            .wrap(Wrap { trim: true });
        f.render_widget(body, chunks[0]);

        let footer = Paragraph::new(Self::footer_line(popup, theme))
            .style(Style::default().bg(theme.surface));
        f.render_widget(footer, chunks[1]);
    }

    fn body_lines(popup: &NewsPopup, theme: &Theme) -> Vec<Line<'static>> {
        match &popup.state {
            PopupState::Loading => vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  Loading news for {}...", popup.location.display_name()),
                    Style::default().fg(theme.text_secondary),
                )),
            ],
            PopupState::Empty(message) => vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {message}"),
                    Style::default().fg(theme.text_muted),
                )),
            ],
            PopupState::Error(message) => vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(
                        "  Error: ",
                        Style::default()
                            .fg(theme.error)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(message.clone(), Style::default().fg(theme.error)),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    "  Press r to try again",
                    Style::default().fg(theme.text_muted),
                )),
            ],
            PopupState::Loaded(_) => {
                let mut lines = Vec::new();
                for (article_theme, article) in popup.themed_articles().into_iter().skip(popup.scroll)
                {
                    let color = theme.article_color(article_theme);

                    let mut header = vec![
                        Span::styled("● ", Style::default().fg(color)),
                        Span::styled(
                            article.source.clone(),
                            Style::default()
                                .fg(theme.text_secondary)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ];
                    let date = article.formatted_date();
                    if !date.is_empty() {
                        header.push(Span::styled(
                            format!(" · {date}"),
                            Style::default().fg(theme.text_muted),
                        ));
                    }
                    header.push(Span::styled(
                        format!("  [{article_theme}]"),
                        Style::default().fg(color),
                    ));
                    lines.push(Line::from(header));

                    lines.push(Line::from(Span::styled(
                        article.title.clone(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )));
                    if let Some(description) = &article.description {
                        lines.push(Line::from(Span::styled(
                            description.clone(),
                            Style::default().fg(theme.text),
                        )));
                    }
                    if let Some(url) = &article.url {
                        lines.push(Line::from(Span::styled(
                            url.clone(),
                            Style::default()
                                .fg(theme.text_muted)
                                .add_modifier(Modifier::UNDERLINED),
                        )));
                    }
                    lines.push(Line::from(""));
                }
                lines
            }
        }
    }

    fn footer_line(popup: &NewsPopup, theme: &Theme) -> Line<'static> {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
        let text = |t: &'static str| Span::styled(t, Style::default().fg(theme.text_muted));

        let mut spans = Vec::new();
        if let PopupState::Loaded(articles) = &popup.state {
            spans.push(Span::styled(
                format!(" {}/{} ", popup.scroll + 1, articles.len()),
                Style::default().fg(theme.text_secondary),
            ));
            spans.push(key("↑↓"));
            spans.push(text(" scroll  "));
        } else {
            spans.push(Span::raw(" "));
        }
        spans.push(key("r"));
        spans.push(text(" refresh  "));
        spans.push(key("Esc"));
        spans.push(text(" close"));
        Line::from(spans)
    }
}
