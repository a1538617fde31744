//! Mouse input: hover, click and wheel zoom on the map canvas.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::map::PointerEvent;
use crate::tui::{AppState, PopupType};

/// Handle a mouse event.
///
/// The map only receives pointer input while no popup is open; the wheel
/// scrolls the news popup instead when it is.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    match state.active_popup {
        Some(PopupType::News) => {
            if let Some(popup) = state.news.popup_mut() {
                match mouse.kind {
                    MouseEventKind::ScrollDown => popup.scroll_by(true),
                    MouseEventKind::ScrollUp => popup.scroll_by(false),
                    _ => {}
                }
            }
            return;
        }
        Some(PopupType::HelpOverlay) => return,
        None => {}
    }

    let (inner, viewport) = state.map_viewport(now);
    let point = cell_to_map(inner, mouse.column, mouse.row)
        .map(|(col, row)| viewport.unproject(col, row));

    match (mouse.kind, point) {
        (MouseEventKind::Moved, Some(point)) => {
            state
                .controller
                .handle_pointer(PointerEvent::Move(point), now);
        }
        (MouseEventKind::Moved, None) => {
            state.controller.handle_pointer(PointerEvent::Leave, now);
        }
        (MouseEventKind::Down(MouseButton::Left), Some(point)) => {
            state
                .controller
                .handle_pointer(PointerEvent::Click(point), now);
            state.process_map_events();
        }
        (MouseEventKind::ScrollUp, Some(_)) => state.controller.zoom_by(0.5, now),
        (MouseEventKind::ScrollDown, Some(_)) => state.controller.zoom_by(-0.5, now),
        _ => {}
    }
}

/// Converts a screen cell to a position relative to `area`, if inside it.
fn cell_to_map(area: Rect, column: u16, row: u16) -> Option<(u16, u16)> {
    area.contains(Position::new(column, row))
        .then(|| (column - area.x, row - area.y))
}
