//! Action dispatch for the map and the news popup.

use std::time::Instant;

use anyhow::Result;

use crate::shortcuts::Action;
use crate::tui::{AppState, PopupType};

/// Fraction of the visible longitude span moved per pan step
const PAN_STEP: f64 = 0.1;

/// Zoom change per zoom step
const ZOOM_STEP: f64 = 0.5;

/// Dispatch an action. Returns true when the user quits.
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    let now = Instant::now();

    match action {
        // === MAP ===
        Action::NextFeature => state.controller.hover_step(true, now),
        Action::PreviousFeature => state.controller.hover_step(false, now),
        Action::SelectFeature => {
            state.controller.click_hovered(now);
            state.process_map_events();
        }
        Action::BackToWorld => {
            if state.controller.go_back(now) {
                state.process_map_events();
            } else {
                state.set_status("Already showing the world map");
            }
        }
        Action::PanLeft => state.controller.pan(-PAN_STEP, 0.0, now),
        Action::PanRight => state.controller.pan(PAN_STEP, 0.0, now),
        Action::PanUp => state.controller.pan(0.0, PAN_STEP, now),
        Action::PanDown => state.controller.pan(0.0, -PAN_STEP, now),
        Action::ZoomIn => state.controller.zoom_by(ZOOM_STEP, now),
        Action::ZoomOut => state.controller.zoom_by(-ZOOM_STEP, now),

        // === NEWS POPUP ===
        Action::ClosePopup => state.close_news_popup(),
        Action::RefreshNews => state.refresh_news(),
        Action::ScrollUp => {
            if let Some(popup) = state.news.popup_mut() {
                popup.scroll_by(false);
            }
        }
        Action::ScrollDown => {
            if let Some(popup) = state.news.popup_mut() {
                popup.scroll_by(true);
            }
        }

        // === GENERAL ===
        Action::ToggleHelp => {
            if state.active_popup == Some(PopupType::HelpOverlay) {
                state.close_component();
            } else {
                state.open_help_overlay();
            }
        }
        Action::Quit => {
            state.should_quit = true;
            return Ok(true);
        }
    }

    Ok(false)
}
