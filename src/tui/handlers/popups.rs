//! Popup input handlers.

use anyhow::Result;
use crossterm::event;

use crate::shortcuts::contexts;
use crate::tui::{ActiveComponent, AppState, Component, ComponentEvent, PopupType};

/// Route input to the active popup
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.active_popup {
        Some(PopupType::HelpOverlay) => handle_help_overlay_input(state, key),
        Some(PopupType::News) => handle_news_popup_input(state, key),
        None => Ok(false),
    }
}

/// Handle input for the news popup
pub fn handle_news_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.shortcuts.lookup(contexts::NEWS_POPUP, key) {
        Some(action) => super::dispatch_action(state, action),
        None => Ok(false),
    }
}

/// Handle input for the help overlay
pub fn handle_help_overlay_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let event = match state.active_component {
        Some(ActiveComponent::HelpOverlay(ref mut help)) => help.handle_input(key),
        None => Some(ComponentEvent::Closed),
    };

    match event {
        Some(ComponentEvent::Closed) => {
            state.close_component();
            Ok(false)
        }
        Some(ComponentEvent::QuitRequested) => {
            state.should_quit = true;
            Ok(true)
        }
        None => Ok(false),
    }
}
