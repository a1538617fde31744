//! Map input handler.

use anyhow::Result;
use crossterm::event;

use crate::shortcuts::contexts;
use crate::tui::AppState;

/// Handle input while no popup is open
pub fn handle_main_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    if let Some(action) = state.shortcuts.lookup(contexts::MAP, key) {
        super::dispatch_action(state, action)
    } else {
        // No action mapped - ignore key
        Ok(false)
    }
}
