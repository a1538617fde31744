//! Component trait pattern for TUI overlays.
//!
//! Components own their state, handle their own keys and report back to
//! `AppState` through [`ComponentEvent`]s.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::tui::Theme;

/// A component that can be rendered and handle input.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the parent needs to act.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Render the component within `area`.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);

    /// Check if component should close.
    fn should_close(&self) -> bool {
        false
    }
}

/// Events emitted by overlay components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentEvent {
    /// The component was dismissed
    Closed,
    /// The user asked to quit from inside the component
    QuitRequested,
}
