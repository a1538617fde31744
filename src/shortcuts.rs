//! Centralized shortcut and action system.
//!
//! Key events are looked up per input context (`map`, `news_popup`, `help`)
//! and turned into [`Action`]s, which the TUI handlers dispatch. The same
//! action ids appear in the embedded help definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Input context names.
pub mod contexts {
    /// The map view
    pub const MAP: &str = "map";
    /// The news popup
    pub const NEWS_POPUP: &str = "news_popup";
    /// The help overlay
    pub const HELP: &str = "help";
}

/// All possible actions in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === MAP ===
    NextFeature,
    PreviousFeature,
    SelectFeature,
    BackToWorld,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,

    // === NEWS POPUP ===
    ClosePopup,
    RefreshNews,
    ScrollUp,
    ScrollDown,

    // === GENERAL ===
    ToggleHelp,
    Quit,
}

impl Action {
    /// Get the action ID string used in help.toml
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::NextFeature => "next_feature",
            Self::PreviousFeature => "previous_feature",
            Self::SelectFeature => "select_feature",
            Self::BackToWorld => "back_to_world",
            Self::PanLeft => "pan_left",
            Self::PanRight => "pan_right",
            Self::PanUp => "pan_up",
            Self::PanDown => "pan_down",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",

            Self::ClosePopup => "close_popup",
            Self::RefreshNews => "refresh_news",
            Self::ScrollUp => "scroll_up",
            Self::ScrollDown => "scroll_down",

            Self::ToggleHelp => "toggle_help",
            Self::Quit => "quit",
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Modifier keys
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    ///
    /// Shift is dropped for printable characters since terminals disagree on
    /// whether `?` or `+` arrive with it.
    #[must_use]
    pub fn from_event(event: KeyEvent) -> Self {
        let modifiers = match event.code {
            KeyCode::Char(_) | KeyCode::BackTab => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        Self {
            code: event.code,
            modifiers,
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
#[derive(Debug, Clone)]
pub struct ShortcutRegistry {
    bindings: HashMap<(&'static str, KeyBinding), Action>,
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_map_shortcuts();
        registry.register_news_popup_shortcuts();
        registry.register_help_shortcuts();
        registry
    }

    fn register_map_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::MAP;

        // === FEATURES ===
        self.register(ctx, K::Tab, M::NONE, Action::NextFeature);
        self.register(ctx, K::BackTab, M::NONE, Action::PreviousFeature);
        self.register(ctx, K::Char('n'), M::NONE, Action::NextFeature);
        self.register(ctx, K::Char('p'), M::NONE, Action::PreviousFeature);
        self.register(ctx, K::Enter, M::NONE, Action::SelectFeature);
        self.register(ctx, K::Char(' '), M::NONE, Action::SelectFeature);

        // === VIEW ===
        self.register(ctx, K::Esc, M::NONE, Action::BackToWorld);
        self.register(ctx, K::Backspace, M::NONE, Action::BackToWorld);
        self.register(ctx, K::Char('b'), M::NONE, Action::BackToWorld);

        // === CAMERA ===
        self.register(ctx, K::Left, M::NONE, Action::PanLeft);
        self.register(ctx, K::Right, M::NONE, Action::PanRight);
        self.register(ctx, K::Up, M::NONE, Action::PanUp);
        self.register(ctx, K::Down, M::NONE, Action::PanDown);
        self.register(ctx, K::Char('h'), M::NONE, Action::PanLeft);
        self.register(ctx, K::Char('l'), M::NONE, Action::PanRight);
        self.register(ctx, K::Char('k'), M::NONE, Action::PanUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::PanDown);
        self.register(ctx, K::Char('+'), M::NONE, Action::ZoomIn);
        self.register(ctx, K::Char('='), M::NONE, Action::ZoomIn);
        self.register(ctx, K::Char('-'), M::NONE, Action::ZoomOut);

        // === GENERAL ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
    }

    fn register_news_popup_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::NEWS_POPUP;

        self.register(ctx, K::Esc, M::NONE, Action::ClosePopup);
        self.register(ctx, K::Char('x'), M::NONE, Action::ClosePopup);
        self.register(ctx, K::Char('r'), M::NONE, Action::RefreshNews);
        self.register(ctx, K::Up, M::NONE, Action::ScrollUp);
        self.register(ctx, K::Char('k'), M::NONE, Action::ScrollUp);
        self.register(ctx, K::Down, M::NONE, Action::ScrollDown);
        self.register(ctx, K::Char('j'), M::NONE, Action::ScrollDown);
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
    }

    fn register_help_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::HELP;

        self.register(ctx, K::Esc, M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Up, M::NONE, Action::ScrollUp);
        self.register(ctx, K::Char('k'), M::NONE, Action::ScrollUp);
        self.register(ctx, K::Down, M::NONE, Action::ScrollDown);
        self.register(ctx, K::Char('j'), M::NONE, Action::ScrollDown);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
    }

    /// Register a shortcut binding.
    fn register(
        &mut self,
        context: &'static str,
        code: KeyCode,
        modifiers: KeyModifiers,
        action: Action,
    ) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context, binding), action);
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings
            .iter()
            .find(|((ctx, b), _)| *ctx == context && *b == binding)
            .map(|(_, action)| *action)
    }

    /// Distinct actions reachable in `context`.
    #[must_use]
    pub fn actions(&self, context: &str) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .bindings
            .iter()
            .filter(|((ctx, _), _)| *ctx == context)
            .map(|(_, action)| *action)
            .collect();
        actions.sort_by_key(Action::id);
        actions.dedup();
        actions
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
