//! Theme system for consistent UI colors across dark and light modes.
//!
//! The OS theme is detected with `dark-light` unless the config pins one.
//! Besides the UI chrome, a theme carries the map palette and one colour per
//! article theme.

use ratatui::style::Color;

use crate::classifier::ArticleTheme;
use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color
    pub success: Color,
    /// Error state color
    pub error: Color,
    /// Warning state color
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels
    pub text_secondary: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Surface color for popups
    pub surface: Color,

    // Map
    /// Static world outline shown before boundaries load
    pub map_base: Color,
    /// Country boundaries
    pub map_country: Color,
    /// Region boundaries
    pub map_region: Color,
    /// Hovered feature
    pub map_hover: Color,

    // Article themes
    /// Nature and environment stories
    pub article_nature: Color,
    /// Government and politics stories
    pub article_govt: Color,
    /// Conflict and disaster stories
    pub article_negative: Color,
    /// Celebrations and achievements
    pub article_positive: Color,
    /// Everything else
    pub article_default: Color,
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Theme for a configured mode; `Auto` detects the OS setting.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            surface: Color::Rgb(30, 30, 30),

            map_base: Color::DarkGray,
            map_country: Color::Rgb(100, 140, 180),
            map_region: Color::Rgb(120, 190, 140),
            map_hover: Color::Yellow,

            article_nature: Color::Rgb(34, 197, 94),
            article_govt: Color::Rgb(96, 165, 250),
            article_negative: Color::Rgb(248, 113, 113),
            article_positive: Color::Rgb(250, 204, 21),
            article_default: Color::Gray,
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            surface: Color::Rgb(245, 245, 245),

            map_base: Color::Rgb(190, 190, 190),
            map_country: Color::Rgb(40, 80, 140),
            map_region: Color::Rgb(20, 110, 60),
            map_hover: Color::Rgb(180, 100, 0),

            article_nature: Color::Rgb(21, 128, 61),
            article_govt: Color::Rgb(29, 78, 216),
            article_negative: Color::Rgb(185, 28, 28),
            article_positive: Color::Rgb(161, 98, 7),
            article_default: Color::Rgb(60, 60, 60),
        }
    }

    /// Colour for an article theme.
    #[must_use]
    pub const fn article_color(&self, theme: ArticleTheme) -> Color {
        match theme {
            ArticleTheme::Nature => self.article_nature,
            ArticleTheme::Govt => self.article_govt,
            ArticleTheme::Negative => self.article_negative,
            ArticleTheme::Positive => self.article_positive,
            ArticleTheme::Default => self.article_default,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
