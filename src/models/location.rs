//! Selectable locations and the map view mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A place the user can ask news for.
///
/// Regions always carry their parent country so the display string is
/// unambiguous (`"Bavaria, Germany"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Location {
    /// A whole country
    Country {
        /// Normalized country name
        name: String,
    },
    /// A sub-national region (state, province, prefecture)
    Region {
        /// Region display name
        name: String,
        /// Normalized parent country name
        country: String,
    },
}

impl Location {
    /// Creates a country location.
    pub fn country(name: impl Into<String>) -> Self {
        Self::Country { name: name.into() }
    }

    /// Creates a region location inside `country`.
    pub fn region(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self::Region {
            name: name.into(),
            country: country.into(),
        }
    }

    /// The bare name of the country or region.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Country { name } | Self::Region { name, .. } => name,
        }
    }

    /// Parent country for regions, `None` for countries.
    #[must_use]
    pub fn parent_country(&self) -> Option<&str> {
        match self {
            Self::Country { .. } => None,
            Self::Region { country, .. } => Some(country),
        }
    }

    /// Returns true for region locations.
    #[must_use]
    pub const fn is_region(&self) -> bool {
        matches!(self, Self::Region { .. })
    }

    /// The string news is fetched for: `name` or `"name, country"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Country { name } => name.clone(),
            Self::Region { name, country } => format!("{name}, {country}"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which layer of the map is interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// World countries are hoverable and clickable
    #[default]
    World,
    /// Regions of one country are hoverable and clickable
    Regions,
}

impl ViewMode {
    /// Lowercase label used in logs and the status bar.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Regions => "regions",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
