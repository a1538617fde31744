//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{
    API_URL_ENV, APP_BINARY_NAME, CONFIG_DIR_ENV, CONFIG_DIR_NAME, COUNTRIES_SOURCE_URL,
    DEFAULT_API_URL, DEFAULT_ARTICLE_COUNT, DEFAULT_FLY_DURATION_MS, DEFAULT_SETTLE_DELAY_MS,
    MAX_ARTICLE_COUNT, MAX_ZOOM, MIN_ZOOM,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// News backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the news backend (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

/// News popup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Articles requested per location (clamped to 1..=5)
    pub article_count: u8,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            article_count: DEFAULT_ARTICLE_COUNT,
        }
    }
}

/// Map data and transition timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// World countries GeoJSON
    pub countries_url: String,
    /// Camera fly-to duration in milliseconds
    pub fly_duration_ms: u64,
    /// Delay before the region dataset is swapped in, in milliseconds
    pub settle_delay_ms: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            countries_url: COUNTRIES_SOURCE_URL.to_string(),
            fly_duration_ms: DEFAULT_FLY_DURATION_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl MapConfig {
    /// Camera fly-to duration.
    #[must_use]
    pub const fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }

    /// Region load settle delay.
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display help on startup
    pub show_help_on_startup: bool,
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: false,
            theme_mode: ThemeMode::default(),
        }
    }
}

/// A user-supplied region dataset for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryEntry {
    /// Normalized country name (e.g., "Chile")
    pub name: String,
    /// GeoJSON FeatureCollection with one feature per region
    pub region_dataset_url: String,
    /// Property key holding each region's display name
    #[serde(default = "default_region_name_property")]
    pub region_name_property: String,
    /// Camera center as [longitude, latitude]
    pub center: [f64; 2],
    /// Camera zoom when drilling in
    #[serde(default = "default_country_zoom")]
    pub zoom: f64,
    /// Raw dataset names that should resolve to this country
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

fn default_region_name_property() -> String {
    "name".to_string()
}

fn default_country_zoom() -> f64 {
    5.0
}

/// Extra location registry entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegistryConfig {
    /// Countries added to (or replacing) the built-in table
    pub countries: Vec<CountryEntry>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/NewsGlobe/config.toml`
/// - macOS: `~/Library/Application Support/NewsGlobe/config.toml`
/// - Windows: `%APPDATA%\NewsGlobe\config.toml`
///
/// # Validation
///
/// - `api.base_url`, `map.countries_url` and registry URLs must be http(s)
/// - `api.timeout_secs` must be positive
/// - registry centers must be valid coordinates and zooms within map limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// News backend
    pub api: ApiConfig,
    /// News popup
    pub news: NewsConfig,
    /// Map data and timing
    pub map: MapConfig,
    /// UI preferences
    pub ui: UiConfig,
    /// Extra region datasets
    pub registry: RegistryConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/NewsGlobe/`
    /// - macOS: `~/Library/Application Support/NewsGlobe/`
    /// - Windows: `%APPDATA%\NewsGlobe\`
    ///
    /// `NEWSGLOBE_CONFIG_DIR` replaces the whole path when set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the path of the TUI log file.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(format!("{APP_BINARY_NAME}.log")))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate().context(format!(
            "Invalid config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_url("map.countries_url", &self.map.countries_url)?;

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }

        for entry in &self.registry.countries {
            if entry.name.trim().is_empty() {
                anyhow::bail!("registry country name cannot be empty");
            }
            validate_url(
                &format!("registry entry '{}'", entry.name),
                &entry.region_dataset_url,
            )?;

            let [lon, lat] = entry.center;
            if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                anyhow::bail!(
                    "registry entry '{}' has an invalid center [{}, {}]",
                    entry.name,
                    lon,
                    lat
                );
            }
            if !(MIN_ZOOM..=MAX_ZOOM).contains(&entry.zoom) {
                anyhow::bail!(
                    "registry entry '{}' zoom must be between {} and {}",
                    entry.name,
                    MIN_ZOOM,
                    MAX_ZOOM
                );
            }
        }

        Ok(())
    }

    /// Articles to request per location, clamped to what the backend accepts.
    #[must_use]
    pub fn article_count(&self) -> u8 {
        self.news.article_count.clamp(1, MAX_ARTICLE_COUNT)
    }

    /// Request timeout for the news backend.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Resolves the backend URL.
    ///
    /// Precedence: explicit override (CLI flag), then `NEWSGLOBE_API_URL`,
    /// then the config file value.
    #[must_use]
    pub fn api_url(&self, cli_override: Option<&str>) -> String {
        self.api_url_with(cli_override, std::env::var(API_URL_ENV).ok())
    }

    fn api_url_with(&self, cli_override: Option<&str>, env_value: Option<String>) -> String {
        let url = cli_override
            .map(str::to_string)
            .or_else(|| env_value.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| self.api.base_url.clone());

        url.trim_end_matches('/').to_string()
    }
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        anyhow::bail!("{field} must be an http(s) URL, got '{url}'")
    }
}
