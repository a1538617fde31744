//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, backend defaults and map defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Global News Explorer";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "newsglobe";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "NewsGlobe";

/// Environment variable that replaces the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "NEWSGLOBE_CONFIG_DIR";

/// Default news backend when neither the environment nor the config file names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the configured backend URL.
pub const API_URL_ENV: &str = "NEWSGLOBE_API_URL";

/// World country boundaries (one feature per country, name under `ADMIN`).
pub const COUNTRIES_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/datasets/geo-countries/master/data/countries.geojson";

/// Camera center of the world view as (longitude, latitude).
pub const WORLD_CENTER: (f64, f64) = (0.0, 20.0);

/// Camera zoom of the world view.
pub const WORLD_ZOOM: f64 = 1.5;

/// Zoom limits applied to every camera move.
pub const MIN_ZOOM: f64 = 1.0;
/// Upper zoom limit.
pub const MAX_ZOOM: f64 = 10.0;

/// Duration of a camera fly-to animation.
pub const DEFAULT_FLY_DURATION_MS: u64 = 1500;

/// Delay between starting a fly-to and swapping region datasets.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Number of articles requested per location unless configured otherwise.
pub const DEFAULT_ARTICLE_COUNT: u8 = 3;

/// Upper bound the backend accepts for `count`.
pub const MAX_ARTICLE_COUNT: u8 = 5;

/// Message shown when a request fails without a server-supplied detail.
pub const GENERIC_FETCH_FAILURE: &str = "Failed to fetch news";
