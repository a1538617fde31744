//! Static per-country configuration for drilling into regions.
//!
//! The registry knows which countries have a region boundary dataset, which
//! GeoJSON property carries a region's display name in that dataset, and where
//! to point the camera. Raw dataset country names are normalized through an
//! alias table before any lookup.

use crate::config::CountryEntry;
use crate::models::{Camera, LngLat};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Property keys holding a country's name in the world dataset, in priority order.
const COUNTRY_NAME_KEYS: [&str; 2] = ["ADMIN", "name"];

/// Property keys tried after a dataset's configured region name key.
const REGION_NAME_FALLBACK_KEYS: [&str; 2] = ["name", "NAME"];

/// Region label used when no name property is present.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Built-in countries: name, region dataset, name property, center, zoom.
const BUILTIN_COUNTRIES: [(&str, &str, &str, (f64, f64), f64); 12] = [
    (
        "United States",
        "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json",
        "name",
        (-98.5795, 39.8283),
        4.0,
    ),
    (
        "India",
        "https://raw.githubusercontent.com/Subhash9325/GeospatialData-India/master/Indian_States.json",
        "NAME_1",
        (78.9629, 20.5937),
        4.0,
    ),
    (
        "Australia",
        "https://raw.githubusercontent.com/rowanhogan/australian-states/master/states.geojson",
        "STATE_NAME",
        (133.7751, -25.2744),
        3.5,
    ),
    (
        "Canada",
        "https://raw.githubusercontent.com/codeforgermany/click_that_hood/main/public/data/canada-provinces.geojson",
        "name",
        (-106.3468, 56.1304),
        3.0,
    ),
    (
        "Brazil",
        "https://raw.githubusercontent.com/codeforamerica/click_that_hood/master/public/data/brazil-states.geojson",
        "name",
        (-51.9253, -14.2350),
        3.5,
    ),
    (
        "Germany",
        "https://raw.githubusercontent.com/isellsoap/deutschlandGeoJSON/main/2_bundeslaender/4_niedrig.geo.json",
        "NAME_1",
        (10.4515, 51.1657),
        5.0,
    ),
    (
        "France",
        "https://raw.githubusercontent.com/gregoiredavid/france-geojson/master/regions.geojson",
        "nom",
        (2.2137, 46.2276),
        5.0,
    ),
    (
        "Mexico",
        "https://raw.githubusercontent.com/PhantomInsights/mexico-geojson/main/mexico.json",
        "name",
        (-102.5528, 23.6345),
        4.5,
    ),
    (
        "Japan",
        "https://raw.githubusercontent.com/dataofjapan/land/master/japan.geojson",
        "nam",
        (138.2529, 36.2048),
        5.0,
    ),
    (
        "Italy",
        "https://raw.githubusercontent.com/openpolis/geojson-italy/master/geojson/limits_IT_regions.geojson",
        "reg_name",
        (12.5674, 41.8719),
        5.0,
    ),
    (
        "Spain",
        "https://raw.githubusercontent.com/codeforgermany/click_that_hood/main/public/data/spain-communities.geojson",
        "name",
        (-3.7038, 40.4168),
        5.0,
    ),
    (
        "South Korea",
        "https://raw.githubusercontent.com/southkorea/southkorea-maps/master/kostat/2018/json/skorea-provinces-2018-geo.json",
        "name",
        (127.7669, 35.9078),
        6.0,
    ),
];

/// Raw dataset names mapped to normalized country names.
const BUILTIN_ALIASES: [(&str, &str); 1] = [("United States of America", "United States")];

/// Region dataset and camera target for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryConfig {
    /// GeoJSON FeatureCollection with one feature per region
    pub region_dataset_url: String,
    /// Property key holding the region's display name
    pub region_name_property: String,
    /// Camera target when drilling into the country
    pub camera: Camera,
}

impl CountryConfig {
    fn new(url: &str, property: &str, lon: f64, lat: f64, zoom: f64) -> Self {
        Self {
            region_dataset_url: url.to_string(),
            region_name_property: property.to_string(),
            camera: Camera::new(LngLat::new(lon, lat), zoom),
        }
    }
}

/// Lookup tables keyed by normalized country name.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRegistry {
    countries: BTreeMap<String, CountryConfig>,
    aliases: HashMap<String, String>,
}

impl LocationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            countries: BTreeMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Creates the registry with the built-in country table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();

        for (name, url, property, (lon, lat), zoom) in BUILTIN_COUNTRIES {
            registry.insert(name, CountryConfig::new(url, property, lon, lat, zoom));
        }
        for (raw, normalized) in BUILTIN_ALIASES {
            registry.add_alias(raw, normalized);
        }

        registry
    }

    /// Applies user-configured entries on top of this registry.
    ///
    /// Entries replace built-in countries with the same normalized name.
    pub fn with_overrides(mut self, entries: &[CountryEntry]) -> Self {
        for entry in entries {
            let config = CountryConfig {
                region_dataset_url: entry.region_dataset_url.clone(),
                region_name_property: entry.region_name_property.clone(),
                camera: Camera::new(LngLat::new(entry.center[0], entry.center[1]), entry.zoom),
            };
            for alias in &entry.aliases {
                self.add_alias(alias, &entry.name);
            }
            let name = self.normalize(&entry.name).to_string();
            tracing::debug!("Registry override for {}", name);
            self.insert(&name, config);
        }
        self
    }

    /// Registers (or replaces) a country.
    pub fn insert(&mut self, name: &str, config: CountryConfig) {
        self.countries.insert(name.to_string(), config);
    }

    /// Maps a raw dataset name to a normalized country name.
    pub fn add_alias(&mut self, raw: &str, normalized: &str) {
        self.aliases.insert(raw.to_string(), normalized.to_string());
    }

    /// Normalizes a raw dataset country name; unknown names pass through.
    #[must_use]
    pub fn normalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Configuration for a country, by raw or normalized name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CountryConfig> {
        self.countries.get(self.normalize(name))
    }

    /// Returns true if the country has a region dataset.
    #[must_use]
    pub fn has_regions(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Region dataset URL for a country.
    #[must_use]
    pub fn region_source(&self, name: &str) -> Option<&str> {
        self.get(name).map(|c| c.region_dataset_url.as_str())
    }

    /// Camera target for a country.
    #[must_use]
    pub fn camera_for(&self, name: &str) -> Option<Camera> {
        self.get(name).map(|c| c.camera)
    }

    /// All registered countries in name order.
    pub fn countries(&self) -> impl Iterator<Item = (&str, &CountryConfig)> {
        self.countries.iter().map(|(name, config)| (name.as_str(), config))
    }

    /// Number of registered countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Returns true if no country is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Normalized country name of a world-dataset feature.
    ///
    /// Reads `ADMIN`, falling back to `name`.
    #[must_use]
    pub fn country_name(&self, properties: &Map<String, Value>) -> Option<String> {
        first_non_empty(properties, COUNTRY_NAME_KEYS.iter().copied())
            .map(|raw| self.normalize(raw).to_string())
    }

    /// Display name of a region feature inside `country`.
    ///
    /// Tries the country's configured key, then `name`, then `NAME`, and
    /// finally returns `"Unknown"`.
    #[must_use]
    pub fn region_name(&self, properties: &Map<String, Value>, country: &str) -> String {
        let configured = self
            .get(country)
            .map_or("name", |c| c.region_name_property.as_str());

        let keys = std::iter::once(configured).chain(REGION_NAME_FALLBACK_KEYS);
        first_non_empty(properties, keys).map_or_else(|| UNKNOWN_REGION.to_string(), str::to_string)
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn first_non_empty<'a, 'k>(
    properties: &'a Map<String, Value>,
    keys: impl IntoIterator<Item = &'k str>,
) -> Option<&'a str> {
    keys.into_iter()
        .filter_map(|key| properties.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
}
