//! Response bodies of the news backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of `GET /api/countries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    /// Country name
    pub name: String,
    /// ISO 3166-1 alpha-3 code
    #[serde(default)]
    pub code: String,
    /// ISO 3166-1 alpha-2 code
    #[serde(default)]
    pub iso2: String,
    /// Capital city
    #[serde(default)]
    pub capital: String,
    /// Whether the backend knows the country's regions
    #[serde(default)]
    pub has_regions: bool,
}

/// Body of `GET /api/countries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountriesResponse {
    /// Countries in backend order
    pub countries: Vec<CountrySummary>,
    /// Number of countries
    #[serde(default)]
    pub total: usize,
}

/// One entry of `GET /api/countries/{name}/regions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSummary {
    /// Region name
    pub name: String,
    /// Region code (e.g., "CA")
    #[serde(default)]
    pub code: String,
    /// Regional capital
    #[serde(default)]
    pub capital: String,
}

/// Body of `GET /api/countries/{name}/regions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionsResponse {
    /// Country the regions belong to
    pub country: String,
    /// Regions in backend order
    pub regions: Vec<RegionSummary>,
    /// Number of regions
    #[serde(default)]
    pub total: usize,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    /// A message string, or a structured validation report
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// The `detail` text, when it is a non-empty string.
    pub(crate) fn message(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}
