//! News backend client.
//!
//! Endpoints:
//! - `GET /api/news/{location}?count=N`
//! - `GET /api/countries`
//! - `GET /api/countries/{name}/regions`
//!
//! Location path segments are percent-encoded. Non-2xx responses carry a
//! `{"detail": ...}` body whose text becomes the error message.

pub mod client;
pub mod types;

pub use client::{NewsApiClient, NewsSource};
pub use types::{CountriesResponse, CountrySummary, RegionSummary, RegionsResponse};
