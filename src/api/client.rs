//! Blocking HTTP client for the news backend.

use super::types::{CountriesResponse, ErrorBody, RegionsResponse};
use crate::constants::{GENERIC_FETCH_FAILURE, MAX_ARTICLE_COUNT};
use crate::error::NewsError;
use crate::models::NewsResult;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Anything that can produce news for a location string.
///
/// Fetches run on background threads, so implementations must be shareable.
pub trait NewsSource: Send + Sync {
    /// Fetches up to `count` articles for `location`.
    fn fetch_news(&self, location: &str, count: u8) -> Result<NewsResult, NewsError>;
}

/// Client for `/api/news`, `/api/countries` and `/api/countries/{name}/regions`.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: String,
}

impl NewsApiClient {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("newsglobe/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Backend base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists the countries the backend knows about.
    pub fn countries(&self) -> Result<CountriesResponse, NewsError> {
        let url = format!("{}/api/countries", self.base_url);
        self.get_json(&url, "Failed to fetch countries")
    }

    /// Lists the regions of a country.
    pub fn regions(&self, country: &str) -> Result<RegionsResponse, NewsError> {
        let url = format!(
            "{}/api/countries/{}/regions",
            self.base_url,
            urlencoding::encode(country)
        );
        self.get_json(&url, &format!("Failed to fetch regions for {country}"))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, fallback: &str) -> Result<T, NewsError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| NewsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().unwrap_or_default();
            let detail = body.message().unwrap_or(fallback).to_string();
            tracing::warn!("GET {} returned {}: {}", url, status, detail);
            return Err(NewsError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<T>()
            .map_err(|e| NewsError::Decode(e.to_string()))
    }
}

impl NewsSource for NewsApiClient {
    fn fetch_news(&self, location: &str, count: u8) -> Result<NewsResult, NewsError> {
        let count = count.clamp(1, MAX_ARTICLE_COUNT);
        let url = format!(
            "{}/api/news/{}?count={}",
            self.base_url,
            urlencoding::encode(location),
            count
        );

        let result: NewsResult = self.get_json(&url, GENERIC_FETCH_FAILURE)?;
        tracing::info!(
            "Fetched {} articles for {}",
            result.articles.len(),
            location
        );
        Ok(result)
    }
}
