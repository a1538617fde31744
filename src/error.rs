//! Error taxonomy for the news client, the boundary loader and the map surface.
//!
//! None of these errors are fatal to the application: news errors end up as
//! the popup's error state, layer load errors fall back to country-level news,
//! and surface errors are logged by the controller.

use crate::constants::GENERIC_FETCH_FAILURE;
use thiserror::Error;

/// Errors raised while fetching news from the backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NewsError {
    /// The request never produced a response (connection refused, timeout, DNS).
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("{detail}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Server-supplied `detail`, or the generic failure message
        detail: String,
    },

    /// The backend answered 2xx but the body was not a news result.
    #[error("Invalid response from news service: {0}")]
    Decode(String),
}

impl NewsError {
    /// Text shown to the user for this error.
    ///
    /// Server details and transport errors are shown as-is; undecodable
    /// bodies fall back to the generic failure message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(message) => message.clone(),
            Self::Http { detail, .. } => detail.clone(),
            Self::Decode(_) => GENERIC_FETCH_FAILURE.to_string(),
        }
    }
}

/// Errors raised while loading a boundary dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayerLoadError {
    /// The dataset could not be downloaded.
    #[error("Failed to fetch {url}: {message}")]
    Fetch {
        /// Dataset URL
        url: String,
        /// Transport error text
        message: String,
    },

    /// The dataset host answered with a non-2xx status.
    #[error("Failed to fetch {url}: HTTP {status}")]
    Http {
        /// Dataset URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The document is not valid GeoJSON.
    #[error("Malformed GeoJSON at {url}: {message}")]
    Parse {
        /// Dataset URL
        url: String,
        /// Parser error text
        message: String,
    },

    /// The document is GeoJSON but not a FeatureCollection.
    #[error("{url} is not a FeatureCollection")]
    NotFeatureCollection {
        /// Dataset URL
        url: String,
    },
}

/// Errors raised by map surface mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// A source with this id is already registered.
    #[error("Source '{0}' already exists")]
    DuplicateSource(String),

    /// A layer with this id is already registered.
    #[error("Layer '{0}' already exists")]
    DuplicateLayer(String),

    /// A layer referenced a source that does not exist.
    #[error("Source '{0}' does not exist")]
    MissingSource(String),
}
