//! Data models for locations, articles and map geometry.
//!
//! This module contains the plain data structures shared by the map controller,
//! the news feed and the UI. Models are independent of UI and network code.

pub mod article;
pub mod geo;
pub mod location;

// Re-export all model types
pub use article::{Article, NewsResult};
pub use geo::{Camera, LngLat};
pub use location::{Location, ViewMode};
