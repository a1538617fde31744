//! Global News Explorer library
//!
//! An interactive terminal world map for browsing recent news by country and,
//! for countries with a region dataset, by region. This crate provides the
//! map interaction controller, the news client and popup, the article
//! classifier, the TUI and the headless CLI commands.

// Module declarations
pub mod api;
pub mod app;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod map;
pub mod models;
pub mod news;
pub mod registry;
pub mod shortcuts;
pub mod tui;
