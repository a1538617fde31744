use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::NewsApiClient;
use crate::config::Config;
use crate::map::{ControllerSettings, HttpGeometryProvider, MapController, TerminalMap};
use crate::news::NewsFeed;
use crate::registry::LocationRegistry;
use crate::tui;

/// Builds the application state for the explorer.
///
/// Starts loading the world countries dataset in the background; the map
/// becomes interactive once it arrives.
pub fn build_state(config: Config, api_url: &str) -> Result<tui::AppState> {
    let registry = LocationRegistry::builtin().with_overrides(&config.registry.countries);
    tracing::info!("Registry has {} countries with regions", registry.len());

    let provider = HttpGeometryProvider::new(config.request_timeout())
        .context("Failed to create the boundary dataset client")?;
    let client = NewsApiClient::new(api_url, config.request_timeout())
        .context("Failed to create the news client")?;

    let mut controller = MapController::new(
        TerminalMap::new(),
        Arc::new(registry),
        Arc::new(provider),
        ControllerSettings::from(&config.map),
    );
    controller.load_world(&config.map.countries_url);

    let news = NewsFeed::new(Arc::new(client), config.article_count());

    Ok(tui::AppState::new(controller, news, config))
}

/// Runs the interactive explorer until the user quits.
pub fn launch_explorer(config: Config, api_url: &str) -> Result<()> {
    tracing::info!("Starting explorer against {}", api_url);
    let mut app_state = build_state(config, api_url)?;

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    // Check for errors
    result?;

    tracing::info!("Explorer closed");
    Ok(())
}
