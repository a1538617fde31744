//! Prints the countries that have a region dataset.

use crate::cli::common::{print_json, CliResult};
use crate::config::Config;
use crate::registry::LocationRegistry;
use clap::Args;
use serde::Serialize;

/// List countries that can be explored by region
#[derive(Debug, Clone, Args)]
pub struct RegistryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RegistryEntry<'a> {
    country: &'a str,
    region_dataset_url: &'a str,
    region_name_property: &'a str,
    center: [f64; 2],
    zoom: f64,
}

impl RegistryArgs {
    /// Execute the registry command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let registry = LocationRegistry::builtin().with_overrides(&config.registry.countries);
        let entries: Vec<RegistryEntry<'_>> = registry
            .countries()
            .map(|(name, entry)| RegistryEntry {
                country: name,
                region_dataset_url: &entry.region_dataset_url,
                region_name_property: &entry.region_name_property,
                center: [entry.camera.center.lon, entry.camera.center.lat],
                zoom: entry.camera.zoom,
            })
            .collect();

        if self.json {
            return print_json(&entries);
        }

        for entry in &entries {
            println!(
                "{:<16} zoom {:<4} [{:.2}, {:.2}]  {} ({})",
                entry.country,
                entry.zoom,
                entry.center[0],
                entry.center[1],
                entry.region_dataset_url,
                entry.region_name_property
            );
        }
        println!();
        println!("{} countries with regions", entries.len());
        Ok(())
    }
}
