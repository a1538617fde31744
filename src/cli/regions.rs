//! Lists the regions of a country known to the news backend.

use crate::cli::common::{news_client, print_json, CliError, CliResult};
use crate::config::Config;
use clap::Args;

/// List regions of a country from the news backend
#[derive(Debug, Clone, Args)]
pub struct RegionsArgs {
    /// Country name (e.g. "Germany")
    #[arg(value_name = "COUNTRY")]
    pub country: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl RegionsArgs {
    /// Execute the regions command
    pub fn execute(&self, config: &Config, api_url: &str) -> CliResult<()> {
        let country = self.country.trim();
        if country.is_empty() {
            return Err(CliError::validation("Country name cannot be empty"));
        }

        let client = news_client(config, api_url)?;
        let response = client.regions(country)?;

        if self.json {
            return print_json(&response);
        }

        println!("Regions of {}", response.country);
        println!();
        for region in &response.regions {
            if region.capital.is_empty() {
                println!("  {}", region.name);
            } else {
                println!("  {:<32} {}", region.name, region.capital);
            }
        }
        println!();
        println!("{} regions", response.total);
        Ok(())
    }
}
