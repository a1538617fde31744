//! Lists the countries known to the news backend.

use crate::cli::common::{news_client, print_json, CliResult};
use crate::config::Config;
use clap::Args;

/// List countries from the news backend
#[derive(Debug, Clone, Args)]
pub struct CountriesArgs {
    /// Only show countries with region-level news
    #[arg(long)]
    pub with_regions: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CountriesArgs {
    /// Execute the countries command
    pub fn execute(&self, config: &Config, api_url: &str) -> CliResult<()> {
        let client = news_client(config, api_url)?;
        let mut response = client.countries()?;

        if self.with_regions {
            response.countries.retain(|c| c.has_regions);
            response.total = response.countries.len();
        }

        if self.json {
            return print_json(&response);
        }

        for country in &response.countries {
            let marker = if country.has_regions { "*" } else { " " };
            println!(
                "{} {:<32} {:<4} {}",
                marker, country.name, country.iso2, country.capital
            );
        }
        println!();
        println!("{} countries (* has regions)", response.total);
        Ok(())
    }
}
