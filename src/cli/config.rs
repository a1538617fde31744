//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init(ConfigInitArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a default config file
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    force: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Init(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&config)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self) -> CliResult<()> {
        let path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;

        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        Config::default()
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Global News Explorer Configuration");
    println!("==================================");
    println!();

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Timeout:  {}s", config.api.timeout_secs);
    println!();

    println!("News:");
    println!("  Articles per location: {}", config.article_count());
    println!();

    println!("Map:");
    println!("  Countries dataset: {}", config.map.countries_url);
    println!("  Fly duration:      {}ms", config.map.fly_duration_ms);
    println!("  Settle delay:      {}ms", config.map.settle_delay_ms);
    println!();

    println!("UI:");
    println!(
        "  Theme Mode: {}",
        format!("{:?}", config.ui.theme_mode).to_lowercase()
    );
    println!("  Show help on startup: {}", config.ui.show_help_on_startup);
    println!();

    if !config.registry.countries.is_empty() {
        println!("Registry overrides:");
        for entry in &config.registry.countries {
            println!("  {}: {}", entry.name, entry.region_dataset_url);
        }
        println!();
    }
}
