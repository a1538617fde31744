//! Global News Explorer - terminal world map for recent news
//!
//! Running without a subcommand opens the interactive map. Subcommands give
//! headless access to the backend and the local tables.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newsglobe::app;
use newsglobe::cli::{
    ClassifyArgs, CliError, ConfigArgs, CountriesArgs, NewsArgs, RegionsArgs, RegistryArgs,
};
use newsglobe::config::Config;
use newsglobe::constants::APP_NAME;

/// Global News Explorer - explore recent news on a terminal world map
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// News backend URL (overrides NEWSGLOBE_API_URL and the config file)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List countries from the news backend
    Countries(CountriesArgs),
    /// List regions of a country from the news backend
    Regions(RegionsArgs),
    /// Fetch news for a country or region
    News(NewsArgs),
    /// Classify a headline into a visual theme
    Classify(ClassifyArgs),
    /// List countries that can be explored by region
    Registry(RegistryArgs),
    /// Manage the configuration file
    Config(ConfigArgs),
}

fn env_filter(verbose: bool) -> EnvFilter {
    let filter = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into())
}

/// Logs to the log file; the terminal belongs to the TUI.
fn init_file_logging(verbose: bool) -> Result<()> {
    let path = Config::log_file_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .context(format!("Failed to create log directory: {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context(format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Logs to stderr so stdout stays machine-readable.
fn init_stderr_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {e:#}");
            eprintln!("Warning: Failed to load config: {e:#}");
            Config::default()
        }
    }
}

fn run_command(command: Command, api_url: Option<&str>) -> Result<(), CliError> {
    match command {
        Command::Config(args) => args.execute(),
        Command::Classify(args) => args.execute(),
        Command::Registry(args) => args.execute(&load_config()),
        Command::Countries(args) => {
            let config = load_config();
            args.execute(&config, &config.api_url(api_url))
        }
        Command::Regions(args) => {
            let config = load_config();
            args.execute(&config, &config.api_url(api_url))
        }
        Command::News(args) => {
            let config = load_config();
            args.execute(&config, &config.api_url(api_url))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        init_stderr_logging(cli.verbose);
        if let Err(e) = run_command(command, cli.api_url.as_deref()) {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code.code());
        }
        return Ok(());
    }

    if let Err(e) = init_file_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let config = load_config();
    let api_url = config.api_url(cli.api_url.as_deref());
    tracing::info!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    app::launch_explorer(config, &api_url)
}
