//! CLI command handlers for the news explorer.
//!
//! Headless, scriptable access to the backend and the local tables for
//! automation and testing.

pub mod classify;
pub mod common;
pub mod config;
pub mod countries;
pub mod news;
pub mod regions;
pub mod registry;

// Re-export types used by main.rs and tests
pub use classify::ClassifyArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use countries::CountriesArgs;
pub use news::NewsArgs;
pub use regions::RegionsArgs;
pub use registry::RegistryArgs;
