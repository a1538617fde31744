//! Shared CLI error type and output helpers.

use serde::Serialize;
use std::fmt;

use crate::api::NewsApiClient;
use crate::config::Config;
use crate::error::NewsError;

/// Process exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or a failed check
    Validation = 1,
    /// File system or serialization failure
    Io = 2,
    /// News backend unreachable or returned an error
    Network = 3,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid arguments or a failed check.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// File system or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Backend failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Network,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<NewsError> for CliError {
    fn from(error: NewsError) -> Self {
        Self::network(error.to_string())
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Builds a news client for `api_url` with the configured timeout.
pub fn news_client(config: &Config, api_url: &str) -> CliResult<NewsApiClient> {
    NewsApiClient::new(api_url, config.request_timeout())
        .map_err(|e| CliError::network(format!("Failed to create HTTP client: {e}")))
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code.code(), 1);
        assert_eq!(CliError::io("x").exit_code.code(), 2);
        assert_eq!(CliError::network("x").exit_code.code(), 3);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_news_error_maps_to_network() {
        let error: CliError = NewsError::Network("connection refused".to_string()).into();
        assert_eq!(error.exit_code, ExitCode::Network);
    }
}
