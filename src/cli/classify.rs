//! Offline article classification.

use crate::classifier::classify;
use crate::cli::common::{print_json, CliError, CliResult};
use clap::Args;
use serde::Serialize;

/// Classify a headline into a visual theme
#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    /// Article title
    #[arg(short, long)]
    pub title: String,

    /// Article description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    theme: &'static str,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self) -> CliResult<()> {
        if self.title.trim().is_empty() && self.description.is_none() {
            return Err(CliError::validation("Nothing to classify: title is empty"));
        }

        let theme = classify(&self.title, self.description.as_deref());

        if self.json {
            print_json(&ClassifyOutput {
                title: &self.title,
                description: self.description.as_deref(),
                theme: theme.as_str(),
            })
        } else {
            println!("{theme}");
            Ok(())
        }
    }
}
