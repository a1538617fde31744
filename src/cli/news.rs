//! Fetches news for a location and prints each article with its theme.

use crate::api::NewsSource;
use crate::classifier::{classify_article, ArticleTheme};
use crate::cli::common::{news_client, print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::MAX_ARTICLE_COUNT;
use crate::models::{Article, Location};
use crate::news::PopupState;
use clap::Args;
use serde::Serialize;

/// Fetch news for a country or region
#[derive(Debug, Clone, Args)]
pub struct NewsArgs {
    /// Country name, or region as "Region, Country"
    #[arg(value_name = "LOCATION")]
    pub location: String,

    /// Number of articles (1-5, defaults to the configured count)
    #[arg(short, long, value_name = "N")]
    pub count: Option<u8>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ThemedArticle<'a> {
    theme: ArticleTheme,
    #[serde(flatten)]
    article: &'a Article,
}

#[derive(Debug, Serialize)]
struct NewsOutput<'a> {
    location: String,
    articles: Vec<ThemedArticle<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl NewsArgs {
    /// Parses the location argument.
    ///
    /// `"Bavaria, Germany"` is a region of Germany; anything without a comma
    /// is a country.
    pub fn parse_location(&self) -> CliResult<Location> {
        let raw = self.location.trim();
        let location = match raw.rsplit_once(',') {
            Some((region, country)) => Location::region(region.trim(), country.trim()),
            None => Location::country(raw),
        };

        if location.name().is_empty() || location.parent_country().is_some_and(str::is_empty) {
            return Err(CliError::validation(format!(
                "Invalid location '{}'. Use \"Country\" or \"Region, Country\"",
                self.location
            )));
        }
        Ok(location)
    }

    fn article_count(&self, config: &Config) -> CliResult<u8> {
        match self.count {
            Some(n) if (1..=MAX_ARTICLE_COUNT).contains(&n) => Ok(n),
            Some(n) => Err(CliError::validation(format!(
                "Article count must be between 1 and {MAX_ARTICLE_COUNT}, got {n}"
            ))),
            None => Ok(config.article_count()),
        }
    }

    /// Execute the news command
    pub fn execute(&self, config: &Config, api_url: &str) -> CliResult<()> {
        let location = self.parse_location()?;
        let count = self.article_count(config)?;
        let client = news_client(config, api_url)?;

        let result = client.fetch_news(&location.display_name(), count)?;
        let message = result.message.clone();

        if self.json {
            let output = NewsOutput {
                location: location.display_name(),
                articles: result
                    .articles
                    .iter()
                    .map(|article| ThemedArticle {
                        theme: classify_article(article),
                        article,
                    })
                    .collect(),
                message,
            };
            return print_json(&output);
        }

        match PopupState::from_result(&location, Ok(result)) {
            PopupState::Loaded(articles) => {
                println!("News for {}", location);
                println!();
                for article in &articles {
                    print_article(article);
                }
            }
            PopupState::Empty(message) => println!("{message}"),
            PopupState::Loading | PopupState::Error(_) => {}
        }
        Ok(())
    }
}

fn print_article(article: &Article) {
    let date = article.formatted_date();
    if date.is_empty() {
        println!("[{}] {}", classify_article(article), article.source);
    } else {
        println!("[{}] {} · {}", classify_article(article), article.source, date);
    }
    println!("  {}", article.title);
    if let Some(description) = &article.description {
        println!("  {description}");
    }
    if let Some(url) = &article.url {
        println!("  {url}");
    }
    println!();
}
