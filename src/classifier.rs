//! Keyword heuristics that tag an article with a visual theme.
//!
//! The theme only drives colouring; it is not a content judgement. Keywords
//! are matched as lowercase substrings, so `"win"` also matches `"winter"`.

use crate::models::Article;
use serde::Serialize;
use std::fmt;

const NATURE_KEYWORDS: &[&str] = &[
    "climate",
    "environment",
    "forest",
    "park",
    "wild",
    "mountain",
    "river",
    "ocean",
    "planet",
    "animal",
    "storm",
    "weather",
    "green",
];

const GOVT_KEYWORDS: &[&str] = &[
    "election",
    "vote",
    "congress",
    "senate",
    "law",
    "tax",
    "economy",
    "market",
    "stock",
    "trade",
    "president",
    "minister",
    "policy",
    "govt",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "dead", "kill", "crash", "war", "conflict", "crisis", "disaster", "attack", "murder", "died",
    "fail", "risk", "warning",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "win",
    "success",
    "record",
    "grow",
    "safe",
    "peace",
    "award",
    "best",
    "happy",
    "celebrate",
    "breakthrough",
    "launch",
];

/// Visual theme of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleTheme {
    /// Environment, weather, wildlife
    Nature,
    /// Politics and economy
    Govt,
    /// Accidents, conflict, danger
    Negative,
    /// Wins and good news
    Positive,
    /// Nothing matched
    Default,
}

impl ArticleTheme {
    /// Themes in match priority order, followed by the fallback.
    pub const ALL: [Self; 5] = [
        Self::Nature,
        Self::Govt,
        Self::Negative,
        Self::Positive,
        Self::Default,
    ];

    /// Lowercase theme name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nature => "nature",
            Self::Govt => "govt",
            Self::Negative => "negative",
            Self::Positive => "positive",
            Self::Default => "default",
        }
    }

    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Nature => NATURE_KEYWORDS,
            Self::Govt => GOVT_KEYWORDS,
            Self::Negative => NEGATIVE_KEYWORDS,
            Self::Positive => POSITIVE_KEYWORDS,
            Self::Default => &[],
        }
    }
}

impl fmt::Display for ArticleTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a title and optional description.
#[must_use]
pub fn classify(title: &str, description: Option<&str>) -> ArticleTheme {
    let text = format!("{} {}", title, description.unwrap_or_default()).to_lowercase();

    ArticleTheme::ALL
        .into_iter()
        .find(|theme| theme.keywords().iter().any(|k| text.contains(k)))
        .unwrap_or(ArticleTheme::Default)
}

/// Classifies an article by its title and description.
#[must_use]
pub fn classify_article(article: &Article) -> ArticleTheme {
    classify(&article.title, article.description.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nature_beats_negative() {
        assert_eq!(
            classify("Storm kills 3", Some("")),
            ArticleTheme::Nature
        );
    }

    #[test]
    fn test_govt_beats_positive() {
        assert_eq!(
            classify("Minister wins award", None),
            ArticleTheme::Govt
        );
    }

    #[test]
    fn test_negative_beats_positive() {
        assert_eq!(
            classify("Team fails to win", None),
            ArticleTheme::Negative
        );
    }

    #[test]
    fn test_positive_match() {
        assert_eq!(
            classify("Local bakery celebrates 50 years", None),
            ArticleTheme::Positive
        );
    }

    #[test]
    fn test_no_match_is_default() {
        assert_eq!(classify("Local bakery opens", Some("")), ArticleTheme::Default);
        assert_eq!(classify("", None), ArticleTheme::Default);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("ELECTION NIGHT", None), ArticleTheme::Govt);
    }

    #[test]
    fn test_description_is_searched() {
        assert_eq!(
            classify("Quiet day", Some("A rare animal was spotted")),
            ArticleTheme::Nature
        );
    }

    #[test]
    fn test_substring_matching() {
        // "win" inside "winter"
        assert_eq!(classify("Winter begins", None), ArticleTheme::Positive);
    }

    #[test]
    fn test_classify_article() {
        let article = Article::new("Senate passes bill", "Reuters");
        assert_eq!(classify_article(&article), ArticleTheme::Govt);
        assert_eq!(classify_article(&article).to_string(), "govt");
    }
}
