//! News popup state and the fetch lifecycle behind it.
//!
//! Every activation of the popup bumps a generation counter and starts one
//! background fetch tagged with that generation. Results are applied only if
//! their generation is still current, so the last requested location wins
//! regardless of the order in which responses arrive.

use crate::api::NewsSource;
use crate::classifier::{classify_article, ArticleTheme};
use crate::constants::MAX_ARTICLE_COUNT;
use crate::error::NewsError;
use crate::models::{Article, Location, NewsResult};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

/// What the popup currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    /// Fetch in flight
    Loading,
    /// At least one article
    Loaded(Vec<Article>),
    /// The backend had nothing; holds the message to show
    Empty(String),
    /// The fetch failed; holds the message to show
    Error(String),
}

impl PopupState {
    /// Resolves a fetch outcome for `location` into a display state.
    pub fn from_result(location: &Location, result: Result<NewsResult, NewsError>) -> Self {
        match result {
            Ok(news) if !news.articles.is_empty() => Self::Loaded(news.articles),
            Ok(news) => Self::Empty(
                news.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("No news found for {}", location.display_name())),
            ),
            Err(e) => Self::Error(e.user_message()),
        }
    }

    /// Returns true while the fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// An open news popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsPopup {
    /// Location the news is for
    pub location: Location,
    /// Display state
    pub state: PopupState,
    /// Generation of the fetch that fills this popup
    pub generation: u64,
    /// Index of the first visible article
    pub scroll: usize,
}

impl NewsPopup {
    /// Articles with their themes, empty unless loaded.
    pub fn themed_articles(&self) -> Vec<(ArticleTheme, &Article)> {
        match &self.state {
            PopupState::Loaded(articles) => articles
                .iter()
                .map(|article| (classify_article(article), article))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Scrolls the article list by one entry.
    pub fn scroll_by(&mut self, down: bool) {
        let count = match &self.state {
            PopupState::Loaded(articles) => articles.len(),
            _ => 0,
        };
        self.scroll = if down {
            (self.scroll + 1).min(count.saturating_sub(1))
        } else {
            self.scroll.saturating_sub(1)
        };
    }
}

type FetchMessage = (u64, Result<NewsResult, NewsError>);

/// Owns the popup and its background fetches.
pub struct NewsFeed {
    source: Arc<dyn NewsSource>,
    article_count: u8,
    generation: u64,
    popup: Option<NewsPopup>,
    sender: Sender<FetchMessage>,
    receiver: Receiver<FetchMessage>,
}

impl NewsFeed {
    /// Creates a closed feed that requests `article_count` articles per location.
    pub fn new(source: Arc<dyn NewsSource>, article_count: u8) -> Self {
        let (sender, receiver) = channel();
        Self {
            source,
            article_count: article_count.clamp(1, MAX_ARTICLE_COUNT),
            generation: 0,
            popup: None,
            sender,
            receiver,
        }
    }

    /// The open popup.
    pub const fn popup(&self) -> Option<&NewsPopup> {
        self.popup.as_ref()
    }

    /// The open popup, mutably.
    pub fn popup_mut(&mut self) -> Option<&mut NewsPopup> {
        self.popup.as_mut()
    }

    /// Returns true if the popup is open.
    pub const fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    /// Location of the open popup.
    pub fn location(&self) -> Option<&Location> {
        self.popup.as_ref().map(|p| &p.location)
    }

    /// Latest generation handed out.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Articles requested per fetch.
    pub const fn article_count(&self) -> u8 {
        self.article_count
    }

    /// Opens (or retargets) the popup and starts a fetch.
    ///
    /// Returns the generation of the new fetch.
    pub fn open(&mut self, location: Location) -> u64 {
        let generation = self.begin(location.clone());
        self.spawn_fetch(generation, location);
        generation
    }

    /// Re-issues the fetch for the open location as a new generation.
    ///
    /// Returns false if the popup is closed.
    pub fn refresh(&mut self) -> bool {
        let Some(location) = self.location().cloned() else {
            return false;
        };
        tracing::debug!("Refreshing news for {}", location);
        self.open(location);
        true
    }

    /// Enters Loading for `location` under a new generation without fetching.
    ///
    /// `open` uses this before spawning the request; callers that deliver
    /// results themselves pair it with [`NewsFeed::apply`].
    pub fn begin(&mut self, location: Location) -> u64 {
        self.generation += 1;
        tracing::info!("Loading news for {} (#{})", location, self.generation);
        self.popup = Some(NewsPopup {
            location,
            state: PopupState::Loading,
            generation: self.generation,
            scroll: 0,
        });
        self.generation
    }

    /// Closes the popup; in-flight results will be discarded.
    pub fn close(&mut self) {
        if self.popup.take().is_some() {
            self.generation += 1;
            tracing::debug!("News popup closed");
        }
    }

    /// Applies a fetch outcome if its generation is current.
    ///
    /// Returns true if the popup changed.
    pub fn apply(&mut self, generation: u64, result: Result<NewsResult, NewsError>) -> bool {
        let Some(popup) = self.popup.as_mut() else {
            tracing::debug!("Dropping news result #{} for closed popup", generation);
            return false;
        };
        if popup.generation != generation || generation != self.generation {
            tracing::debug!(
                "Dropping stale news result #{} (current #{})",
                generation,
                self.generation
            );
            return false;
        }

        if let Err(e) = &result {
            tracing::warn!("News fetch for {} failed: {}", popup.location, e);
        }
        popup.state = PopupState::from_result(&popup.location, result);
        popup.scroll = 0;
        true
    }

    /// Applies finished fetches. Returns true if the popup changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok((generation, result)) => changed |= self.apply(generation, result),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    fn spawn_fetch(&self, generation: u64, location: Location) {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        let count = self.article_count;
        thread::spawn(move || {
            let result = source.fetch_news(&location.display_name(), count);
            let _ = sender.send((generation, result));
        });
    }
}
