//! News popup lifecycle.

pub mod popup;

pub use popup::{NewsFeed, NewsPopup, PopupState};
