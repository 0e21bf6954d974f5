//! # Browse State
//!
//! Everything the renderer needs to draw the browser, in one record.
//!
//! ```text
//! BrowseState
//! ├── search_query: String           // current text in the search bar
//! ├── search_results: Vec<Book>      // replaced wholesale per search
//! ├── favourite_books: Vec<Book>     // independent of search_results
//! ├── is_loading: bool               // a search is in flight
//! ├── selected_tab: Tab              // Search | Favourites | Syllabus
//! ├── error_message: Option<UiText>  // latest search failed
//! ├── search_ticket: SearchTicket    // newest issued search generation
//! └── min_query_len: usize           // shorter queries never hit a provider
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! `is_loading` and `error_message` are never set at the same time.

use std::fmt;

use crate::core::book::BookSummary;
use crate::core::text::{StringKey, UiText};

/// Query the browser opens with when nothing else is configured.
pub const DEFAULT_SEARCH_QUERY: &str = "Metagrappler";

/// Queries shorter than this (after trimming) are not sent anywhere.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// The three pages of the browser, in pager order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Search,
    Favourites,
    Syllabus,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Search, Tab::Favourites, Tab::Syllabus];

    pub fn index(self) -> usize {
        match self {
            Tab::Search => 0,
            Tab::Favourites => 1,
            Tab::Syllabus => 2,
        }
    }

    pub fn title(self) -> UiText {
        match self {
            Tab::Search => StringKey::SearchResultsTab.into(),
            Tab::Favourites => StringKey::FavouritesTab.into(),
            Tab::Syllabus => StringKey::SyllabusTab.into(),
        }
    }

    /// Neighbouring page, or None at the edges.
    pub fn next(self) -> Option<Tab> {
        Tab::try_from(self.index() + 1).ok()
    }

    pub fn prev(self) -> Option<Tab> {
        self.index().checked_sub(1).and_then(|i| Tab::try_from(i).ok())
    }
}

/// A tab index outside {0, 1, 2}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTab(pub usize);

impl fmt::Display for InvalidTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab index {} out of range (expected 0..=2)", self.0)
    }
}

impl std::error::Error for InvalidTab {}

impl TryFrom<usize> for Tab {
    type Error = InvalidTab;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Tab::Search),
            1 => Ok(Tab::Favourites),
            2 => Ok(Tab::Syllabus),
            other => Err(InvalidTab(other)),
        }
    }
}

/// Generation number of a dispatched search. Only the newest one may
/// touch results or errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SearchTicket(pub u64);

impl SearchTicket {
    pub fn next(self) -> SearchTicket {
        SearchTicket(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    pub search_query: String,
    pub search_results: Vec<BookSummary>,
    pub favourite_books: Vec<BookSummary>,
    pub is_loading: bool,
    pub selected_tab: Tab,
    pub error_message: Option<UiText>,
    pub search_ticket: SearchTicket,
    pub min_query_len: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_QUERY.to_string())
    }
}

impl BrowseState {
    pub fn new(search_query: String) -> Self {
        Self {
            search_query,
            search_results: Vec::new(),
            favourite_books: Vec::new(),
            is_loading: false,
            selected_tab: Tab::Search,
            error_message: None,
            search_ticket: SearchTicket::default(),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }

    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    pub fn is_favourite(&self, id: &str) -> bool {
        self.favourite_books.iter().any(|b| b.id == id)
    }
}
