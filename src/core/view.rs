//! What each page shows, decided from state alone.
//!
//! The search page picks exactly one of: loading, error, empty, results, in
//! that priority. The favourites page shows `favourite_books` or an empty
//! message.

use crate::core::book::BookSummary;
use crate::core::state::BrowseState;
use crate::core::text::UiText;

#[derive(Debug, PartialEq)]
pub enum SearchPage<'a> {
    Loading,
    Error(&'a UiText),
    Empty,
    Results(&'a [BookSummary]),
}

#[derive(Debug, PartialEq)]
pub enum FavouritesPage<'a> {
    Empty,
    Books(&'a [BookSummary]),
}

pub fn search_page(state: &BrowseState) -> SearchPage<'_> {
    if state.is_loading {
        SearchPage::Loading
    } else if let Some(message) = &state.error_message {
        SearchPage::Error(message)
    } else if state.search_results.is_empty() {
        SearchPage::Empty
    } else {
        SearchPage::Results(&state.search_results)
    }
}

pub fn favourites_page(state: &BrowseState) -> FavouritesPage<'_> {
    if state.favourite_books.is_empty() {
        FavouritesPage::Empty
    } else {
        FavouritesPage::Books(&state.favourite_books)
    }
}
