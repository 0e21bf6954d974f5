//! # Actions
//!
//! Everything that can happen in the browser becomes an `Action`.
//! User types in the search bar? That's `Action::ChangeSearchQuery(text)`.
//! A search comes back? That's `Action::SearchSucceeded { ticket, results }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns at most one `Effect`. No I/O happens here; the
//! adapter executes effects.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Search completions carry the `SearchTicket` they were issued with. Any
//! completion whose ticket is not the newest one is dropped, so a slow
//! search for an old query can never overwrite a newer one.

use log::debug;

use crate::core::book::BookSummary;
use crate::core::state::{BrowseState, SearchTicket, Tab};
use crate::core::text::UiText;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ChangeSearchQuery(String),
    SelectTab(Tab),
    BookClicked(BookSummary),
    SearchStarted(SearchTicket),
    SearchSucceeded {
        ticket: SearchTicket,
        results: Vec<BookSummary>,
    },
    SearchFailed {
        ticket: SearchTicket,
        message: UiText,
    },
    ToggleFavourite(BookSummary),
    FavouritesLoaded(Vec<BookSummary>),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Debounce, then run a search for `query` tagged with `ticket`.
    ScheduleSearch { query: String, ticket: SearchTicket },
    /// Abort whatever search is pending or in flight.
    CancelSearch,
    /// Move the pager to this page (no-op if it is already there).
    SyncPager(Tab),
    /// Open the detail view for this book.
    Navigate(BookSummary),
    /// Result list was replaced; scroll it back to the top.
    ScrollResultsToTop,
    PersistFavourite { book: BookSummary, favourite: bool },
    Quit,
}

pub fn update(state: &mut BrowseState, action: Action) -> Effect {
    match action {
        Action::ChangeSearchQuery(query) => {
            state.search_query = query;
            // Every query change supersedes whatever was in flight.
            state.search_ticket = state.search_ticket.next();
            if state.search_query.trim().chars().count() < state.min_query_len {
                state.is_loading = false;
                state.error_message = None;
                return Effect::CancelSearch;
            }
            Effect::ScheduleSearch {
                query: state.search_query.clone(),
                ticket: state.search_ticket,
            }
        }
        Action::SelectTab(tab) => {
            state.selected_tab = tab;
            Effect::SyncPager(tab)
        }
        Action::BookClicked(book) => Effect::Navigate(book),
        Action::SearchStarted(ticket) => {
            if ticket != state.search_ticket {
                debug!("Ignoring stale SearchStarted ({:?})", ticket);
                return Effect::None;
            }
            state.is_loading = true;
            state.error_message = None;
            Effect::None
        }
        Action::SearchSucceeded { ticket, results } => {
            if ticket != state.search_ticket {
                debug!(
                    "Discarding {} results from superseded search ({:?})",
                    results.len(),
                    ticket
                );
                return Effect::None;
            }
            state.is_loading = false;
            state.error_message = None;
            state.search_results = results;
            Effect::ScrollResultsToTop
        }
        Action::SearchFailed { ticket, message } => {
            if ticket != state.search_ticket {
                debug!("Discarding failure from superseded search ({:?})", ticket);
                return Effect::None;
            }
            state.is_loading = false;
            state.error_message = Some(message);
            Effect::None
        }
        Action::ToggleFavourite(book) => {
            let favourite = !state.is_favourite(&book.id);
            if favourite {
                state.favourite_books.push(book.clone());
            } else {
                state.favourite_books.retain(|b| b.id != book.id);
            }
            Effect::PersistFavourite { book, favourite }
        }
        Action::FavouritesLoaded(books) => {
            state.favourite_books = books;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
