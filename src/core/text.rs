//! # Display Text
//!
//! `UiText` is the message handle the core stores (e.g. in
//! `BrowseState::error_message`). It is either a resource key resolved at
//! render time or a literal string carried through from elsewhere.
//!
//! Only an English table exists. The core never looks inside a `UiText`, it
//! just hands it to the renderer.

use std::fmt;

/// Keys for every fixed string the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKey {
    SearchResultsTab,
    FavouritesTab,
    SyllabusTab,
    NoSearchResults,
    NoFavourites,
    SearchHint,
    ErrorRequestTimeout,
    ErrorTooManyRequests,
    ErrorNoInternet,
    ErrorServer,
    ErrorSerialization,
    ErrorUnknown,
}

impl StringKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StringKey::SearchResultsTab => "Search Results",
            StringKey::FavouritesTab => "Favourites",
            StringKey::SyllabusTab => "Syllabus",
            StringKey::NoSearchResults => "No search results",
            StringKey::NoFavourites => "You don't have any favourite books yet",
            StringKey::SearchHint => "Search for a title or author",
            StringKey::ErrorRequestTimeout => "The request timed out",
            StringKey::ErrorTooManyRequests => "Too many requests, your quota seems to be exceeded",
            StringKey::ErrorNoInternet => "Couldn't reach the server, check your internet connection",
            StringKey::ErrorServer => "Something went wrong on the server",
            StringKey::ErrorSerialization => "Couldn't parse the response",
            StringKey::ErrorUnknown => "An unknown error occurred",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiText {
    Resource(StringKey),
    Dynamic(String),
}

impl UiText {
    pub fn as_string(&self) -> String {
        match self {
            UiText::Resource(key) => key.as_str().to_string(),
            UiText::Dynamic(text) => text.clone(),
        }
    }
}

impl From<StringKey> for UiText {
    fn from(key: StringKey) -> Self {
        UiText::Resource(key)
    }
}

impl From<&str> for UiText {
    fn from(text: &str) -> Self {
        UiText::Dynamic(text.to_string())
    }
}

impl fmt::Display for UiText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiText::Resource(key) => f.write_str(key.as_str()),
            UiText::Dynamic(text) => f.write_str(text),
        }
    }
}
