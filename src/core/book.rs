//! # Books
//!
//! `BookSummary` is the one domain value that flows through every layer:
//! search providers create it, the favourites store persists it, and the
//! renderer draws it. Nothing mutates a summary after construction.
//!
//! `id` is the identity key. Favourite toggling and list diffing compare
//! ids, never titles.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub num_pages: Option<u32>,
    #[serde(default)]
    pub num_editions: u32,
}

impl BookSummary {
    /// Authors joined for display, or "Unknown author" when the list is empty.
    pub fn authors_line(&self) -> String {
        if self.authors.is_empty() {
            "Unknown author".to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// Rating rounded to one decimal, e.g. "4.2". None when unrated.
    pub fn rating_label(&self) -> Option<String> {
        self.average_rating
            .map(|rating| format!("{:.1}", (rating * 10.0).round() / 10.0))
    }
}
