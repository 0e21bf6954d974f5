//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Mutex, mpsc};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::action::Action;
use crate::core::book::BookSummary;
use crate::search::{SearchError, SearchProvider, SearchRequest};

/// A minimal book with just an id and title.
pub fn book(id: &str, title: &str) -> BookSummary {
    BookSummary {
        id: id.to_string(),
        title: title.to_string(),
        image_url: String::new(),
        authors: Vec::new(),
        description: String::new(),
        languages: Vec::new(),
        first_publish_year: None,
        average_rating: None,
        rating_count: None,
        num_pages: None,
        num_editions: 1,
    }
}

/// A provider that returns a fixed outcome and records every query it sees.
pub struct ScriptedProvider {
    outcome: Result<Vec<BookSummary>, SearchError>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn ok(books: Vec<BookSummary>) -> Self {
        Self {
            outcome: Ok(books),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn err(error: SearchError) -> Self {
        Self {
            outcome: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, request: SearchRequest<'_>) -> Result<Vec<BookSummary>, SearchError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(request.query.to_string());
        }
        self.outcome.clone()
    }
}

/// Wait up to two seconds for the next action from a background task.
pub async fn recv_action(rx: &mpsc::Receiver<Action>) -> Option<Action> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if let Ok(action) = rx.try_recv() {
            return Some(action);
        }
        if tokio::time::Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
