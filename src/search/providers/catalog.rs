//! Offline catalog provider.
//!
//! Searches a local JSON file holding an array of `BookSummary` values.
//! A book matches when every whitespace-separated query term appears
//! (case-insensitively) in its title or in one of its authors. The file is
//! re-read on every search so edits show up without a restart.

use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info};

use crate::core::book::BookSummary;
use crate::search::{SearchError, SearchProvider, SearchRequest};

pub struct CatalogProvider {
    path: PathBuf,
}

impl CatalogProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_catalog(&self) -> Result<Vec<BookSummary>, SearchError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SearchError::Unknown(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&json).map_err(|e| SearchError::Serialization(e.to_string()))
    }
}

fn matches(book: &BookSummary, terms: &[String]) -> bool {
    let title = book.title.to_lowercase();
    let authors: Vec<String> = book.authors.iter().map(|a| a.to_lowercase()).collect();
    terms
        .iter()
        .all(|term| title.contains(term) || authors.iter().any(|a| a.contains(term)))
}

#[async_trait]
impl SearchProvider for CatalogProvider {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn search(&self, request: SearchRequest<'_>) -> Result<Vec<BookSummary>, SearchError> {
        let catalog = self.read_catalog().await?;
        debug!(
            "Catalog {} holds {} books",
            self.path.display(),
            catalog.len()
        );

        let terms: Vec<String> = request
            .query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        let books: Vec<BookSummary> = catalog
            .into_iter()
            .filter(|book| matches(book, &terms))
            .take(request.limit)
            .collect();
        info!("Catalog search {:?}: {} matches", request.query, books.len());
        Ok(books)
    }
}
