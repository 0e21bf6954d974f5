//! Open Library provider using the `search.json` endpoint.
//!
//! The endpoint returns works, not editions. Each result document is
//! translated into a `BookSummary`:
//!
//! - `id` is the last segment of the work key (`/works/OL45804W` → `OL45804W`)
//! - the cover comes from `cover_edition_key` when present, else `cover_i`
//! - `first_publish_year` is kept as a string
//! - search results carry no description; it stays empty

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::core::book::BookSummary;
use crate::core::config::{DEFAULT_COVERS_BASE_URL, DEFAULT_OPENLIBRARY_BASE_URL};
use crate::search::{SearchError, SearchProvider, SearchRequest};

/// Fields requested from the search endpoint.
const SEARCH_FIELDS: &str = "key,title,language,cover_i,author_key,author_name,\
    cover_edition_key,first_publish_year,ratings_average,ratings_count,\
    number_of_pages_median,edition_count";

// ============================================================================
// Open Library Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchedBook>,
}

#[derive(Deserialize, Debug)]
struct SearchedBook {
    key: String,
    title: String,
    #[serde(default)]
    language: Option<Vec<String>>,
    #[serde(default)]
    cover_i: Option<u64>,
    #[serde(default)]
    author_name: Option<Vec<String>>,
    #[serde(default)]
    cover_edition_key: Option<String>,
    #[serde(default)]
    first_publish_year: Option<i32>,
    #[serde(default)]
    ratings_average: Option<f64>,
    #[serde(default)]
    ratings_count: Option<u32>,
    #[serde(default)]
    number_of_pages_median: Option<u32>,
    #[serde(default)]
    edition_count: Option<u32>,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn cover_url(covers_base_url: &str, doc: &SearchedBook) -> String {
    match (&doc.cover_edition_key, doc.cover_i) {
        (Some(olid), _) => format!("{covers_base_url}/b/olid/{olid}-L.jpg"),
        (None, Some(id)) => format!("{covers_base_url}/b/id/{id}-L.jpg"),
        (None, None) => String::new(),
    }
}

fn to_book(covers_base_url: &str, doc: SearchedBook) -> BookSummary {
    let image_url = cover_url(covers_base_url, &doc);
    let id = doc
        .key
        .rsplit('/')
        .next()
        .unwrap_or(doc.key.as_str())
        .to_string();
    BookSummary {
        id,
        title: doc.title,
        image_url,
        authors: doc.author_name.unwrap_or_default(),
        description: String::new(),
        languages: doc.language.unwrap_or_default(),
        first_publish_year: doc.first_publish_year.map(|y| y.to_string()),
        average_rating: doc.ratings_average,
        rating_count: doc.ratings_count,
        num_pages: doc.number_of_pages_median,
        num_editions: doc.edition_count.unwrap_or(0),
    }
}

/// Map a transport-level failure onto the search error taxonomy.
fn classify(error: reqwest::Error) -> SearchError {
    if error.is_timeout() {
        SearchError::RequestTimeout
    } else if error.is_connect() {
        SearchError::NoInternet
    } else if error.is_decode() {
        SearchError::Serialization(error.to_string())
    } else {
        SearchError::Unknown(error.to_string())
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct OpenLibraryProvider {
    base_url: String,
    covers_base_url: String,
    client: reqwest::Client,
}

impl OpenLibraryProvider {
    pub fn new(base_url: Option<String>, covers_base_url: Option<String>, timeout: Duration) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_OPENLIBRARY_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let covers_base_url = covers_base_url
            .unwrap_or_else(|| DEFAULT_COVERS_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            base_url,
            covers_base_url,
            client,
        }
    }
}

#[async_trait]
impl SearchProvider for OpenLibraryProvider {
    fn name(&self) -> &str {
        "openlibrary"
    }

    async fn search(&self, request: SearchRequest<'_>) -> Result<Vec<BookSummary>, SearchError> {
        info!(
            "Open Library search: query={:?}, limit={}",
            request.query, request.limit
        );

        let limit = request.limit.to_string();
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("q", request.query),
                ("limit", limit.as_str()),
                ("language", "eng"),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await
            .map_err(classify)?;

        debug!("Open Library response status: {}", response.status());

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Open Library error: {} - {}", status.as_u16(), body);
            return Err(SearchError::from_status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify)?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::Serialization(e.to_string()))?;

        let books: Vec<BookSummary> = parsed
            .docs
            .into_iter()
            .take(request.limit)
            .map(|doc| to_book(&self.covers_base_url, doc))
            .collect();
        info!("Open Library returned {} books", books.len());
        Ok(books)
    }
}
