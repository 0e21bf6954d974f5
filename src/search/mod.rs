pub mod dispatch;
pub mod provider;
pub mod providers;

pub use dispatch::SearchDispatcher;
pub use provider::{SearchError, SearchProvider, SearchRequest};
pub use providers::{CatalogProvider, OpenLibraryProvider};
