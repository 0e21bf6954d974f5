pub mod catalog;
pub mod openlibrary;

pub use catalog::CatalogProvider;
pub use openlibrary::OpenLibraryProvider;
