//! Folio library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod search;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    #[default]
    #[value(name = "openlibrary")]
    OpenLibrary,
    Catalog,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::OpenLibrary => "openlibrary",
            Backend::Catalog => "catalog",
        }
    }
}
