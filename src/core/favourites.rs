//! # Favourites Persistence
//!
//! Favourite books live in `~/.folio/favourites.json` as an ordered list of
//! `{ book, added_at }` entries, oldest first.
//!
//! `set_favourite(book, bool)` is idempotent and keyed by `book.id`: adding
//! an existing favourite or removing a missing one leaves the file alone.
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash
//! safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::book::BookSummary;
use crate::core::config::folio_dir;

const FAVOURITES_FILE: &str = "favourites.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FavouriteEntry {
    pub book: BookSummary,
    /// Unix timestamp (seconds) when the book was favourited.
    pub added_at: i64,
}

#[derive(Serialize, Deserialize, Default, Debug)]
struct FavouritesFile {
    favourites: Vec<FavouriteEntry>,
}

pub struct FavouritesStore {
    path: PathBuf,
    entries: Vec<FavouriteEntry>,
}

impl FavouritesStore {
    /// Open the store at `~/.folio/favourites.json`, creating the directory
    /// if needed.
    pub fn open_default() -> io::Result<FavouritesStore> {
        let dir = folio_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
        FavouritesStore::open(&dir)
    }

    /// Open the store in `dir`. A missing file is an empty store.
    pub fn open(dir: &Path) -> io::Result<FavouritesStore> {
        fs::create_dir_all(dir)?;
        let path = dir.join(FAVOURITES_FILE);
        let entries = if path.exists() {
            let json = fs::read_to_string(&path)?;
            let file: FavouritesFile = serde_json::from_str(&json)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            file.favourites
        } else {
            Vec::new()
        };
        debug!("Opened favourites at {} ({} entries)", path.display(), entries.len());
        Ok(FavouritesStore { path, entries })
    }

    pub fn books(&self) -> Vec<BookSummary> {
        self.entries.iter().map(|e| e.book.clone()).collect()
    }

    pub fn entry(&self, id: &str) -> Option<&FavouriteEntry> {
        self.entries.iter().find(|e| e.book.id == id)
    }

    pub fn is_favourite(&self, id: &str) -> bool {
        self.entry(id).is_some()
    }

    /// Mark or unmark `book`. Writes to disk only when something changed.
    pub fn set_favourite(&mut self, book: &BookSummary, favourite: bool) -> io::Result<()> {
        let present = self.is_favourite(&book.id);
        match (favourite, present) {
            (true, false) => self.entries.push(FavouriteEntry {
                book: book.clone(),
                added_at: Utc::now().timestamp(),
            }),
            (false, true) => self.entries.retain(|e| e.book.id != book.id),
            _ => return Ok(()),
        }
        self.save()
    }

    fn save(&self) -> io::Result<()> {
        let file = FavouritesFile {
            favourites: self.entries.clone(),
        };
        atomic_write_json(&self.path, &file)?;
        debug!("Favourites saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Apply a favourite change from the event loop. Failures are logged; the
/// in-memory state stays authoritative for this session.
pub fn persist_favourite(store: &mut FavouritesStore, book: &BookSummary, favourite: bool) {
    if let Err(e) = store.set_favourite(book, favourite) {
        warn!("Failed to persist favourite {}: {}", book.id, e);
    }
}
