//! EntheoGen Storage Layer
//!
//! Implements the `FavoritesStore` trait for saved pairs.
//!
//! # Architecture
//!
//! - `JsonFileStore`: one JSON array per variant on local disk
//! - `MemoryStore`: process-local list for tests and ephemeral sessions
//!
//! Loading never fails. A missing file is an empty list; a file that cannot
//! be read or parsed is logged and also treated as empty, so a damaged file
//! can never block the checker.
//!
//! # Examples
//!
//! ```no_run
//! use entheogen_domain::{FavoriteEntry, FavoritesStore, RiskCode};
//! use entheogen_store::JsonFileStore;
//!
//! let store = JsonFileStore::new("favorites.json");
//! let mut entries = store.load();
//! entries.push(FavoriteEntry::new("ayahuasca", "ssri", RiskCode::new("DAN")));
//! store.save(&entries).unwrap();
//! ```

#![warn(missing_docs)]

use entheogen_domain::{FavoriteEntry, FavoritesStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while saving favorites
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Entries could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Favorites stored as a JSON file
///
/// Reads the primary path, or the first existing legacy path when the primary
/// file is absent. Writes always go to the primary path, so a legacy file is
/// migrated on the first save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    legacy_paths: Vec<PathBuf>,
}

impl JsonFileStore {
    /// Create a store over a file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            legacy_paths: Vec::new(),
        }
    }

    /// Also read from these paths, in order, when the primary file is absent
    pub fn with_legacy_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.legacy_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// The primary file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The legacy fallback paths
    pub fn legacy_paths(&self) -> &[PathBuf] {
        &self.legacy_paths
    }

    fn read_file(path: &Path) -> Option<Vec<FavoriteEntry>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read favorites from {}: {}", path.display(), e);
                return Some(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<FavoriteEntry>>(&content) {
            Ok(entries) => {
                debug!("Loaded {} favorites from {}", entries.len(), path.display());
                Some(entries)
            }
            Err(e) => {
                warn!("Failed to parse favorites in {}: {}", path.display(), e);
                Some(Vec::new())
            }
        }
    }
}

impl FavoritesStore for JsonFileStore {
    type Error = StoreError;

    fn load(&self) -> Vec<FavoriteEntry> {
        std::iter::once(&self.path)
            .chain(self.legacy_paths.iter())
            .find_map(|path| Self::read_file(path))
            .unwrap_or_default()
    }

    fn save(&self, entries: &[FavoriteEntry]) -> Result<(), Self::Error> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(io_error)?;
        debug!("Saved {} favorites to {}", entries.len(), self.path.display());
        Ok(())
    }
}

/// In-memory favorites
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<FavoriteEntry>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for MemoryStore {
    type Error = std::convert::Infallible;

    fn load(&self) -> Vec<FavoriteEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, entries: &[FavoriteEntry]) -> Result<(), Self::Error> {
        *self.entries.lock().unwrap_or_else(PoisonError::into_inner) = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entheogen_domain::RiskCode;

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        assert!(store.load().is_empty());

        let first = vec![FavoriteEntry::new("lsd", "cannabis", RiskCode::new("CAU"))];
        let second = vec![FavoriteEntry::new("kambo", "alcohol", RiskCode::new("UNS"))];
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        assert_eq!(store.load(), second);
    }

    #[test]
    fn test_store_paths() {
        let store = JsonFileStore::new("favorites.json");
        assert_eq!(store.path(), Path::new("favorites.json"));
        assert!(store.legacy_paths().is_empty());
    }
}
