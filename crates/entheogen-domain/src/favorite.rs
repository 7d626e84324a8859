//! Favorite module - pairs the user chose to keep

use crate::{PairKey, RiskCode, SubstanceId};
use serde::{Deserialize, Serialize};

/// A saved pair
///
/// `id` is the canonical pair key, so a list holds at most one entry per
/// unordered pair. `drug1`/`drug2` keep the order the user picked them in.
/// Files written by earlier releases used `d1`/`d2`; both spellings load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Canonical pair key
    pub id: String,

    /// First substance as selected
    #[serde(alias = "d1")]
    pub drug1: SubstanceId,

    /// Second substance as selected
    #[serde(alias = "d2")]
    pub drug2: SubstanceId,

    /// Classification at the time the pair was saved
    pub code: RiskCode,
}

impl FavoriteEntry {
    /// Create an entry for a pair
    pub fn new(drug1: &str, drug2: &str, code: RiskCode) -> Self {
        Self {
            id: PairKey::new(drug1, drug2).to_string(),
            drug1: SubstanceId::new(drug1),
            drug2: SubstanceId::new(drug2),
            code,
        }
    }

    /// Canonical key recomputed from the two ids
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.drug1.as_str(), self.drug2.as_str())
    }
}

/// Result of [`Favorites::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The pair was saved
    Added,
    /// The pair was already saved and has been removed
    Removed,
    /// The pair cannot be saved (self-pair)
    Rejected,
}

/// The favorites list
///
/// Holds at most one entry per canonical pair key and keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from stored entries
    ///
    /// Ids are recomputed from the substance ids (older files joined them
    /// with `-`), and later duplicates of a pair are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = FavoriteEntry>) -> Self {
        let mut favorites = Self::new();
        for mut entry in entries {
            entry.id = entry.pair_key().to_string();
            if !favorites.contains_key(&entry.id) {
                favorites.entries.push(entry);
            }
        }
        favorites
    }

    /// Saved entries in insertion order
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// Number of saved pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is saved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the pair is saved
    pub fn contains(&self, drug1: &str, drug2: &str) -> bool {
        self.contains_key(PairKey::new(drug1, drug2).as_str())
    }

    fn contains_key(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Save the pair, or remove it if it is already saved
    ///
    /// Self-pairs are never saved.
    pub fn toggle(&mut self, drug1: &str, drug2: &str, code: RiskCode) -> ToggleOutcome {
        if drug1 == drug2 || code.is_self_pair() {
            return ToggleOutcome::Rejected;
        }
        if self.remove(drug1, drug2) {
            return ToggleOutcome::Removed;
        }
        self.entries.push(FavoriteEntry::new(drug1, drug2, code));
        ToggleOutcome::Added
    }

    /// Remove the pair; returns whether it was present
    pub fn remove(&mut self, drug1: &str, drug2: &str) -> bool {
        self.remove_key(PairKey::new(drug1, drug2).as_str())
    }

    /// Remove by canonical key; returns whether it was present
    pub fn remove_key(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Consume the list
    pub fn into_entries(self) -> Vec<FavoriteEntry> {
        self.entries
    }
}
