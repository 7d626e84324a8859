//! Substance module - catalogue entries that can be paired

use crate::pair::PAIR_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalogue entry (e.g. `"ayahuasca"`, `"ssri"`)
///
/// Ids are compared byte-wise. A valid id is non-empty and never contains
/// [`PAIR_SEPARATOR`], so a pair key can always be split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstanceId(String);

impl SubstanceId {
    /// Wrap a raw id
    ///
    /// No validation happens here; the dataset checks ids when it loads.
    ///
    /// # Examples
    ///
    /// ```
    /// use entheogen_domain::SubstanceId;
    ///
    /// let id = SubstanceId::new("psilocybin");
    /// assert_eq!(id.as_str(), "psilocybin");
    /// assert!(id.is_valid());
    /// ```
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id can take part in a pair key
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty() && !self.0.contains(PAIR_SEPARATOR)
    }
}

impl fmt::Display for SubstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubstanceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for SubstanceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A substance or medication class in the catalogue
///
/// Substances are immutable once the dataset is loaded. `mechanism_tag` and
/// `notes` are descriptive metadata and never influence resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substance {
    /// Unique key
    pub id: SubstanceId,

    /// Display name
    pub name: String,

    /// Category label (e.g. "Ceremonial Psychedelic", "Pharmaceutical Class")
    pub class: String,

    /// Short pharmacological tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism_tag: Option<String>,

    /// Free-text curator notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Substance {
    /// Create a substance without descriptive metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id: SubstanceId::new(id),
            name: name.into(),
            class: class.into(),
            mechanism_tag: None,
            notes: None,
        }
    }

    /// Attach a mechanism tag
    pub fn with_mechanism(mut self, tag: impl Into<String>) -> Self {
        self.mechanism_tag = Some(tag.into());
        self
    }

    /// Attach curator notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Case-insensitive match against id, name or class
    ///
    /// An empty (or whitespace-only) query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.id.as_str().to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
            || self.class.to_lowercase().contains(&query)
    }
}
