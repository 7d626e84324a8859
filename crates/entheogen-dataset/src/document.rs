//! Serialized dataset format
//!
//! A dataset document is the on-disk form of a dataset (TOML or JSON). It is
//! parsed as-is and validated by [`InteractionDataset::from_document`].
//!
//! ```toml
//! name = "Example set"
//!
//! [[substances]]
//! id = "ayahuasca"
//! name = "Ayahuasca"
//! class = "Ceremonial Psychedelic"
//!
//! [[legend]]
//! code = "DAN"
//! label = "Dangerous / Contraindicated"
//! severity = 5
//! description = "Potentially severe or life-threatening interaction risk; avoid."
//!
//! [[rules]]
//! a = "alcohol"
//! b = "ayahuasca"
//! code = "DAN"
//! summary = "Advised against."
//! confidence = "high"
//! sources = "ayahuasca-interactions.pdf"
//!
//! [[notes]]
//! a = "ayahuasca"
//! b = "ssri"
//! note = "MAOI plus serotonergic antidepressant."
//! ```
//!
//! [`InteractionDataset::from_document`]: crate::InteractionDataset::from_document

use crate::error::DatasetError;
use entheogen_domain::{Confidence, PairEvidence, PairKey, RiskClassification, RiskCode, Substance};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One curated pair rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// First substance id (order does not matter)
    pub a: String,
    /// Second substance id
    pub b: String,
    /// Legend code
    pub code: RiskCode,
    /// One-line summary
    pub summary: String,
    /// Confidence in the sources
    pub confidence: Confidence,
    /// Source citation
    pub sources: String,
}

impl RuleRecord {
    /// Canonical key of the rule's pair
    pub fn key(&self) -> PairKey {
        PairKey::new(&self.a, &self.b)
    }

    /// The evidence record stored for the pair
    pub fn evidence(&self) -> PairEvidence {
        PairEvidence::new(
            self.code.clone(),
            self.summary.clone(),
            self.confidence,
            self.sources.clone(),
        )
    }
}

/// One special-pair consensus note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// First substance id
    pub a: String,
    /// Second substance id
    pub b: String,
    /// Consensus sentence appended to the readout
    pub note: String,
}

impl NoteRecord {
    /// Canonical key of the note's pair
    pub fn key(&self) -> PairKey {
        PairKey::new(&self.a, &self.b)
    }
}

/// Unvalidated dataset contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDocument {
    /// Display name of the dataset
    #[serde(default)]
    pub name: String,

    /// Substance catalogue, in listing order
    #[serde(default)]
    pub substances: Vec<Substance>,

    /// Classification legend
    #[serde(default)]
    pub legend: Vec<RiskClassification>,

    /// Pair rules
    #[serde(default)]
    pub rules: Vec<RuleRecord>,

    /// Special-pair notes
    #[serde(default)]
    pub notes: Vec<NoteRecord>,
}

impl DatasetDocument {
    /// Parse a TOML document
    pub fn from_toml(toml_str: &str) -> Result<Self, DatasetError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Parse a JSON document
    pub fn from_json(json_str: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Read a document from disk, choosing the parser by file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Self::from_toml(&fs::read_to_string(path)?),
            "json" => Self::from_json(&fs::read_to_string(path)?),
            _ => Err(DatasetError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
