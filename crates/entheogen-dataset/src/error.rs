//! Error types for dataset loading and lookup

use entheogen_domain::{PairKey, RiskCode};
use thiserror::Error;

/// Data-integrity and loading errors
///
/// Everything except [`DatasetError::UnknownCode`] can only come out of
/// dataset construction. A validated dataset only reports `UnknownCode` when
/// a caller asks for a code that is not in the legend.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// A code is not in the legend
    #[error("Unknown classification code: {0}")]
    UnknownCode(RiskCode),

    /// A legend severity has no action sentence
    #[error("No action sentence for severity {severity} (code {code})")]
    IncompleteActionMapping {
        /// Legend code carrying the severity
        code: RiskCode,
        /// Severity without an action
        severity: i32,
    },

    /// A substance id is empty or contains the pair separator
    #[error("Invalid substance id: '{0}'")]
    InvalidSubstanceId(String),

    /// Two substances share an id
    #[error("Duplicate substance id: {0}")]
    DuplicateSubstance(String),

    /// Two legend entries share a code
    #[error("Duplicate legend code: {0}")]
    DuplicateCode(RiskCode),

    /// A reserved code is missing from the legend
    #[error("Legend is missing reserved code {0}")]
    MissingReservedCode(RiskCode),

    /// A reserved code carries the wrong severity
    #[error("Reserved code {code} must have severity {expected}, found {found}")]
    ReservedSeverity {
        /// Reserved code
        code: RiskCode,
        /// Required severity
        expected: i32,
        /// Severity in the document
        found: i32,
    },

    /// A rule or note names a substance that is not in the catalogue
    #[error("Pair {pair} references unknown substance '{id}'")]
    UnknownSubstance {
        /// Offending pair
        pair: PairKey,
        /// Missing id
        id: String,
    },

    /// A pair appears twice in the rule table or in the notes
    #[error("Duplicate entry for pair {0}")]
    DuplicatePair(PairKey),

    /// A rule pairs a substance with itself
    #[error("Rule pairs '{0}' with itself")]
    SelfPairRule(String),

    /// A rule uses a reserved code
    #[error("Rule for pair {pair} uses reserved code {code}")]
    ReservedCodeInRule {
        /// Offending pair
        pair: PairKey,
        /// Reserved code
        code: RiskCode,
    },

    /// Dataset file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML document could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON document could not be parsed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}
