//! Error types for the Narrator

use entheogen_dataset::DatasetError;
use thiserror::Error;

/// Errors that can occur while assembling a narrative
///
/// Generation failures are not errors here; they become
/// [`Narrative::Fallback`](crate::Narrative::Fallback).
#[derive(Error, Debug)]
pub enum NarratorError {
    /// Data-integrity error from the dataset
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// A single-substance summary was requested for an id not in the catalogue
    #[error("Unknown substance: {0}")]
    UnknownSubstance(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
