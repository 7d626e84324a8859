//! Datasets compiled into the binary

use crate::dataset::InteractionDataset;
use crate::document::DatasetDocument;
use crate::error::DatasetError;

/// Source of the curated ceremonial set
pub const CEREMONIAL_TOML: &str = include_str!("../data/ceremonial.toml");

/// The curated ceremonial interaction set
///
/// Parsed and validated on every call; callers load it once at startup and
/// share the result.
///
/// # Errors
///
/// Only if the embedded data violates an integrity rule, which the crate's
/// tests rule out.
pub fn ceremonial() -> Result<InteractionDataset, DatasetError> {
    InteractionDataset::from_document(DatasetDocument::from_toml(CEREMONIAL_TOML)?)
}
