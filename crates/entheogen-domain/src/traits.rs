//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the resolution core and the
//! infrastructure around it. Implementations live in other crates.

use crate::{Confidence, FavoriteEntry};
use std::future::Future;
use thiserror::Error;

/// Classified failures of the text-generation collaborator
///
/// The core never produces these itself; it receives them and falls back to
/// the rule-based readout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No API credential is configured
    #[error("No API credential configured for the text generator")]
    MissingCredential,

    /// The provider answered without any text
    #[error("The text generator returned an empty response")]
    EmptyResponse,

    /// The provider rejected the call for quota or rate reasons
    #[error("Text generator quota exceeded")]
    QuotaExceeded,

    /// Network failure, server error, timeout or anything else
    #[error("Text generator unavailable: {0}")]
    Unavailable(String),
}

impl GenerationError {
    /// Whether retrying later might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::QuotaExceeded | GenerationError::Unavailable(_))
    }
}

/// Risk context passed alongside a generation prompt
///
/// Every field is optional: a single-substance summary has no pair context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskContext {
    /// Legend label of the pair
    pub label: Option<String>,

    /// Evidence summary of the pair
    pub summary: Option<String>,

    /// Evidence confidence
    pub confidence: Option<Confidence>,

    /// Evidence sources
    pub sources: Option<String>,

    /// Severity rank
    pub severity: Option<i32>,
}

/// A request to the text-generation collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Display name of the first substance
    pub subject: String,

    /// Display name of the second substance, for pair requests
    pub second_subject: Option<String>,

    /// Risk context of the pair
    pub context: RiskContext,

    /// Fully rendered user prompt
    pub prompt: String,

    /// System instruction for the model
    pub system_instruction: String,
}

/// Trait for text-generation providers
///
/// Implemented by the infrastructure layer (entheogen-llm)
pub trait TextGenerator {
    /// Generate free-form text for the request
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Trait for favorites persistence
///
/// Implemented by the infrastructure layer (entheogen-store)
pub trait FavoritesStore {
    /// Error type for save operations
    type Error;

    /// Load the saved list
    ///
    /// Absent or unreadable storage yields an empty list; this never fails.
    fn load(&self) -> Vec<FavoriteEntry>;

    /// Replace the saved list (last write wins)
    fn save(&self, entries: &[FavoriteEntry]) -> Result<(), Self::Error>;
}
