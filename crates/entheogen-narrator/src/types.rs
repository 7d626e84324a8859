//! Narrative result types

use entheogen_domain::GenerationError;
use entheogen_resolver::InteractionCheck;
use serde::Serialize;

/// Generated text, or the deterministic text shown instead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Narrative {
    /// Text produced by the generator
    Generated(String),

    /// Generation failed; `text` is the rule-based readout or profile
    Fallback {
        /// Why generation failed
        #[serde(serialize_with = "serialize_reason")]
        reason: GenerationError,
        /// Deterministic replacement text
        text: String,
    },
}

impl Narrative {
    /// The text to display, whichever way it was produced
    pub fn text(&self) -> &str {
        match self {
            Narrative::Generated(text) => text,
            Narrative::Fallback { text, .. } => text,
        }
    }

    /// Whether the generator produced this text
    pub fn is_generated(&self) -> bool {
        matches!(self, Narrative::Generated(_))
    }

    /// The generation failure, for fallbacks
    pub fn failure(&self) -> Option<&GenerationError> {
        match self {
            Narrative::Generated(_) => None,
            Narrative::Fallback { reason, .. } => Some(reason),
        }
    }
}

fn serialize_reason<S: serde::Serializer>(reason: &GenerationError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}

/// A resolved pair plus its explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairNarrative {
    /// Deterministic resolution
    pub check: InteractionCheck,

    /// Explanation; `None` when the generator was skipped for a self-pair
    pub narrative: Option<Narrative>,
}
