//! Pair resolution with self-pair and unknown-pair fallback

use crate::readout::render_readout;
use entheogen_dataset::{DatasetError, InteractionDataset};
use entheogen_domain::guidance::action_for;
use entheogen_domain::{PairEvidence, PairKey, RiskClassification};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Everything the caller shows for one pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionCheck {
    /// Canonical key of the pair
    pub key: PairKey,

    /// Resolved evidence
    pub evidence: PairEvidence,

    /// Legend entry for the evidence code
    pub classification: RiskClassification,

    /// Recommended action for the severity
    pub action: &'static str,

    /// Special-pair note, if curated
    pub special_note: Option<String>,

    /// Rendered readout
    pub readout: String,
}

/// Resolves pairs against an injected dataset
///
/// The resolver holds no state besides the shared, immutable dataset. Every
/// call returns a fresh result, and resolution never fails: identical ids
/// produce the `SELF` record and unmapped pairs produce the `UNKNOWN` record.
#[derive(Debug, Clone)]
pub struct Resolver {
    dataset: Arc<InteractionDataset>,
}

impl Resolver {
    /// Create a resolver over a dataset
    pub fn new(dataset: Arc<InteractionDataset>) -> Self {
        Self { dataset }
    }

    /// The injected dataset
    pub fn dataset(&self) -> &InteractionDataset {
        &self.dataset
    }

    /// Resolve two substance ids to an evidence record
    ///
    /// `resolve(a, b) == resolve(b, a)` for all ids. The self-pair check runs
    /// before any lookup, so no table entry can override it.
    pub fn resolve(&self, a: &str, b: &str) -> PairEvidence {
        if a == b {
            return PairEvidence::self_pair();
        }
        match self.dataset.raw_entry(a, b) {
            Some(evidence) => evidence.clone(),
            None => {
                debug!("No rule for pair {}", PairKey::new(a, b));
                PairEvidence::unknown()
            }
        }
    }

    /// Special-pair note for two ids
    ///
    /// Independent of the classification. Self-pairs never have a note.
    pub fn special_note(&self, a: &str, b: &str) -> Option<&str> {
        if a == b {
            return None;
        }
        self.dataset.special_note(a, b)
    }

    /// Legend entry for a resolved record
    ///
    /// # Errors
    ///
    /// `UnknownCode` only for evidence that did not come from this dataset.
    pub fn classification(&self, evidence: &PairEvidence) -> Result<&RiskClassification, DatasetError> {
        self.dataset.classification(&evidence.code)
    }

    /// Resolve a pair and assemble classification, action, note and readout
    ///
    /// # Errors
    ///
    /// `UnknownCode` if the dataset's legend lacks the resolved code, which a
    /// dataset built by `InteractionDataset::from_document` rules out.
    pub fn check(&self, a: &str, b: &str) -> Result<InteractionCheck, DatasetError> {
        let evidence = self.resolve(a, b);
        let classification = self.classification(&evidence)?.clone();
        let special_note = self.special_note(a, b).map(str::to_string);
        let readout = render_readout(&evidence, &classification, special_note.as_deref());
        let action = action_for(classification.severity).unwrap_or_default();

        Ok(InteractionCheck {
            key: PairKey::new(a, b),
            evidence,
            classification,
            action,
            special_note,
            readout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entheogen_dataset::builtin;

    fn resolver() -> Resolver {
        Resolver::new(Arc::new(builtin::ceremonial().unwrap()))
    }

    #[test]
    fn test_resolve_is_order_independent() {
        let r = resolver();
        assert_eq!(r.resolve("ayahuasca", "alcohol"), r.resolve("alcohol", "ayahuasca"));
    }

    #[test]
    fn test_self_pair_precedes_lookup() {
        let r = resolver();
        let evidence = r.resolve("psilocybin", "psilocybin");
        assert_eq!(evidence, PairEvidence::self_pair());
        assert!(r.special_note("ayahuasca", "ayahuasca").is_none());
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        let r = resolver();
        assert_eq!(r.resolve("coffee", "tea"), PairEvidence::unknown());
        assert_eq!(r.resolve("ayahuasca", "coffee"), PairEvidence::unknown());
    }

    #[test]
    fn test_check_bundles_everything() {
        let r = resolver();
        let check = r.check("ssri", "ayahuasca").unwrap();
        assert_eq!(check.key.as_str(), "ayahuasca|ssri");
        assert_eq!(check.classification.severity, 5);
        assert_eq!(check.action, action_for(5).unwrap());
        assert!(check.special_note.is_some());
        assert!(check.readout.contains("### Consensus note"));
    }

    #[test]
    fn test_check_self_pair() {
        let r = resolver();
        let check = r.check("lsd", "lsd").unwrap();
        assert!(check.evidence.code.is_self_pair());
        assert_eq!(check.classification.severity, -1);
        assert_eq!(check.action, action_for(-1).unwrap());
    }

    #[test]
    fn test_check_serializes() {
        let check = resolver().check("salvia", "belladonna").unwrap();
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["key"], "belladonna|salvia");
        assert_eq!(json["evidence"]["code"], "UNKNOWN");
        assert_eq!(json["evidence"]["sources"], "source-gap");
        assert!(json["special_note"].is_null());
    }
}
