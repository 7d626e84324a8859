//! Evidence module - the result of resolving one pair

use crate::{Confidence, RiskCode};
use serde::{Deserialize, Serialize};

/// Sources marker for a pair with no curated rule
pub const SOURCE_GAP: &str = "source-gap";

/// Evidence record for a pair of substances
///
/// Curated rules are stored as `PairEvidence` and returned verbatim; the two
/// sentinel records are built by [`PairEvidence::self_pair`] and
/// [`PairEvidence::unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairEvidence {
    /// Legend code
    pub code: RiskCode,

    /// One-line human summary
    pub summary: String,

    /// How well the sources support the rule
    pub confidence: Confidence,

    /// Source citation
    pub sources: String,
}

impl PairEvidence {
    /// Create an evidence record
    pub fn new(
        code: impl Into<RiskCode>,
        summary: impl Into<String>,
        confidence: Confidence,
        sources: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            confidence,
            sources: sources.into(),
        }
    }

    /// The fixed record for a pair of identical ids
    pub fn self_pair() -> Self {
        Self::new(
            RiskCode::self_pair(),
            "Same entity selected; this is not an interaction pair.",
            Confidence::NotApplicable,
            "n/a",
        )
    }

    /// The fixed record for a pair with no curated rule
    pub fn unknown() -> Self {
        Self::new(
            RiskCode::unknown(),
            "No explicit interaction classification in the current source set.",
            Confidence::Low,
            SOURCE_GAP,
        )
    }

    /// Whether this record came from the unknown-pair fallback
    pub fn is_source_gap(&self) -> bool {
        self.code.is_unknown() && self.sources == SOURCE_GAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let s = PairEvidence::self_pair();
        assert!(s.code.is_self_pair());
        assert_eq!(s.confidence, Confidence::NotApplicable);
        assert_eq!(s.sources, "n/a");

        let u = PairEvidence::unknown();
        assert!(u.code.is_unknown());
        assert_eq!(u.confidence, Confidence::Low);
        assert!(u.is_source_gap());
    }
}
