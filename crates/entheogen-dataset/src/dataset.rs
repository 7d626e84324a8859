//! The validated, immutable dataset

use crate::document::DatasetDocument;
use crate::error::DatasetError;
use entheogen_domain::guidance::action_for;
use entheogen_domain::{PairEvidence, PairKey, RiskClassification, RiskCode, Substance};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Substance catalogue, legend, pair table and special-pair overlay
///
/// Built once through [`InteractionDataset::from_document`], which enforces
/// every data-integrity rule, and read-only afterwards. All accessors take
/// `&self`, so one dataset can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct InteractionDataset {
    name: String,
    substances: Vec<Substance>,
    substance_index: HashMap<String, usize>,
    legend: Vec<RiskClassification>,
    legend_index: HashMap<RiskCode, usize>,
    rules: BTreeMap<PairKey, PairEvidence>,
    notes: BTreeMap<PairKey, String>,
}

impl InteractionDataset {
    /// Validate a document and build the dataset
    ///
    /// # Errors
    ///
    /// Returns the first integrity violation found:
    /// - substance ids that are blank, contain `|`, or repeat
    /// - legend codes that repeat, missing `SELF`/`UNKNOWN`, or sentinels
    ///   with the wrong severity
    /// - a legend severity without an action sentence
    /// - rules or notes naming unknown substances or codes, self-pairs,
    ///   `SELF`-coded rules, or the same pair twice
    pub fn from_document(doc: DatasetDocument) -> Result<Self, DatasetError> {
        let DatasetDocument {
            name,
            substances,
            legend,
            rules,
            notes,
        } = doc;

        let mut substance_index = HashMap::with_capacity(substances.len());
        for (position, substance) in substances.iter().enumerate() {
            if !substance.id.is_valid() {
                return Err(DatasetError::InvalidSubstanceId(substance.id.to_string()));
            }
            if substance_index
                .insert(substance.id.as_str().to_string(), position)
                .is_some()
            {
                return Err(DatasetError::DuplicateSubstance(substance.id.to_string()));
            }
        }

        let legend_index = index_legend(&legend)?;

        let mut rule_table = BTreeMap::new();
        for rule in &rules {
            let key = rule.key();
            if rule.a == rule.b {
                return Err(DatasetError::SelfPairRule(rule.a.clone()));
            }
            check_members(&substance_index, &key, [&rule.a, &rule.b])?;
            if !legend_index.contains_key(&rule.code) {
                return Err(DatasetError::UnknownCode(rule.code.clone()));
            }
            if rule.code.is_self_pair() {
                return Err(DatasetError::ReservedCodeInRule {
                    pair: key,
                    code: rule.code.clone(),
                });
            }
            if rule_table.insert(key.clone(), rule.evidence()).is_some() {
                return Err(DatasetError::DuplicatePair(key));
            }
        }

        let mut note_table = BTreeMap::new();
        for note in &notes {
            let key = note.key();
            if note.a == note.b {
                return Err(DatasetError::SelfPairRule(note.a.clone()));
            }
            check_members(&substance_index, &key, [&note.a, &note.b])?;
            if note_table.insert(key.clone(), note.note.clone()).is_some() {
                return Err(DatasetError::DuplicatePair(key));
            }
        }

        info!(
            "Loaded dataset '{}': {} substances, {} legend entries, {} rules, {} notes",
            name,
            substances.len(),
            legend.len(),
            rule_table.len(),
            note_table.len()
        );

        Ok(Self {
            name,
            substances,
            substance_index,
            legend,
            legend_index,
            rules: rule_table,
            notes: note_table,
        })
    }

    /// Read, parse and validate a dataset file (`.toml` or `.json`)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        debug!("Reading dataset from {}", path.display());
        Self::from_document(DatasetDocument::from_path(path)?)
    }

    /// Display name of the dataset
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalogue in document order
    pub fn substances(&self) -> &[Substance] {
        &self.substances
    }

    /// Look up a substance by id
    pub fn find_substance(&self, id: &str) -> Option<&Substance> {
        self.substance_index.get(id).map(|&i| &self.substances[i])
    }

    /// Substances whose name or class contains `query` (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&Substance> {
        self.substances.iter().filter(|s| s.matches(query)).collect()
    }

    /// Legend in document order
    pub fn legend(&self) -> &[RiskClassification] {
        &self.legend
    }

    /// Look up a legend entry
    ///
    /// # Errors
    ///
    /// `UnknownCode` if the legend has no such code.
    pub fn classification(&self, code: &RiskCode) -> Result<&RiskClassification, DatasetError> {
        self.legend_index
            .get(code)
            .map(|&i| &self.legend[i])
            .ok_or_else(|| DatasetError::UnknownCode(code.clone()))
    }

    /// Direct table lookup under the canonical key, without fallback
    pub fn raw_entry(&self, a: &str, b: &str) -> Option<&PairEvidence> {
        self.rules.get(&PairKey::new(a, b))
    }

    /// Special-pair note for the pair, if curated
    pub fn special_note(&self, a: &str, b: &str) -> Option<&str> {
        self.notes.get(&PairKey::new(a, b)).map(String::as_str)
    }

    /// All rules, ordered by pair key
    pub fn rules(&self) -> impl Iterator<Item = (&PairKey, &PairEvidence)> {
        self.rules.iter()
    }

    /// Number of rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

fn index_legend(legend: &[RiskClassification]) -> Result<HashMap<RiskCode, usize>, DatasetError> {
    let mut index = HashMap::with_capacity(legend.len());
    for (position, entry) in legend.iter().enumerate() {
        if index.insert(entry.code.clone(), position).is_some() {
            return Err(DatasetError::DuplicateCode(entry.code.clone()));
        }
        if action_for(entry.severity).is_none() {
            return Err(DatasetError::IncompleteActionMapping {
                code: entry.code.clone(),
                severity: entry.severity,
            });
        }
    }

    for (code, expected) in [
        (RiskCode::self_pair(), RiskClassification::SELF_SEVERITY),
        (RiskCode::unknown(), RiskClassification::UNKNOWN_SEVERITY),
    ] {
        let entry = index
            .get(&code)
            .map(|&i| &legend[i])
            .ok_or_else(|| DatasetError::MissingReservedCode(code.clone()))?;
        if entry.severity != expected {
            return Err(DatasetError::ReservedSeverity {
                code,
                expected,
                found: entry.severity,
            });
        }
    }

    Ok(index)
}

fn check_members(
    substance_index: &HashMap<String, usize>,
    key: &PairKey,
    ids: [&String; 2],
) -> Result<(), DatasetError> {
    for id in ids {
        if !substance_index.contains_key(id.as_str()) {
            return Err(DatasetError::UnknownSubstance {
                pair: key.clone(),
                id: id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{NoteRecord, RuleRecord};
    use entheogen_domain::Confidence;

    fn legend() -> Vec<RiskClassification> {
        vec![
            RiskClassification::new("LOW", "Low Risk", 1, "Low risk"),
            RiskClassification::new("DAN", "Dangerous", 5, "Avoid"),
            RiskClassification::new("UNKNOWN", "Unknown", 0, "No data"),
            RiskClassification::new("SELF", "Same", -1, "Diagonal"),
        ]
    }

    fn rule(a: &str, b: &str, code: &str) -> RuleRecord {
        RuleRecord {
            a: a.to_string(),
            b: b.to_string(),
            code: RiskCode::new(code),
            summary: format!("{} with {}", a, b),
            confidence: Confidence::High,
            sources: "test".to_string(),
        }
    }

    fn document() -> DatasetDocument {
        DatasetDocument {
            name: "test".to_string(),
            substances: vec![
                Substance::new("x", "Xanadu", "Plant"),
                Substance::new("y", "Yarrow", "Plant"),
                Substance::new("z", "Zolpidem", "Pharmaceutical"),
            ],
            legend: legend(),
            rules: vec![rule("y", "x", "DAN"), rule("x", "z", "LOW")],
            notes: vec![NoteRecord {
                a: "x".to_string(),
                b: "y".to_string(),
                note: "Well documented.".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_document_loads() {
        let ds = InteractionDataset::from_document(document()).unwrap();
        assert_eq!(ds.substances().len(), 3);
        assert_eq!(ds.rule_count(), 2);
        assert_eq!(ds.raw_entry("x", "y").unwrap().code, "DAN");
        assert_eq!(ds.raw_entry("y", "x").unwrap().code, "DAN");
        assert!(ds.raw_entry("y", "z").is_none());
        assert_eq!(ds.special_note("y", "x"), Some("Well documented."));
    }

    #[test]
    fn test_classification_lookup() {
        let ds = InteractionDataset::from_document(document()).unwrap();
        assert_eq!(ds.classification(&RiskCode::new("dan")).unwrap().severity, 5);
        assert!(matches!(
            ds.classification(&RiskCode::new("NOPE")),
            Err(DatasetError::UnknownCode(_))
        ));
    }

    #[test]
    fn test_search() {
        let ds = InteractionDataset::from_document(document()).unwrap();
        assert_eq!(ds.search("plant").len(), 2);
        assert_eq!(ds.search("zol")[0].id.as_str(), "z");
        assert_eq!(ds.search("").len(), 3);
    }

    #[test]
    fn test_rule_with_unknown_code() {
        let mut doc = document();
        doc.rules.push(rule("y", "z", "CAU"));
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::UnknownCode(code)) if code == "CAU"
        ));
    }

    #[test]
    fn test_incomplete_action_mapping() {
        let mut doc = document();
        doc.legend.push(RiskClassification::new("WORSE", "Worse", 7, "Off the scale"));
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::IncompleteActionMapping { severity: 7, .. })
        ));
    }

    #[test]
    fn test_missing_reserved_code() {
        let mut doc = document();
        doc.legend.retain(|c| !c.code.is_self_pair());
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::MissingReservedCode(_))
        ));
    }

    #[test]
    fn test_reserved_severity() {
        let mut doc = document();
        for entry in doc.legend.iter_mut() {
            if entry.code.is_unknown() {
                entry.severity = 1;
            }
        }
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::ReservedSeverity { expected: 0, found: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_pair_in_either_order() {
        let mut doc = document();
        doc.rules.push(rule("x", "y", "LOW"));
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::DuplicatePair(_))
        ));
    }

    #[test]
    fn test_self_pair_rule() {
        let mut doc = document();
        doc.rules.push(rule("x", "x", "LOW"));
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::SelfPairRule(_))
        ));
    }

    #[test]
    fn test_self_coded_rule() {
        let mut doc = document();
        doc.rules.push(rule("y", "z", "SELF"));
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::ReservedCodeInRule { .. })
        ));
    }

    #[test]
    fn test_rule_with_unknown_substance() {
        let mut doc = document();
        doc.rules.push(rule("x", "ghost", "LOW"));
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::UnknownSubstance { id, .. }) if id == "ghost"
        ));
    }

    #[test]
    fn test_invalid_and_duplicate_ids() {
        let mut doc = document();
        doc.substances.push(Substance::new("a|b", "Bad", "Plant"));
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::InvalidSubstanceId(_))
        ));

        let mut doc = document();
        doc.substances.push(Substance::new("x", "Again", "Plant"));
        assert!(matches!(
            InteractionDataset::from_document(doc),
            Err(DatasetError::DuplicateSubstance(_))
        ));
    }
}
