//! Resolution properties over the curated dataset

use entheogen_dataset::{builtin, InteractionDataset};
use entheogen_domain::guidance::action_for;
use entheogen_domain::{Confidence, PairEvidence};
use entheogen_resolver::{render_readout, Resolver};
use proptest::prelude::*;
use std::sync::{Arc, OnceLock};

fn dataset() -> Arc<InteractionDataset> {
    static DATASET: OnceLock<Arc<InteractionDataset>> = OnceLock::new();
    DATASET
        .get_or_init(|| Arc::new(builtin::ceremonial().unwrap()))
        .clone()
}

fn resolver() -> Resolver {
    Resolver::new(dataset())
}

fn ids() -> Vec<String> {
    dataset()
        .substances()
        .iter()
        .map(|s| s.id.as_str().to_string())
        .collect()
}

#[test]
fn test_ayahuasca_alcohol_is_dangerous_both_ways() {
    let r = resolver();
    let forward = r.resolve("ayahuasca", "alcohol");
    let backward = r.resolve("alcohol", "ayahuasca");

    assert_eq!(forward, backward);
    assert_eq!(forward.code, "DAN");
    assert_eq!(forward.confidence, Confidence::High);
}

#[test]
fn test_psilocybin_self_pair() {
    let evidence = resolver().resolve("psilocybin", "psilocybin");
    assert!(evidence.code.is_self_pair());
    assert_eq!(evidence.confidence, Confidence::NotApplicable);
    assert_eq!(evidence.sources, "n/a");
}

#[test]
fn test_psilocybin_ssri_blunted() {
    let evidence = resolver().resolve("psilocybin", "ssri");
    assert_eq!(evidence.code, "LOW_MOD");
    assert!(evidence.summary.to_lowercase().contains("blunted"));
}

#[test]
fn test_salvia_belladonna_unknown() {
    let evidence = resolver().resolve("salvia", "belladonna");
    assert!(evidence.code.is_unknown());
    assert_eq!(evidence.confidence, Confidence::Low);
    assert_eq!(evidence.sources, "source-gap");
}

#[test]
fn test_ayahuasca_ssri_readout_has_consensus_note() {
    let r = resolver();
    let evidence = r.resolve("ayahuasca", "ssri");
    let legend = r.classification(&evidence).unwrap();
    let note = r.special_note("ayahuasca", "ssri");

    let text = render_readout(&evidence, legend, note);
    assert!(text.contains("### Consensus note"));
    assert!(text.contains("MAOI"));
    assert!(text.contains("serotonergic antidepressant"));
}

#[test]
fn test_special_note_never_changes_severity() {
    let r = resolver();
    for (key, evidence) in dataset().rules() {
        let (a, b) = key.parts();
        let check = r.check(a, b).unwrap();
        assert_eq!(&check.evidence, evidence);
        assert_eq!(
            check.classification.severity,
            r.classification(evidence).unwrap().severity
        );
    }
}

#[test]
fn test_action_mapping_covers_legend() {
    for entry in dataset().legend() {
        let action = action_for(entry.severity).unwrap();
        assert!(!action.is_empty());
    }
}

#[test]
fn test_every_pair_resolves_to_a_legend_code() {
    let r = resolver();
    let ids = ids();
    for a in &ids {
        for b in &ids {
            assert!(r.check(a, b).is_ok(), "{} + {}", a, b);
        }
    }
}

proptest! {
    /// Property: resolution ignores argument order
    #[test]
    fn prop_symmetry(i in 0usize..28, j in 0usize..28) {
        let ids = ids();
        let r = resolver();
        prop_assert_eq!(r.resolve(&ids[i], &ids[j]), r.resolve(&ids[j], &ids[i]));
    }

    /// Property: any id paired with itself is SELF, curated or not
    #[test]
    fn prop_self_pair(id in "[a-z_]{1,20}") {
        prop_assert_eq!(resolver().resolve(&id, &id), PairEvidence::self_pair());
    }

    /// Property: pairs outside the table resolve to UNKNOWN without failing
    #[test]
    fn prop_fallback(a in "[a-z_]{1,20}", b in "[a-z_]{1,20}") {
        prop_assume!(a != b);
        let r = resolver();
        let evidence = r.resolve(&a, &b);
        match dataset().raw_entry(&a, &b) {
            Some(rule) => prop_assert_eq!(&evidence, rule),
            None => {
                prop_assert!(evidence.code.is_unknown());
                prop_assert_eq!(evidence.sources.as_str(), "source-gap");
            }
        }
    }
}
