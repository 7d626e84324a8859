//! Rule-based readout text

use entheogen_domain::guidance::action_for;
use entheogen_domain::{PairEvidence, RiskClassification, Substance};

/// Used only when a legend entry was built outside a validated dataset
const DEFAULT_ACTION: &str = "Treat with default caution and consult a professional.";

/// Render the evidence readout for a resolved pair
///
/// The output is Markdown with headed sections: classification heading,
/// legend description, evidence summary with confidence and sources,
/// recommended action, and the consensus note when one is given. Pure and
/// deterministic.
///
/// # Examples
///
/// ```
/// use entheogen_domain::{PairEvidence, RiskClassification};
/// use entheogen_resolver::render_readout;
///
/// let legend = RiskClassification::new("UNKNOWN", "Unknown/Insufficient Data", 0, "No data.");
/// let text = render_readout(&PairEvidence::unknown(), &legend, None);
/// assert!(text.contains("source-gap"));
/// assert!(!text.contains("Consensus note"));
/// ```
pub fn render_readout(
    evidence: &PairEvidence,
    legend_entry: &RiskClassification,
    special_note: Option<&str>,
) -> String {
    let action = action_for(legend_entry.severity).unwrap_or(DEFAULT_ACTION);

    let mut out = String::new();
    out.push_str(&format!(
        "## {} ({})\n\n",
        legend_entry.label, legend_entry.code
    ));
    out.push_str(&legend_entry.description);
    out.push_str("\n\n");

    out.push_str("### Evidence\n\n");
    out.push_str(&evidence.summary);
    out.push_str("\n\n");
    out.push_str(&format!("- **Confidence:** {}\n", evidence.confidence));
    out.push_str(&format!("- **Sources:** {}\n\n", evidence.sources));

    out.push_str("### Recommended action\n\n");
    out.push_str(action);
    out.push('\n');

    if let Some(note) = special_note {
        out.push_str("\n### Consensus note\n\n");
        out.push_str(note);
        out.push('\n');
    }

    out
}

/// Render a catalogue profile for a single substance
///
/// Stands in for a generated single-substance summary when generation fails.
pub fn render_profile(substance: &Substance) -> String {
    let mut out = format!("## {}\n\n", substance.name);
    out.push_str(&format!("- **Class:** {}\n", substance.class));
    if let Some(tag) = &substance.mechanism_tag {
        out.push_str(&format!("- **Mechanism:** {}\n", tag));
    }
    if let Some(notes) = &substance.notes {
        out.push_str(&format!("\n{}\n", notes));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use entheogen_domain::Confidence;

    fn dangerous() -> RiskClassification {
        RiskClassification::new(
            "DAN",
            "Dangerous / Contraindicated",
            5,
            "Potentially severe or life-threatening interaction risk; avoid.",
        )
    }

    #[test]
    fn test_sections_in_order() {
        let evidence = PairEvidence::new("DAN", "Advised against.", Confidence::High, "doc.pdf");
        let text = render_readout(&evidence, &dangerous(), Some("Well documented."));

        let heading = text.find("## Dangerous / Contraindicated (DAN)").unwrap();
        let evidence_at = text.find("### Evidence").unwrap();
        let action_at = text.find("### Recommended action").unwrap();
        let note_at = text.find("### Consensus note").unwrap();
        assert!(heading < evidence_at && evidence_at < action_at && action_at < note_at);

        assert!(text.contains("- **Confidence:** high"));
        assert!(text.contains("- **Sources:** doc.pdf"));
        assert!(text.contains(action_for(5).unwrap()));
        assert!(text.ends_with("Well documented.\n"));
    }

    #[test]
    fn test_deterministic() {
        let evidence = PairEvidence::new("DAN", "Advised against.", Confidence::High, "doc.pdf");
        assert_eq!(
            render_readout(&evidence, &dangerous(), None),
            render_readout(&evidence, &dangerous(), None)
        );
    }

    #[test]
    fn test_out_of_domain_severity_uses_default_action() {
        let odd = RiskClassification::new("ODD", "Odd", 42, "Not from a dataset");
        let text = render_readout(&PairEvidence::unknown(), &odd, None);
        assert!(text.contains(DEFAULT_ACTION));
    }

    #[test]
    fn test_profile() {
        let s = Substance::new("kambo", "Kambo", "Ceremonial Adjunct")
            .with_mechanism("Ceremonial adjunct")
            .with_notes("Caution advised around co-presentation with ayahuasca.");
        let text = render_profile(&s);
        assert!(text.starts_with("## Kambo"));
        assert!(text.contains("- **Class:** Ceremonial Adjunct"));
        assert!(text.contains("co-presentation"));
    }
}
