//! Prompt construction for the text generator

use entheogen_domain::{GenerationRequest, RiskContext, Substance};
use entheogen_resolver::InteractionCheck;

/// System instruction for pair explanations
pub const INTERACTION_SYSTEM_INSTRUCTION: &str = "You are a harm reduction expert. \
Your goal is to provide clear, non-judgmental, and scientifically accurate information \
about drug interactions to help people stay safe. Always prioritize safety and suggest \
seeking medical help if in doubt.";

/// System instruction for substance summaries
pub const SUMMARY_SYSTEM_INSTRUCTION: &str = "You are a harm reduction expert. \
Provide accurate, non-judgmental information about substances to help people stay safe. \
Use clear headings and bullet points. Always include a disclaimer that this is not \
medical advice.";

/// Builds generation requests
pub struct PromptBuilder {
    max_words: usize,
}

impl PromptBuilder {
    /// Create a builder with a word limit for pair explanations
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }

    /// Build the explanation request for a resolved pair
    pub fn interaction(&self, first: &str, second: &str, check: &InteractionCheck) -> GenerationRequest {
        let classification = &check.classification;
        let evidence = &check.evidence;

        let mut prompt = String::new();
        prompt.push_str(&format!(
            "Explain the drug interaction between {} and {}.\n",
            first, second
        ));
        prompt.push_str(&format!(
            "The interaction is categorized as \"{}\" (severity {} of 5).\n",
            classification.label, classification.severity
        ));
        prompt.push_str(&format!("General description: {}\n", classification.description));
        prompt.push_str(&format!("Evidence summary: {}\n", evidence.summary));
        prompt.push_str(&format!(
            "Evidence confidence: {}; sources: {}\n",
            evidence.confidence, evidence.sources
        ));
        if let Some(note) = &check.special_note {
            prompt.push_str(&format!("Consensus note: {}\n", note));
        }
        prompt.push('\n');
        prompt.push_str(
            "Provide a concise, empathetic, and harm-reduction focused explanation of why \
this interaction occurs and what the specific risks or effects are.\n",
        );
        prompt.push_str(&format!("Keep it under {} words.\n", self.max_words));
        prompt.push_str("Include a clear warning if it is dangerous.\n");
        prompt.push_str("Format the output in Markdown.");

        GenerationRequest {
            subject: first.to_string(),
            second_subject: Some(second.to_string()),
            context: RiskContext {
                label: Some(classification.label.clone()),
                summary: Some(evidence.summary.clone()),
                confidence: Some(evidence.confidence),
                sources: Some(evidence.sources.clone()),
                severity: Some(classification.severity),
            },
            prompt,
            system_instruction: INTERACTION_SYSTEM_INSTRUCTION.to_string(),
        }
    }

    /// Build a summary request for one substance, or for a resolved pair
    pub fn summary(&self, first: &Substance, pair: Option<(&Substance, &InteractionCheck)>) -> GenerationRequest {
        let (prompt, second_subject, context) = match pair {
            Some((second, check)) => {
                let classification = &check.classification;
                let evidence = &check.evidence;
                let prompt = format!(
                    "Provide a combined summary for the interaction between {} and {}.\n\
The interaction is categorized as \"{}\" ({}, severity {} of 5).\n\
Evidence confidence: {}; sources: {}\n\
For each drug, include:\n\
- Typical Effects\n\
- Onset Time\n\
- Duration\n\n\
Then, summarize the interaction risks and safety profile based on harm reduction principles.\n\
Present this in a clear, easy-to-understand Markdown format with headers.\n\
Keep the total response concise but informative.",
                    first.name,
                    second.name,
                    classification.label,
                    classification.code,
                    classification.severity,
                    evidence.confidence,
                    evidence.sources
                );
                let context = RiskContext {
                    label: Some(classification.label.clone()),
                    summary: Some(evidence.summary.clone()),
                    confidence: Some(evidence.confidence),
                    sources: Some(evidence.sources.clone()),
                    severity: Some(classification.severity),
                };
                (prompt, Some(second.name.clone()), context)
            }
            None => {
                let prompt = format!(
                    "Provide a comprehensive summary for {}.\n\
Include:\n\
- Typical Effects\n\
- Onset Time\n\
- Duration\n\
- Potential Risks (Short and Long term)\n\n\
Present this in a clear, easy-to-understand Markdown format with headers.\n\
Keep it concise and focused on harm reduction.",
                    first.name
                );
                (prompt, None, RiskContext::default())
            }
        };

        GenerationRequest {
            subject: first.name.clone(),
            second_subject,
            context,
            prompt,
            system_instruction: SUMMARY_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(100)
    }
}
