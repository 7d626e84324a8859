//! Output formatting for the CLI.

use colored::*;
use crate::config::OutputFormat;
use crate::error::Result;
use entheogen_domain::{
    FavoriteEntry, GenerationError, PairEvidence, PairKey, RiskClassification, Substance,
};
use entheogen_narrator::Narrative;
use entheogen_resolver::InteractionCheck;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format catalogue entries.
    pub fn format_substances(&self, substances: &[&Substance]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(substances)?),
            OutputFormat::Quiet => Ok(substances
                .iter()
                .map(|s| s.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if substances.is_empty() {
                    return Ok(self.colorize("No substances found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Class", "Mechanism"]);
                for s in substances {
                    builder.push_record([
                        s.id.as_str(),
                        &s.name,
                        &s.class,
                        s.mechanism_tag.as_deref().unwrap_or("-"),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a pair check with an optional explanation.
    pub fn format_check(&self, check: &InteractionCheck, narrative: Option<&Narrative>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "check": check,
                    "narrative": narrative,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(check.classification.code.to_string()),
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&self.severity_badge(&check.classification));
                out.push_str("\n\n");
                out.push_str(&check.readout);

                match narrative {
                    Some(Narrative::Generated(text)) => {
                        out.push('\n');
                        out.push_str(&self.generated_block(text));
                    }
                    // Fallback text is the readout already printed above
                    Some(Narrative::Fallback { reason, .. }) => {
                        out.push('\n');
                        out.push_str(&self.warning(&fallback_hint(reason)));
                    }
                    None => {}
                }
                Ok(out)
            }
        }
    }

    /// Format a standalone narrative (summaries).
    pub fn format_narrative(&self, narrative: &Narrative) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(narrative)?),
            OutputFormat::Quiet => Ok(narrative.text().to_string()),
            OutputFormat::Table => Ok(match narrative {
                Narrative::Generated(text) => text.clone(),
                Narrative::Fallback { reason, text } => {
                    format!("{}\n\n{}", self.warning(&fallback_hint(reason)), text)
                }
            }),
        }
    }

    fn generated_block(&self, text: &str) -> String {
        format!("{}\n\n{}", self.colorize("### Generated explanation", "cyan"), text)
    }

    /// Format curated rules.
    pub fn format_rules(&self, rules: &[(&PairKey, &PairEvidence, &RiskClassification)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = rules
                    .iter()
                    .map(|(key, evidence, classification)| {
                        serde_json::json!({
                            "pair": key,
                            "code": evidence.code,
                            "label": classification.label,
                            "severity": classification.severity,
                            "summary": evidence.summary,
                            "confidence": evidence.confidence,
                            "sources": evidence.sources,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(rules
                .iter()
                .map(|(key, evidence, _)| format!("{} {}", key, evidence.code))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if rules.is_empty() {
                    return Ok(self.colorize("No rules found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Pair", "Code", "Severity", "Confidence", "Summary"]);
                for (key, evidence, classification) in rules {
                    builder.push_record([
                        key.to_string(),
                        evidence.code.to_string(),
                        classification.severity.to_string(),
                        evidence.confidence.to_string(),
                        truncate(&evidence.summary, 60),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format legend entries with their action sentences.
    pub fn format_legend(&self, legend: &[RiskClassification]) -> Result<String> {
        let action = |severity| entheogen_domain::action_for(severity).unwrap_or("-");

        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = legend
                    .iter()
                    .map(|c| -> std::result::Result<serde_json::Value, serde_json::Error> {
                        let mut value = serde_json::to_value(c)?;
                        value["action"] = serde_json::Value::from(action(c.severity));
                        Ok(value)
                    })
                    .collect::<std::result::Result<_, serde_json::Error>>()?;
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(legend
                .iter()
                .map(|c| c.code.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Code", "Label", "Severity", "Action"]);
                for c in legend {
                    builder.push_record([
                        self.colorize(&c.code.to_string(), severity_color(c.severity)),
                        c.label.clone(),
                        c.severity.to_string(),
                        action(c.severity).to_string(),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format saved pairs.
    pub fn format_favorites(&self, entries: &[FavoriteEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No saved pairs.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Pair", "First", "Second", "Code"]);
                for e in entries {
                    builder.push_record([
                        e.id.clone(),
                        e.drug1.to_string(),
                        e.drug2.to_string(),
                        e.code.to_string(),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn severity_badge(&self, classification: &RiskClassification) -> String {
        let text = format!("[{}] {}", classification.code, classification.label);
        self.colorize(&text, severity_color(classification.severity))
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Terminal color for a severity rank.
pub fn severity_color(severity: i32) -> &'static str {
    match severity {
        5 => "red",
        4 => "magenta",
        3 => "yellow",
        2 => "cyan",
        1 => "blue",
        -1 => "green",
        _ => "",
    }
}

/// One-line hint shown above fallback text.
pub fn fallback_hint(reason: &GenerationError) -> String {
    match reason {
        GenerationError::MissingCredential => {
            "No API key configured; showing the rule-based readout.".to_string()
        }
        GenerationError::EmptyResponse => {
            "The model returned nothing; showing the rule-based readout.".to_string()
        }
        GenerationError::QuotaExceeded => {
            "Generation quota exceeded; try again later. Showing the rule-based readout.".to_string()
        }
        GenerationError::Unavailable(detail) => format!(
            "Generation unavailable ({}); try again later. Showing the rule-based readout.",
            detail
        ),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}
