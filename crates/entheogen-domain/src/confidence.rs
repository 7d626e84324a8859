//! Confidence module - how well a pair rule is supported by its sources

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence in a pair's evidence
///
/// Curated rules carry `Low`, `Medium` or `High`. `NotApplicable` is used
/// only by the self-pair record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    /// Weak or indirect support
    #[serde(rename = "low")]
    Low,

    /// Reasonable support
    #[serde(rename = "medium")]
    Medium,

    /// Explicitly stated in the sources
    #[serde(rename = "high")]
    High,

    /// Not a real pair
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl Confidence {
    /// Get the confidence name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
            Confidence::NotApplicable => "n/a",
        }
    }

    /// Parse a confidence from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Confidence::Low),
            "medium" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            "n/a" | "na" => Some(Confidence::NotApplicable),
            _ => None,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid confidence: {}", s))
    }
}
