//! Risk module - the classification legend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic key of a legend entry (e.g. `DAN`, `LOW_MOD`)
///
/// Codes are upper-case. Two codes are reserved and must be present in every
/// legend: [`RiskCode::SELF_PAIR`] and [`RiskCode::UNKNOWN`]. The older spelling
/// `UNK` is normalized to `UNKNOWN` on construction and deserialization, so
/// favorites written by earlier releases still resolve against the legend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RiskCode(String);

impl RiskCode {
    /// Reserved code for a pair of identical ids
    pub const SELF_PAIR: &'static str = "SELF";

    /// Reserved code for a pair with no curated rule
    pub const UNKNOWN: &'static str = "UNKNOWN";

    const LEGACY_UNKNOWN: &'static str = "UNK";

    /// Create a code, normalizing case and legacy spellings
    ///
    /// # Examples
    ///
    /// ```
    /// use entheogen_domain::RiskCode;
    ///
    /// assert_eq!(RiskCode::new("dan").as_str(), "DAN");
    /// assert!(RiskCode::new("UNK").is_unknown());
    /// ```
    pub fn new(code: impl AsRef<str>) -> Self {
        let code = code.as_ref().trim().to_uppercase();
        if code == Self::LEGACY_UNKNOWN {
            return Self(Self::UNKNOWN.to_string());
        }
        Self(code)
    }

    /// The `SELF` code
    pub fn self_pair() -> Self {
        Self(Self::SELF_PAIR.to_string())
    }

    /// The `UNKNOWN` code
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Borrow the code string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the `SELF` sentinel
    pub fn is_self_pair(&self) -> bool {
        self.0 == Self::SELF_PAIR
    }

    /// Whether this is the `UNKNOWN` sentinel
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Whether this is one of the two reserved sentinels
    pub fn is_reserved(&self) -> bool {
        self.is_self_pair() || self.is_unknown()
    }
}

impl fmt::Display for RiskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RiskCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RiskCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<RiskCode> for String {
    fn from(code: RiskCode) -> Self {
        code.0
    }
}

impl PartialEq<str> for RiskCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RiskCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One entry of the legend
///
/// `severity` is a total order over classifications; lower is safer. The
/// sentinels sit outside the danger scale: `SELF` is -1 and `UNKNOWN` is 0.
/// `symbol` and `color` are display hints only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskClassification {
    /// Unique symbolic key
    pub code: RiskCode,

    /// Human-readable label
    pub label: String,

    /// Severity rank
    pub severity: i32,

    /// Display symbol name
    #[serde(default)]
    pub symbol: String,

    /// Display color (hex)
    #[serde(default)]
    pub color: String,

    /// Short description of what the classification means
    pub description: String,
}

impl RiskClassification {
    /// Severity of the `SELF` sentinel
    pub const SELF_SEVERITY: i32 = -1;

    /// Severity of the `UNKNOWN` sentinel
    pub const UNKNOWN_SEVERITY: i32 = 0;

    /// Create a legend entry without display hints
    pub fn new(
        code: impl Into<RiskCode>,
        label: impl Into<String>,
        severity: i32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            severity,
            symbol: String::new(),
            color: String::new(),
            description: description.into(),
        }
    }

    /// Attach display hints
    pub fn with_display(mut self, symbol: impl Into<String>, color: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self.color = color.into();
        self
    }

    /// Whether this entry is on the ordinary danger scale
    pub fn is_rated(&self) -> bool {
        self.severity > Self::UNKNOWN_SEVERITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_normalization() {
        assert_eq!(RiskCode::new(" low_mod "), "LOW_MOD");
        assert_eq!(RiskCode::new("UNK"), RiskCode::unknown());
        assert_eq!(RiskCode::new("unknown"), RiskCode::unknown());
        assert!(RiskCode::new("self").is_self_pair());
    }

    #[test]
    fn test_reserved() {
        assert!(RiskCode::self_pair().is_reserved());
        assert!(RiskCode::unknown().is_reserved());
        assert!(!RiskCode::new("DAN").is_reserved());
    }

    #[test]
    fn test_legacy_code_deserializes_as_unknown() {
        let code: RiskCode = serde_json::from_str("\"UNK\"").unwrap();
        assert!(code.is_unknown());
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"UNKNOWN\"");
    }

    #[test]
    fn test_is_rated() {
        let unknown = RiskClassification::new("UNKNOWN", "Unknown", 0, "No data");
        let dan = RiskClassification::new("DAN", "Dangerous", 5, "Avoid");
        assert!(!unknown.is_rated());
        assert!(dan.is_rated());
    }
}
