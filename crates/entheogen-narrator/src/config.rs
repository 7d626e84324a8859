//! Configuration for the Narrator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Narrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    /// Maximum time for a single generation call (seconds)
    pub generation_timeout_secs: u64,

    /// Word limit requested from the model for pair explanations
    pub max_words: usize,

    /// Call the generator for a substance paired with itself
    pub generate_for_self_pairs: bool,
}

impl NarratorConfig {
    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        if self.max_words < 20 {
            return Err("max_words must be at least 20".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            generation_timeout_secs: 45,
            max_words: 100,
            generate_for_self_pairs: false,
        }
    }
}
