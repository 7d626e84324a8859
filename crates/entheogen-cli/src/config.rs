//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use entheogen_llm::gemini::{
    API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use entheogen_llm::GeminiProvider;
use entheogen_narrator::NarratorConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Active variant name
    #[serde(default = "default_variant")]
    pub active_variant: String,

    /// Available dataset variants
    #[serde(default = "default_variants")]
    pub variants: BTreeMap<String, Variant>,

    /// Text-generation provider settings
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Narrator settings
    #[serde(default)]
    pub narrator: NarratorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// A branded dataset with its own favorites file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Name shown in headings
    pub display_name: String,

    /// Dataset file (TOML or JSON); the built-in set when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Favorites file, relative to the config directory unless absolute
    pub favorites_file: PathBuf,

    /// Older favorites files read when `favorites_file` does not exist yet
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legacy_favorites_files: Vec<PathBuf>,
}

/// Text-generation provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Model name
    pub model: String,

    /// API base URL
    pub endpoint: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// HTTP timeout per attempt (seconds)
    pub timeout_secs: u64,

    /// Attempts for retryable failures
    pub max_retries: u32,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".entheogen").join("config.toml"))
    }

    /// Load configuration from `path`, or return defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<()> {
        if !self.variants.contains_key(&self.active_variant) {
            return Err(CliError::Config(format!(
                "Active variant '{}' is not defined",
                self.active_variant
            )));
        }
        self.generator.validate()?;
        self.narrator.validate().map_err(CliError::Config)
    }

    /// Get the active variant.
    pub fn get_active_variant(&self) -> Result<&Variant> {
        self.variants
            .get(&self.active_variant)
            .ok_or_else(|| CliError::Config(format!("Variant '{}' not found", self.active_variant)))
    }

    /// Switch to a different variant.
    pub fn switch_variant(&mut self, name: String) -> Result<()> {
        if !self.variants.contains_key(&name) {
            return Err(CliError::Config(format!("Variant '{}' does not exist", name)));
        }
        self.active_variant = name;
        Ok(())
    }
}

impl Variant {
    /// Resolve the favorites paths against the config directory.
    pub fn favorites_paths(&self, base: &Path) -> (PathBuf, Vec<PathBuf>) {
        let primary = base.join(&self.favorites_file);
        let legacy = self
            .legacy_favorites_files
            .iter()
            .map(|p| base.join(p))
            .collect();
        (primary, legacy)
    }
}

impl GeneratorSettings {
    /// Upper bound on `max_retries`
    pub const MAX_RETRIES_LIMIT: u32 = 10;

    /// Check the numeric settings.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(CliError::Config(
                "generator.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.max_retries == 0 || self.max_retries > Self::MAX_RETRIES_LIMIT {
            return Err(CliError::Config(format!(
                "generator.max_retries must be between 1 and {}",
                Self::MAX_RETRIES_LIMIT
            )));
        }
        Ok(())
    }

    /// Build a provider from these settings and the environment.
    ///
    /// A missing key is not an error here; the provider reports
    /// `MissingCredential` on first use.
    pub fn provider(&self) -> GeminiProvider {
        let api_key = std::env::var(&self.api_key_env).ok();
        GeminiProvider::new(api_key, &self.model)
            .with_endpoint(&self.endpoint)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_retries(self.max_retries)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_variant: default_variant(),
            variants: default_variants(),
            generator: GeneratorSettings::default(),
            narrator: NarratorConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_variant() -> String {
    "entheogen".to_string()
}

fn default_variants() -> BTreeMap<String, Variant> {
    let mut variants = BTreeMap::new();
    variants.insert(
        "entheogen".to_string(),
        Variant {
            display_name: "EntheoGen".to_string(),
            dataset: None,
            favorites_file: PathBuf::from("entheogen_favorites.json"),
            legacy_favorites_files: vec![PathBuf::from("seshguard_favorites.json")],
        },
    );
    variants.insert(
        "seshguard".to_string(),
        Variant {
            display_name: "SeshGuard".to_string(),
            dataset: None,
            favorites_file: PathBuf::from("seshguard_favorites.json"),
            legacy_favorites_files: Vec::new(),
        },
    );
    variants
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
