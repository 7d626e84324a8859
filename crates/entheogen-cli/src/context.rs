//! Loaded state shared by the commands.

use crate::config::{Config, Variant};
use crate::error::{CliError, Result};
use entheogen_dataset::{builtin, InteractionDataset};
use entheogen_domain::Substance;
use entheogen_llm::GeminiProvider;
use entheogen_narrator::Narrator;
use entheogen_resolver::Resolver;
use entheogen_store::JsonFileStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Configuration plus the active variant's dataset.
pub struct AppContext {
    /// Loaded configuration
    pub config: Config,

    /// Where the configuration lives; relative variant paths resolve against its directory
    pub config_path: PathBuf,

    /// Resolver over the active variant's dataset
    pub resolver: Resolver,
}

impl AppContext {
    /// Load the active variant's dataset.
    ///
    /// Any dataset error is returned unchanged; callers treat it as fatal.
    pub fn load(config: Config, config_path: PathBuf) -> Result<Self> {
        let variant = config.get_active_variant()?;
        let base = config_dir(&config_path);
        let dataset = load_dataset(variant, &base)?;
        info!(
            "Variant '{}' ready: {} substances, {} rules",
            config.active_variant,
            dataset.substances().len(),
            dataset.rule_count()
        );

        Ok(Self {
            resolver: Resolver::new(Arc::new(dataset)),
            config,
            config_path,
        })
    }

    /// Directory holding the config file.
    pub fn config_dir(&self) -> PathBuf {
        config_dir(&self.config_path)
    }

    /// Favorites store of the active variant.
    pub fn favorites_store(&self) -> Result<JsonFileStore> {
        let variant = self.config.get_active_variant()?;
        let (primary, legacy) = variant.favorites_paths(&self.config_dir());
        Ok(JsonFileStore::new(primary).with_legacy_paths(legacy))
    }

    /// Look up a catalogue entry, rejecting unknown ids.
    pub fn require_substance(&self, id: &str) -> Result<&Substance> {
        self.resolver.dataset().find_substance(id).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Unknown substance '{}'. Run 'entheogen list' to see valid ids.",
                id
            ))
        })
    }

    /// Build a narrator using the configured provider.
    pub fn narrator(&self) -> Result<Narrator<GeminiProvider>> {
        let provider = self.config.generator.provider();
        Ok(Narrator::new(
            provider,
            self.resolver.clone(),
            self.config.narrator.clone(),
        )?)
    }
}

/// Load a variant's dataset, or the built-in set when it names none.
pub fn load_dataset(variant: &Variant, base: &Path) -> Result<InteractionDataset> {
    let dataset = match &variant.dataset {
        Some(path) => InteractionDataset::from_path(base.join(path))?,
        None => builtin::ceremonial()?,
    };
    Ok(dataset)
}

fn config_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
