//! Variant command implementation.

use crate::cli::{VariantAction, VariantArgs};
use crate::config::Config;
use crate::context::load_dataset;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the variant command.
///
/// Works on the configuration alone so that a variant with a broken dataset
/// can still be switched away from.
pub fn execute_variant(
    args: VariantArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        VariantAction::List => list_variants(config, formatter),
        VariantAction::Show => show_active_variant(config, config_path, formatter),
        VariantAction::Switch { name } => switch_variant(config, config_path, name, formatter),
    }
}

/// List all variants.
fn list_variants(config: &Config, formatter: &Formatter) -> Result<()> {
    println!("Available variants:");
    for (name, variant) in &config.variants {
        let active = name == &config.active_variant;
        println!(
            "{}{}",
            if active { "* " } else { "  " },
            if active { formatter.success(name) } else { name.clone() }
        );
        println!("    Name: {}", variant.display_name);
        match &variant.dataset {
            Some(path) => println!("    Dataset: {}", path.display()),
            None => println!("    Dataset: built-in"),
        }
        println!("    Favorites: {}", variant.favorites_file.display());
    }

    Ok(())
}

/// Show the active variant with dataset statistics.
fn show_active_variant(config: &Config, config_path: &Path, formatter: &Formatter) -> Result<()> {
    let variant = config.get_active_variant()?;
    let base = config_path.parent().unwrap_or(Path::new(""));

    println!("Active variant: {}", formatter.success(&config.active_variant));
    println!("  Name: {}", variant.display_name);

    match load_dataset(variant, base) {
        Ok(dataset) => {
            println!("  Dataset: {}", dataset.name());
            println!("  Substances: {}", dataset.substances().len());
            println!("  Rules: {}", dataset.rule_count());
        }
        Err(e) => println!("  {}", formatter.error(&e.to_string())),
    }

    Ok(())
}

/// Switch to a different variant.
fn switch_variant(config: &mut Config, config_path: &Path, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_variant(name.clone())?;
    config.save_to(config_path)?;
    println!(
        "{}",
        formatter.success(&format!("Switched to variant '{}'", name))
    );
    Ok(())
}
