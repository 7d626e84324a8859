//! EntheoGen CLI - Command-line interface for the substance interaction checker.

use clap::Parser;
use entheogen_cli::commands;
use entheogen_cli::{AppContext, Cli, Command, Config, Formatter};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> entheogen_cli::Result<()> {
    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };

    // Load or create config
    let mut config = if config_path.exists() {
        Config::load_from(&config_path)?
    } else {
        let config = Config::default();
        if let Err(e) = config.save_to(&config_path) {
            warn!("Could not write default config to {}: {}", config_path.display(), e);
        }
        config
    };

    // Override variant if specified
    if let Some(variant) = cli.variant {
        config.switch_variant(variant)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Variant management must work even when a dataset is broken
    let command = match cli.command {
        Command::Variant(args) => {
            return commands::execute_variant(args, &mut config, &config_path, &formatter)
        }
        command => command,
    };

    // Every other command needs a valid dataset; load errors end the process here
    let ctx = AppContext::load(config, config_path)?;

    match command {
        Command::List(args) => commands::execute_list(args, &ctx, &formatter)?,
        Command::Check(args) => commands::execute_check(args, &ctx, &formatter).await?,
        Command::Summary(args) => commands::execute_summary(args, &ctx, &formatter).await?,
        Command::Rules(args) => commands::execute_rules(args, &ctx, &formatter)?,
        Command::Legend => commands::execute_legend(&ctx, &formatter)?,
        Command::Favorites(args) => commands::execute_favorites(args, &ctx, &formatter)?,
        Command::Variant(_) => {} // handled above
    }

    Ok(())
}
