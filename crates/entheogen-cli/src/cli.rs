//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};

/// EntheoGen CLI - Check substance combinations against a curated interaction table.
#[derive(Debug, Parser)]
#[command(name = "entheogen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ENTHEOGEN_CONFIG")]
    pub config: Option<String>,

    /// Dataset variant to use
    #[arg(long, global = true)]
    pub variant: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids and codes only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List substances in the catalogue
    List(ListArgs),

    /// Check a pair of substances
    Check(CheckArgs),

    /// Generated summary of one substance, or two combined
    Summary(SummaryArgs),

    /// List curated interaction rules
    Rules(RulesArgs),

    /// Show the risk legend with recommended actions
    Legend,

    /// Manage saved pairs
    Favorites(FavoritesArgs),

    /// Manage dataset variants
    Variant(VariantArgs),
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only show substances whose id, name or class match
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// First substance id
    pub first: String,

    /// Second substance id
    pub second: String,

    /// Add a generated explanation (falls back to the readout on failure)
    #[arg(short, long)]
    pub explain: bool,
}

/// Arguments for the summary command.
#[derive(Debug, Parser)]
pub struct SummaryArgs {
    /// Substance id
    pub first: String,

    /// Optional second substance id for a combined summary
    pub second: Option<String>,
}

/// Arguments for the rules command.
#[derive(Debug, Parser)]
pub struct RulesArgs {
    /// Only show rules with this classification code
    #[arg(long)]
    pub code: Option<String>,

    /// Only show rules involving this substance id
    #[arg(short, long)]
    pub substance: Option<String>,
}

/// Arguments for favorites management.
#[derive(Debug, Parser)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub action: FavoritesAction,
}

/// Favorites actions.
#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List saved pairs
    List,

    /// Save a pair
    Add {
        /// First substance id
        first: String,
        /// Second substance id
        second: String,
    },

    /// Remove a saved pair
    Remove {
        /// First substance id
        first: String,
        /// Second substance id
        second: String,
    },

    /// Remove all saved pairs
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Arguments for variant management.
#[derive(Debug, Parser)]
pub struct VariantArgs {
    #[command(subcommand)]
    pub action: VariantAction,
}

/// Variant management actions.
#[derive(Debug, Subcommand)]
pub enum VariantAction {
    /// List all variants
    List,

    /// Show the active variant
    Show,

    /// Switch to a different variant
    Switch {
        /// Variant name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
