//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the fq CLI.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use flyer_catalog_rs::SortKey;

/// fq - Query grocery flyer catalogs from the command line
#[derive(Parser, Debug)]
#[command(name = "fq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show load progress)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Feed location: URL, file, or directory (default: from config)
    #[arg(long, global = true, env = "FLYER_FEED")]
    pub feed: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products matching the given filters
    #[command(alias = "l")]
    List {
        /// Filter by product name (substring, case-insensitive)
        #[arg(short, long)]
        name: Option<String>,

        /// Filter by brand (exact, case-insensitive)
        #[arg(short, long)]
        brand: Option<String>,

        /// Filter by store (exact, case-insensitive)
        #[arg(short, long)]
        store: Option<String>,

        /// Filter by category (exact, case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Free-text search over every field
        #[arg(long)]
        search: Option<String>,

        /// Minimum current price
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum current price
        #[arg(long)]
        max_price: Option<f64>,

        /// Filter by validity year (e.g., "2025")
        #[arg(short = 'y', long)]
        year: Option<String>,

        /// Show only promoted products
        #[arg(long)]
        promo: bool,

        /// Show only non-promoted products
        #[arg(long, conflicts_with = "promo")]
        no_promo: bool,

        /// Show only products valid on this date (YYYY-MM-DD)
        #[arg(long)]
        valid_on: Option<NaiveDate>,

        /// Sort results
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Limit results (default: 50)
        #[arg(long, default_value = "50")]
        limit: u32,

        /// Show all results (no limit)
        #[arg(long)]
        all: bool,

        /// Stamp this store name onto records that lack one
        #[arg(long)]
        store_label: Option<String>,

        /// Drop records without a price at load time
        #[arg(long)]
        drop_unpriced: bool,
    },

    /// List distinct brands in the feed
    Brands,

    /// List distinct stores in the feed
    Stores,

    /// List distinct categories in the feed
    Categories,

    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Sort orders for the list command
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortArg {
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Name A to Z
    NameAsc,
    /// Name Z to A
    NameDesc,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::PriceAsc => SortKey::PriceAsc,
            SortArg::PriceDesc => SortKey::PriceDesc,
            SortArg::NameAsc => SortKey::NameAsc,
            SortArg::NameDesc => SortKey::NameDesc,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,
}
