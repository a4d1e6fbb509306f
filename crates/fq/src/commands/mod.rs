//! Command implementations for the fq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod facets;
pub mod list;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Feed load or parse error.
    #[error("feed error: {0}")]
    Feed(#[from] flyer_feed_rs::error::FeedError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A facet filter value that matches nothing in the loaded feed.
    #[error("unknown {field} '{value}'{}", .suggestion.as_ref().map_or_else(String::new, |s| format!(" (did you mean '{s}'?)")))]
    UnknownFacetValue {
        /// The facet field ("brand" or "store").
        field: &'static str,
        /// The value the user asked for.
        value: String,
        /// Closest known value, if any is close enough.
        suggestion: Option<String>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common output settings.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are disabled by `--no-color` or the `NO_COLOR` environment
    /// variable.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}
