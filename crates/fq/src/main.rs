use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::load_config;
use commands::facets::FacetField;
use commands::list::ListOptions;
use commands::{CommandContext, CommandError};

/// Feed location used when neither flag, env, nor config names one.
const DEFAULT_FEED: &str = "data/data.json";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{}", serde_json::to_string_pretty(&error_json).unwrap());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(error_exit_code(&e))
        }
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Some(Commands::Completions { shell }) => Ok(commands::completions::execute(shell)?),

        Some(Commands::Config { command }) => match command {
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
            Some(ConfigCommands::Show) | None => commands::config::execute_show(&ctx),
        },

        Some(Commands::Brands) => {
            let feed = resolve_feed(cli)?;
            commands::facets::execute(&ctx, FacetField::Brand, &feed).await
        }
        Some(Commands::Stores) => {
            let feed = resolve_feed(cli)?;
            commands::facets::execute(&ctx, FacetField::Store, &feed).await
        }
        Some(Commands::Categories) => {
            let feed = resolve_feed(cli)?;
            commands::facets::execute(&ctx, FacetField::Category, &feed).await
        }

        Some(Commands::List {
            name,
            brand,
            store,
            category,
            search,
            min_price,
            max_price,
            year,
            promo,
            no_promo,
            valid_on,
            sort,
            limit,
            all,
            store_label,
            drop_unpriced,
        }) => {
            let feed = resolve_feed(cli)?;
            let opts = ListOptions {
                name: name.clone(),
                brand: brand.clone(),
                store: store.clone(),
                category: category.clone(),
                search: search.clone(),
                min_price: *min_price,
                max_price: *max_price,
                year: year.clone(),
                promotion: promotion_filter(*promo, *no_promo),
                valid_on: *valid_on,
                sort: *sort,
                limit: *limit,
                all: *all,
                store_label: store_label.clone(),
                drop_unpriced: *drop_unpriced,
            };
            commands::list::execute(&ctx, &opts, &feed).await
        }

        // Bare `fq` behaves like `fq list` with defaults
        None => {
            let feed = resolve_feed(cli)?;
            commands::list::execute(&ctx, &ListOptions::default(), &feed).await
        }
    }
}

/// Translates the `--promo`/`--no-promo` flag pair into a filter.
fn promotion_filter(promo: bool, no_promo: bool) -> Option<bool> {
    if promo {
        Some(true)
    } else if no_promo {
        Some(false)
    } else {
        None
    }
}

/// Resolves the feed location with priority: flag/env > config > default.
///
/// When cli.feed is Some it came from either the `--feed` flag or the
/// `FLYER_FEED` environment variable (clap handles the env fallback).
fn resolve_feed(cli: &Cli) -> commands::Result<String> {
    if let Some(feed) = &cli.feed {
        return Ok(feed.clone());
    }

    if let Ok(config) = load_config() {
        if let Some(feed) = config.feed {
            return Ok(feed);
        }
    }

    Ok(DEFAULT_FEED.to_string())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Feed(feed) if feed.is_parse_failure() => "PARSE_ERROR",
        CommandError::Feed(_) => "FEED_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::UnknownFacetValue { .. } => "UNKNOWN_VALUE",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> u8 {
    match e {
        CommandError::Feed(feed) => feed.exit_code() as u8,
        CommandError::Config(_) => 5,
        CommandError::UnknownFacetValue { .. } => 4,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to create a test CLI with the specified feed.
    fn cli_with_feed(feed: Option<String>) -> Cli {
        Cli {
            verbose: false,
            quiet: false,
            json: false,
            no_color: false,
            feed,
            command: None,
        }
    }

    #[test]
    fn test_promotion_filter() {
        assert_eq!(promotion_filter(true, false), Some(true));
        assert_eq!(promotion_filter(false, true), Some(false));
        assert_eq!(promotion_filter(false, false), None);
    }

    #[test]
    fn test_error_code_for_feed_failures() {
        let fetch = CommandError::Feed(flyer_feed_rs::error::FeedError::Network {
            message: "connection refused".to_string(),
        });
        assert_eq!(error_code(&fetch), "FEED_ERROR");

        let parse = CommandError::Feed(flyer_feed_rs::error::FeedError::NotAnArray);
        assert_eq!(error_code(&parse), "PARSE_ERROR");
    }

    #[test]
    fn test_error_code_for_cli_errors() {
        let unknown = CommandError::UnknownFacetValue {
            field: "brand",
            value: "Lactol".to_string(),
            suggestion: None,
        };
        assert_eq!(error_code(&unknown), "UNKNOWN_VALUE");
        assert_eq!(
            error_code(&CommandError::Config("bad".to_string())),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_exit_codes_per_failure_class() {
        let fetch = CommandError::Feed(flyer_feed_rs::error::FeedError::Http {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(error_exit_code(&fetch), 2);

        let parse = CommandError::Feed(flyer_feed_rs::error::FeedError::NotAnArray);
        assert_eq!(error_exit_code(&parse), 1);

        assert_eq!(error_exit_code(&CommandError::Config("bad".to_string())), 5);
        assert_eq!(
            error_exit_code(&CommandError::UnknownFacetValue {
                field: "store",
                value: "Nowhere".to_string(),
                suggestion: None,
            }),
            4
        );
        let io = CommandError::Io(std::io::Error::new(std::io::ErrorKind::Other, "io"));
        assert_eq!(error_exit_code(&io), 3);
    }

    #[test]
    #[serial]
    fn test_resolve_feed_from_flag() {
        let cli = cli_with_feed(Some("https://example.test/data.json".to_string()));
        let feed = resolve_feed(&cli).unwrap();
        assert_eq!(feed, "https://example.test/data.json");
    }

    #[test]
    #[serial]
    fn test_resolve_feed_default_without_config() {
        // Point config at a path that does not exist
        let original_config = env::var("FQ_CONFIG").ok();
        env::set_var("FQ_CONFIG", "/tmp/fq-test-nonexistent/config.toml");

        let cli = cli_with_feed(None);
        let result = resolve_feed(&cli);

        if let Some(val) = original_config {
            env::set_var("FQ_CONFIG", val);
        } else {
            env::remove_var("FQ_CONFIG");
        }

        assert_eq!(result.unwrap(), DEFAULT_FEED);
    }

    #[test]
    #[serial]
    fn test_resolve_feed_from_config() {
        use std::fs;
        use std::io::Write;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut file = fs::File::create(&config_path).unwrap();
        writeln!(file, r#"feed = "data/stores""#).unwrap();

        let original_config = env::var("FQ_CONFIG").ok();
        env::set_var("FQ_CONFIG", config_path.to_str().unwrap());

        let cli = cli_with_feed(None);
        let result = resolve_feed(&cli);

        if let Some(val) = original_config {
            env::set_var("FQ_CONFIG", val);
        } else {
            env::remove_var("FQ_CONFIG");
        }

        assert_eq!(result.unwrap(), "data/stores");
    }

    #[test]
    #[serial]
    fn test_resolve_feed_flag_overrides_config() {
        use std::fs;
        use std::io::Write;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut file = fs::File::create(&config_path).unwrap();
        writeln!(file, r#"feed = "data/stores""#).unwrap();

        let original_config = env::var("FQ_CONFIG").ok();
        env::set_var("FQ_CONFIG", config_path.to_str().unwrap());

        let cli = cli_with_feed(Some("flag-feed.json".to_string()));
        let result = resolve_feed(&cli);

        if let Some(val) = original_config {
            env::set_var("FQ_CONFIG", val);
        } else {
            env::remove_var("FQ_CONFIG");
        }

        assert_eq!(result.unwrap(), "flag-feed.json");
    }
}
