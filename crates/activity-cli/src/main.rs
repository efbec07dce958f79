use std::io::{self, Write};

use activity_core::ConfidenceFilter;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use activity_cli::commands::{replay, show};
use activity_cli::{Cli, Commands, Config, DisplayZone, ViewArgs};

/// Resolves the filter and time zone from flags, falling back to config.
fn resolve_view(view: &ViewArgs, config: &Config) -> (ConfidenceFilter, DisplayZone) {
    let filter = view.filter.unwrap_or(config.default_filter);
    let zone = if view.utc {
        DisplayZone::Utc
    } else {
        config.time_zone
    };
    (filter, zone)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays clean for JSON output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Show {
            feed,
            view,
            json,
            max_events,
        }) => {
            let (filter, zone) = resolve_view(view, &config);
            let options = show::ShowOptions {
                filter,
                zone,
                json: *json,
                max_events: *max_events,
            };
            show::run(&mut stdout, feed.as_deref(), options)?;
        }
        Some(Commands::Replay { script, view }) => {
            let (filter, zone) = resolve_view(view, &config);
            replay::run(&mut stdout, script, filter, zone)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
