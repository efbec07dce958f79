//! Command-line argument definitions.

use std::path::PathBuf;

use activity_core::ConfidenceFilter;
use clap::{Args, Parser, Subcommand};

/// Activity recognition viewer.
///
/// Plays back motion-service notifications and shows the observed activities,
/// most recent first, with their confidence.
#[derive(Debug, Parser)]
#[command(name = "activity", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a recorded notification feed and show the resulting list.
    Show {
        /// JSON-lines feed of notifications (stdin if omitted or `-`).
        feed: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Stop monitoring after this many events have been stored.
        #[arg(long)]
        max_events: Option<usize>,
    },

    /// Replay a session script, printing the screen after every change.
    Replay {
        /// JSON-lines script of notifications and user actions.
        script: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Display options shared by all subcommands.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Confidence filter: all, low, medium or high.
    #[arg(long)]
    pub filter: Option<ConfidenceFilter>,

    /// Show start times in UTC instead of the local time zone.
    #[arg(long)]
    pub utc: bool,
}
