//! Show command: replay a notification feed and print the resulting screen.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use activity_core::{ActivityMonitor, ConfidenceFilter, ReplaySource};
use anyhow::{Context, Result};

use crate::DisplayZone;
use crate::screen::{Screen, format_screen};

/// Options for a single `show` run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOptions {
    pub filter: ConfidenceFilter,
    pub zone: DisplayZone,
    pub json: bool,
    pub max_events: Option<usize>,
}

/// Opens the feed, treating a missing path or `-` as stdin.
fn open_feed(feed: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match feed {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open feed {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Runs the show command.
pub fn run<W: Write>(writer: &mut W, feed: Option<&Path>, options: ShowOptions) -> Result<()> {
    let mut source = ReplaySource::new(open_feed(feed)?);
    render(writer, &mut source, options)
}

/// Monitors `source` to completion (or `max_events`) and writes the screen.
pub fn render<W: Write, R: BufRead>(
    writer: &mut W,
    source: &mut ReplaySource<R>,
    options: ShowOptions,
) -> Result<()> {
    let mut monitor = ActivityMonitor::new(options.filter);
    if let Some(max) = options.max_events {
        monitor = monitor.with_max_events(max);
    }

    if monitor.start_monitoring(source) && !source.is_exhausted() {
        monitor.stop_monitoring(source);
    }
    tracing::debug!(
        stored = monitor.store().len(),
        filter = %monitor.filter(),
        "feed replayed"
    );

    let screen = Screen::capture(&monitor, options.zone);
    if options.json {
        serde_json::to_writer_pretty(&mut *writer, &screen)
            .context("failed to serialize screen")?;
        writeln!(writer)?;
    } else {
        write!(writer, "{}", format_screen(&screen))?;
    }

    Ok(())
}
