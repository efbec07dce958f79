//! The activity list screen, rendered as text or JSON.

use std::fmt::Write;

use activity_core::{
    ActivityKind, ActivityMonitor, BadgeColor, Confidence, ConfidenceFilter, classify,
    confidence_badge, format_start_time,
};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::DisplayZone;

/// One displayed activity.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub start_time: DateTime<Utc>,
    /// `start_time` formatted for the configured time zone.
    #[serde(skip)]
    pub started: String,
    pub kind: ActivityKind,
    pub label: &'static str,
    pub symbol: &'static str,
    pub confidence: Confidence,
    pub badge: Option<BadgeColor>,
}

/// Everything the screen shows at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct Screen {
    pub filter: ConfidenceFilter,
    /// Events in the store, visible or not.
    #[serde(skip)]
    pub total: usize,
    pub rows: Vec<Row>,
}

impl Screen {
    /// Projects the monitor's current state.
    pub fn capture(monitor: &ActivityMonitor, zone: DisplayZone) -> Self {
        let rows = monitor
            .rows()
            .iter()
            .map(|event| {
                let display = classify(event);
                let started = match zone {
                    DisplayZone::Local => format_start_time(event.start_time(), &Local),
                    DisplayZone::Utc => format_start_time(event.start_time(), &Utc),
                };
                Row {
                    start_time: event.start_time(),
                    started,
                    kind: display.kind,
                    label: display.label,
                    symbol: display.symbol,
                    confidence: event.confidence(),
                    badge: confidence_badge(event.confidence()),
                }
            })
            .collect();

        Self {
            filter: monitor.filter(),
            total: monitor.store().len(),
            rows,
        }
    }
}

/// Format the screen for human-readable output.
pub fn format_screen(screen: &Screen) -> String {
    let mut output = String::new();

    writeln!(output, "Activity recognition").unwrap();

    let picker: Vec<String> = ConfidenceFilter::ALL
        .iter()
        .map(|f| {
            if *f == screen.filter {
                format!("[{f}]")
            } else {
                f.to_string()
            }
        })
        .collect();
    writeln!(output, "accuracy: {}", picker.join("  ")).unwrap();
    writeln!(output).unwrap();

    if screen.rows.is_empty() {
        if screen.total == 0 {
            writeln!(output, "No activities recorded.").unwrap();
        } else {
            writeln!(
                output,
                "No {} confidence activities ({} hidden).",
                screen.filter, screen.total
            )
            .unwrap();
        }
        return output;
    }

    // Header
    writeln!(output, "{:<10}  {:<18}  CONFIDENCE", "KIND", "STARTED").unwrap();
    writeln!(output, "──────────  ──────────────────  ──────────────").unwrap();

    // Rows
    for row in &screen.rows {
        let confidence = match row.badge {
            Some(badge) => format!("{} ({badge})", row.confidence),
            None => row.confidence.to_string(),
        };
        writeln!(
            output,
            "{:<10}  {:<18}  {}",
            row.label, row.started, confidence
        )
        .unwrap();
    }

    output
}
