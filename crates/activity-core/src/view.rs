//! Display projection: filtering, ordering and labelling of stored events.
//!
//! Everything here is a pure function of its inputs. Nothing is cached
//! between calls, so the projection is recomputed on every read.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::event::{ActivityEvent, ActivityKind};
use crate::types::{Confidence, ConfidenceFilter};

/// Rows to display for `filter`, most recent first.
///
/// Events with equal start times keep their arrival order.
pub fn project(events: &[ActivityEvent], filter: ConfidenceFilter) -> Vec<ActivityEvent> {
    let mut rows: Vec<ActivityEvent> = events
        .iter()
        .filter(|e| filter.matches(e.confidence()))
        .copied()
        .collect();

    // Stable sort, so ties stay in arrival order
    rows.sort_by(|a, b| b.start_time().cmp(&a.start_time()));
    rows
}

/// Human-facing label and icon for an activity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayKind {
    pub kind: ActivityKind,
    pub label: &'static str,
    /// SF Symbols name used by the mobile front end.
    pub symbol: &'static str,
}

/// Labels an event. The kind was resolved when the event was built.
pub const fn classify(event: &ActivityEvent) -> DisplayKind {
    let kind = event.kind();
    let (label, symbol) = match kind {
        ActivityKind::Running => ("Running", "figure.run"),
        ActivityKind::Walking => ("Walking", "figure.walk"),
        ActivityKind::Automotive => ("Automotive", "car.side"),
        ActivityKind::Cycling => ("Cycling", "figure.outdoor.cycle"),
        ActivityKind::Stationary => ("Stationary", "figure.stand"),
        ActivityKind::Unknown => ("Unknown", "questionmark.circle"),
    };
    DisplayKind {
        kind,
        label,
        symbol,
    }
}

/// Colour of the confidence dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Red,
    Orange,
    Green,
}

impl BadgeColor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// No badge is drawn for the unknown sentinel.
pub const fn confidence_badge(confidence: Confidence) -> Option<BadgeColor> {
    match confidence {
        Confidence::Low => Some(BadgeColor::Red),
        Confidence::Medium => Some(BadgeColor::Orange),
        Confidence::High => Some(BadgeColor::Green),
        Confidence::Unknown => None,
    }
}

/// Short date and short time, e.g. `10/26/23, 10:05 AM`.
pub fn format_start_time<Tz>(start_time: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    start_time
        .with_timezone(tz)
        .format("%-m/%-d/%y, %-I:%M %p")
        .to_string()
}
