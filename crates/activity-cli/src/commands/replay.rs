//! Replay command: play back a session script of notifications and user actions.
//!
//! Each line of the script is a JSON object tagged by `type`:
//! `activity` (a notification), `none` (a null notification), `clear`
//! (the Clear button) or `filter` (the accuracy picker). A frame is printed
//! whenever the visible screen is invalidated.

use std::cell::Cell;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use activity_core::{ActivityKind, ActivityMonitor, ConfidenceFilter, RawActivity};
use anyhow::{Context, Result};
use serde::Deserialize;

use crate::DisplayZone;
use crate::screen::{Screen, format_screen};

/// One recorded step of a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    /// A notification from the motion service.
    Activity(RawActivity),
    /// A null notification.
    #[serde(rename = "none")]
    Null,
    /// The user pressed Clear.
    Clear,
    /// The user picked a confidence filter.
    Filter { filter: ConfidenceFilter },
}

impl fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activity(raw) => write!(
                f,
                "{} activity ({} confidence)",
                ActivityKind::from_flags(raw),
                raw.confidence
            ),
            Self::Null => write!(f, "null notification"),
            Self::Clear => write!(f, "clear"),
            Self::Filter { filter } => write!(f, "filter {filter}"),
        }
    }
}

/// Parses a script, skipping blank lines. Errors name the offending line.
pub fn parse_script(content: &str) -> Result<Vec<(usize, ScriptStep)>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let line_number = idx + 1;
            serde_json::from_str(line)
                .map(|step| (line_number, step))
                .with_context(|| format!("invalid script entry on line {line_number}"))
        })
        .collect()
}

/// Runs the replay command.
pub fn run<W: Write>(
    writer: &mut W,
    script: &Path,
    filter: ConfidenceFilter,
    zone: DisplayZone,
) -> Result<()> {
    let content = fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let steps = parse_script(&content)?;
    replay(writer, &steps, filter, zone)
}

/// Applies `steps` to a fresh session, writing the initial screen and a frame per change.
pub fn replay<W: Write>(
    writer: &mut W,
    steps: &[(usize, ScriptStep)],
    filter: ConfidenceFilter,
    zone: DisplayZone,
) -> Result<()> {
    let mut monitor = ActivityMonitor::new(filter);

    let invalidated = Rc::new(Cell::new(false));
    let flag = Rc::clone(&invalidated);
    monitor.subscribe(move |_, _| flag.set(true));

    writeln!(writer, "== start")?;
    write!(writer, "{}", format_screen(&Screen::capture(&monitor, zone)))?;

    let mut frames = 0;
    for (line, step) in steps {
        match step {
            ScriptStep::Activity(raw) => {
                monitor.receive(Some(raw.clone()));
            }
            ScriptStep::Null => {
                monitor.receive(None);
            }
            ScriptStep::Clear => {
                monitor.clear();
            }
            ScriptStep::Filter { filter } => {
                if monitor.set_filter(*filter) {
                    invalidated.set(true);
                }
            }
        }

        if invalidated.replace(false) {
            frames += 1;
            writeln!(writer)?;
            writeln!(writer, "== line {line}: {step}")?;
            write!(writer, "{}", format_screen(&Screen::capture(&monitor, zone)))?;
        } else {
            tracing::debug!(line, %step, "step left the screen unchanged");
        }
    }

    tracing::debug!(steps = steps.len(), frames, "script replayed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    const SCRIPT: &str = r#"{"type":"activity","start_time":"2023-10-26T10:00:00Z","stationary":true,"confidence":"high"}
{"type":"none"}
{"type":"activity","start_time":"2023-10-26T10:05:00Z","walking":true,"confidence":"low"}

{"type":"filter","filter":"low"}
{"type":"filter","filter":"low"}
{"type":"clear"}
{"type":"clear"}
"#;

    fn replay_script(script: &str) -> String {
        let steps = parse_script(script).unwrap();
        let mut output = Vec::new();
        replay(&mut output, &steps, ConfidenceFilter::All, DisplayZone::Utc).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_script_reads_every_step_kind() {
        let steps = parse_script(SCRIPT).unwrap();
        let lines: Vec<usize> = steps.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![1, 2, 3, 5, 6, 7, 8]);

        assert!(matches!(steps[0].1, ScriptStep::Activity(_)));
        assert_eq!(steps[1].1, ScriptStep::Null);
        assert_eq!(
            steps[3].1,
            ScriptStep::Filter {
                filter: ConfidenceFilter::Low
            }
        );
        assert_eq!(steps[5].1, ScriptStep::Clear);
    }

    #[test]
    fn parse_script_reports_line_number() {
        let err = parse_script("{\"type\":\"clear\"}\n{\"type\":\"dance\"}\n").unwrap_err();
        assert_eq!(err.to_string(), "invalid script entry on line 2");
    }

    #[test]
    fn step_descriptions() {
        let steps = parse_script(SCRIPT).unwrap();
        let described: Vec<String> = steps.iter().map(|(_, step)| step.to_string()).collect();
        assert_eq!(
            described,
            vec![
                "stationary activity (high confidence)",
                "null notification",
                "walking activity (low confidence)",
                "filter low",
                "filter low",
                "clear",
                "clear",
            ]
        );
    }

    #[test]
    fn replay_prints_frame_per_change() {
        assert_snapshot!(replay_script(SCRIPT), @r"
        == start
        Activity recognition
        accuracy: [all]  low  medium  high

        No activities recorded.

        == line 1: stationary activity (high confidence)
        Activity recognition
        accuracy: [all]  low  medium  high

        KIND        STARTED             CONFIDENCE
        ──────────  ──────────────────  ──────────────
        Stationary  10/26/23, 10:00 AM  high (green)

        == line 3: walking activity (low confidence)
        Activity recognition
        accuracy: [all]  low  medium  high

        KIND        STARTED             CONFIDENCE
        ──────────  ──────────────────  ──────────────
        Walking     10/26/23, 10:05 AM  low (red)
        Stationary  10/26/23, 10:00 AM  high (green)

        == line 5: filter low
        Activity recognition
        accuracy: all  [low]  medium  high

        KIND        STARTED             CONFIDENCE
        ──────────  ──────────────────  ──────────────
        Walking     10/26/23, 10:05 AM  low (red)

        == line 7: clear
        Activity recognition
        accuracy: all  [low]  medium  high

        No activities recorded.
        ");
    }
}
