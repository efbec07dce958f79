//! Event sources: the boundary to the motion service.

use std::io::BufRead;
use std::ops::ControlFlow;

use crate::event::RawActivity;

/// Callback receiving notifications. `None` is a null notification.
///
/// Returning [`ControlFlow::Break`] stops delivery, as if
/// [`ActivitySource::stop_updates`] had been called.
pub type ActivityHandler<'a> = dyn FnMut(Option<RawActivity>) -> ControlFlow<()> + 'a;

/// A provider of raw activity notifications.
pub trait ActivitySource {
    /// Whether the device can deliver activity data at all.
    fn is_available(&self) -> bool;

    /// Delivers notifications to `handler` until the source runs dry or is stopped.
    fn start_updates(&mut self, handler: &mut ActivityHandler<'_>);

    /// Stops delivery. Notifications already delivered are not retracted.
    fn stop_updates(&mut self);
}

/// Replays a recorded feed of JSON lines.
///
/// Each line is a [`RawActivity`] object or `null`. Blank lines are skipped;
/// malformed lines are logged and dropped.
pub struct ReplaySource<R> {
    reader: R,
    line_number: usize,
    stopped: bool,
    exhausted: bool,
}

impl<R: BufRead> ReplaySource<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            stopped: false,
            exhausted: false,
        }
    }

    /// Whether every line of the feed has been read.
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Reads raw bytes so invalid UTF-8 surfaces as a malformed line, not a read error.
    fn next_line(&mut self) -> Option<Vec<u8>> {
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                Some(line)
            }
            Err(e) => {
                tracing::warn!(line = self.line_number + 1, error = %e, "failed to read activity feed");
                None
            }
        }
    }
}

impl<R: BufRead> ActivitySource for ReplaySource<R> {
    fn is_available(&self) -> bool {
        true
    }

    fn start_updates(&mut self, handler: &mut ActivityHandler<'_>) {
        self.stopped = false;

        while !self.stopped {
            let Some(line) = self.next_line() else {
                self.exhausted = true;
                break;
            };
            let line = line.trim_ascii();
            if line.is_empty() {
                continue;
            }

            let notification = match serde_json::from_slice::<Option<RawActivity>>(line) {
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!(line = self.line_number, error = %e, "skipping malformed activity notification");
                    continue;
                }
            };

            if handler(notification).is_break() {
                self.stop_updates();
            }
        }
    }

    fn stop_updates(&mut self) {
        tracing::debug!(line = self.line_number, "stopping activity updates");
        self.stopped = true;
    }
}
