//! Session state: the event store, the active filter and the source subscription.

use std::ops::ControlFlow;

use crate::event::{ActivityEvent, RawActivity};
use crate::source::ActivitySource;
use crate::store::{EventStore, StoreChange, SubscriptionId};
use crate::types::ConfidenceFilter;
use crate::view::project;

/// Receives activity notifications and holds what the screen shows.
#[derive(Debug, Default)]
pub struct ActivityMonitor {
    store: EventStore,
    filter: ConfidenceFilter,
    max_events: Option<usize>,
}

impl ActivityMonitor {
    pub fn new(filter: ConfidenceFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Unsubscribes from the source once the store holds `max` events.
    #[must_use]
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = Some(max);
        self
    }

    /// Subscribes to `source` and stores every notification it delivers.
    ///
    /// Returns `false`, without touching state, when the source is unavailable.
    pub fn start_monitoring<S>(&mut self, source: &mut S) -> bool
    where
        S: ActivitySource + ?Sized,
    {
        if !source.is_available() {
            tracing::warn!("activity data is not available");
            return false;
        }

        if self.max_events.is_some_and(|max| self.store.len() >= max) {
            tracing::debug!(stored = self.store.len(), "event limit already reached");
            return true;
        }

        let before = self.store.len();
        source.start_updates(&mut |notification| {
            self.receive(notification);
            match self.max_events {
                Some(max) if self.store.len() >= max => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        });
        tracing::debug!(
            received = self.store.len().saturating_sub(before),
            total = self.store.len(),
            "activity updates delivered"
        );
        true
    }

    /// Stops delivery. Stored events remain.
    pub fn stop_monitoring<S>(&mut self, source: &mut S)
    where
        S: ActivitySource + ?Sized,
    {
        source.stop_updates();
    }

    /// Classifies and stores one notification. Null notifications are ignored.
    ///
    /// Returns whether an event was stored.
    pub fn receive(&mut self, notification: Option<RawActivity>) -> bool {
        let Some(raw) = notification else {
            tracing::trace!("ignoring null activity notification");
            return false;
        };
        self.store.append(ActivityEvent::from(raw));
        true
    }

    /// The Clear action. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        self.store.clear()
    }

    /// Selects a filter. Returns whether the selection changed.
    pub fn set_filter(&mut self, filter: ConfidenceFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        tracing::debug!(from = %self.filter, to = %filter, "confidence filter changed");
        self.filter = filter;
        true
    }

    pub const fn filter(&self) -> ConfidenceFilter {
        self.filter
    }

    pub const fn store(&self) -> &EventStore {
        &self.store
    }

    /// Rows for the current filter, most recent first.
    pub fn rows(&self) -> Vec<ActivityEvent> {
        project(self.store.snapshot(), self.filter)
    }

    /// Registers an observer for store mutations.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(StoreChange, &[ActivityEvent]) + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::event::ActivityKind;
    use crate::source::{ActivityHandler, ReplaySource};
    use crate::types::Confidence;

    /// A device without an activity coprocessor.
    struct UnavailableSource {
        started: bool,
    }

    impl ActivitySource for UnavailableSource {
        fn is_available(&self) -> bool {
            false
        }

        fn start_updates(&mut self, _handler: &mut ActivityHandler<'_>) {
            self.started = true;
        }

        fn stop_updates(&mut self) {}
    }

    fn raw(minute: u32, confidence: Confidence) -> RawActivity {
        RawActivity {
            walking: true,
            ..RawActivity::new(
                Utc.with_ymd_and_hms(2023, 10, 26, 10, minute, 0).unwrap(),
                confidence,
            )
        }
    }

    const FEED: &str = r#"{"start_time":"2023-10-26T10:00:00Z","stationary":true,"confidence":"high"}
{"start_time":"2023-10-26T10:05:00Z","walking":true,"confidence":"low"}
null
{"start_time":"2023-10-26T10:07:00Z","cycling":true,"confidence":"surely"}
"#;

    #[test]
    fn monitoring_stores_feed_and_projects_rows() {
        let mut monitor = ActivityMonitor::new(ConfidenceFilter::All);
        let mut source = ReplaySource::new(Cursor::new(FEED));

        assert!(monitor.start_monitoring(&mut source));
        assert_eq!(monitor.store().len(), 3);

        let kinds: Vec<ActivityKind> = monitor.rows().iter().map(ActivityEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityKind::Cycling,
                ActivityKind::Walking,
                ActivityKind::Stationary
            ]
        );

        monitor.set_filter(ConfidenceFilter::Low);
        let rows = monitor.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind(), ActivityKind::Walking);
    }

    #[test]
    fn unavailable_source_is_not_started() {
        let mut monitor = ActivityMonitor::default();
        let mut source = UnavailableSource { started: false };

        assert!(!monitor.start_monitoring(&mut source));
        assert!(!source.started);
        assert!(monitor.store().is_empty());
        assert!(monitor.rows().is_empty());
    }

    #[test]
    fn null_notification_leaves_state_untouched() {
        let mut monitor = ActivityMonitor::default();
        let changes = Rc::new(Cell::new(0));
        let seen = Rc::clone(&changes);
        monitor.subscribe(move |_, _| seen.set(seen.get() + 1));

        assert!(!monitor.receive(None));
        assert!(monitor.store().is_empty());
        assert_eq!(changes.get(), 0);
    }

    #[test]
    fn max_events_unsubscribes_mid_feed() {
        let mut monitor = ActivityMonitor::new(ConfidenceFilter::All).with_max_events(2);
        let mut source = ReplaySource::new(Cursor::new(FEED));

        assert!(monitor.start_monitoring(&mut source));
        assert_eq!(monitor.store().len(), 2);
        assert!(!source.is_exhausted());

        monitor.stop_monitoring(&mut source);
        assert_eq!(monitor.store().len(), 2);
    }

    #[test]
    fn zero_max_events_stores_nothing() {
        let mut monitor = ActivityMonitor::default().with_max_events(0);
        let mut source = ReplaySource::new(Cursor::new(FEED));

        assert!(monitor.start_monitoring(&mut source));
        assert!(monitor.store().is_empty());
        assert!(!source.is_exhausted());
    }

    #[test]
    fn invalid_utf8_line_does_not_end_monitoring() {
        let mut feed = FEED.as_bytes().to_vec();
        feed.extend_from_slice(b"\xff\xfe garbage\n");
        feed.extend_from_slice(
            br#"{"start_time":"2023-10-26T10:09:00Z","running":true,"confidence":"high"}"#,
        );

        let mut monitor = ActivityMonitor::default();
        let mut source = ReplaySource::new(Cursor::new(feed));

        assert!(monitor.start_monitoring(&mut source));
        assert_eq!(monitor.store().len(), 4);
        assert_eq!(monitor.rows()[0].kind(), ActivityKind::Running);
    }

    #[test]
    fn clear_and_filter_are_idempotent() {
        let mut monitor = ActivityMonitor::default();
        assert!(!monitor.clear());
        assert!(!monitor.set_filter(ConfidenceFilter::All));

        monitor.receive(Some(raw(1, Confidence::Low)));
        monitor.receive(Some(raw(2, Confidence::Medium)));
        monitor.receive(Some(raw(3, Confidence::High)));

        assert!(monitor.clear());
        assert!(monitor.store().snapshot().is_empty());
        assert!(!monitor.clear());

        assert!(monitor.set_filter(ConfidenceFilter::High));
        assert!(!monitor.set_filter(ConfidenceFilter::High));
        assert_eq!(monitor.filter(), ConfidenceFilter::High);
    }

    #[test]
    fn sentinel_confidence_visible_only_under_all() {
        let mut monitor = ActivityMonitor::default();
        monitor.receive(Some(raw(1, Confidence::Unknown)));

        assert_eq!(monitor.rows().len(), 1);
        for filter in [
            ConfidenceFilter::Low,
            ConfidenceFilter::Medium,
            ConfidenceFilter::High,
        ] {
            monitor.set_filter(filter);
            assert!(monitor.rows().is_empty());
        }
    }

    #[test]
    fn observers_are_notified_on_receive_and_clear() {
        let mut monitor = ActivityMonitor::default();
        let last = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last);
        let id = monitor.subscribe(move |change, _| sink.set(Some(change)));

        monitor.receive(Some(raw(1, Confidence::Low)));
        assert_eq!(last.get(), Some(StoreChange::Appended { len: 1 }));

        monitor.clear();
        assert_eq!(last.get(), Some(StoreChange::Cleared));

        assert!(monitor.unsubscribe(id));
    }
}
