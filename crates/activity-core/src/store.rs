//! Append-only, in-memory log of received activity events.

use std::fmt;

use crate::event::ActivityEvent;

/// The mutation an observer is being notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// One event was appended; `len` is the new length.
    Appended { len: usize },
    /// All events were removed.
    Cleared,
}

/// Handle returned by [`EventStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(StoreChange, &[ActivityEvent])>;

/// Ordered, append-only sequence of events for the lifetime of a session.
///
/// Every mutation notifies all observers synchronously, with the
/// post-mutation contents, before returning. No deduplication is done:
/// events with equal start times coexist.
#[derive(Default)]
pub struct EventStore {
    events: Vec<ActivityEvent>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for EventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStore")
            .field("events", &self.events)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one event. Never fails.
    pub fn append(&mut self, event: ActivityEvent) {
        self.events.push(event);
        let len = self.events.len();
        tracing::trace!(len, kind = %event.kind(), "appended activity event");
        self.notify(StoreChange::Appended { len });
    }

    /// Removes all events. Clearing an empty store is a no-op and notifies nobody.
    ///
    /// Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        if self.events.is_empty() {
            return false;
        }
        let removed = self.events.len();
        self.events.clear();
        tracing::debug!(removed, "cleared activity events");
        self.notify(StoreChange::Cleared);
        true
    }

    /// Current contents in arrival order.
    pub fn snapshot(&self) -> &[ActivityEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Registers an observer called after every mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(StoreChange, &[ActivityEvent]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: StoreChange) {
        for (_, observer) in &mut self.observers {
            observer(change, &self.events);
        }
    }
}
