//! The event store.
//!
//! `EventStore` exclusively owns the event collection and mirrors it to its
//! `Storage` after every successful mutation. Storage failures never reach
//! the caller: they are logged and the in-memory collection stays
//! authoritative.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{TrackerError, TrackerResult};
use crate::event::{Event, EventChanges, EventId, validate_title};
use crate::storage::Storage;

pub struct EventStore<S: Storage> {
    events: Vec<Event>,
    storage: S,
}

impl<S: Storage> EventStore<S> {
    /// Open a store over `storage`, loading whatever it holds.
    ///
    /// Missing or corrupt data yields an empty store.
    pub fn open(storage: S) -> Self {
        let events = match storage.load() {
            Ok(Some(events)) => sanitize_loaded(events),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load events, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = events.len(), "opened event store");
        EventStore { events, storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All events in insertion order.
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event.
    ///
    /// Fails without touching the store if the title is blank. An event
    /// whose id is already taken gets the id after the largest stored one.
    /// Returns the stored id.
    pub fn add(&mut self, mut event: Event) -> TrackerResult<EventId> {
        event.title = validate_title(&event.title)?;

        if let Some(last) = self.last_id().filter(|_| self.get(event.id).is_some()) {
            let fresh = last.successor()?;
            tracing::debug!(old = %event.id, new = %fresh, "reassigning duplicate event id");
            event.id = fresh;
        }

        let id = event.id;
        self.events.push(event);
        tracing::debug!(%id, "added event");
        self.persist();

        Ok(id)
    }

    /// Create and append an instantaneous event at `at`, stamped with an id
    /// derived from `now`.
    pub fn create(
        &mut self,
        title: &str,
        location: Option<String>,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> TrackerResult<&Event> {
        let id = EventId::next(now, self.last_id())?;
        let event = Event::new(id, title, location, at)?;
        let id = self.add(event)?;

        self.get(id).ok_or(TrackerError::NotFound(id))
    }

    /// Merge `changes` into the event with `id`.
    ///
    /// A missing id or an invalid merge leaves the store unchanged.
    pub fn update(&mut self, id: EventId, changes: &EventChanges) -> TrackerResult<&Event> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(TrackerError::NotFound(id))?;

        let updated = changes.apply_to(&self.events[index])?;

        if updated != self.events[index] {
            self.events[index] = updated;
            tracing::debug!(%id, "updated event");
            self.persist();
        }

        Ok(&self.events[index])
    }

    /// Delete the event with `id`, if present.
    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        let removed = self.events.remove(index);
        tracing::debug!(%id, "removed event");
        self.persist();

        Some(removed)
    }

    fn last_id(&self) -> Option<EventId> {
        self.events.iter().map(|e| e.id).max()
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.events) {
            tracing::warn!(error = %e, "could not persist events");
        }
    }
}

/// Drop loaded events that break store invariants: blank titles and
/// repeated ids (the first occurrence wins). Order is preserved.
fn sanitize_loaded(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::new();
    let total = events.len();

    let valid: Vec<Event> = events
        .into_iter()
        .filter(|e| !e.title.trim().is_empty())
        .filter(|e| seen.insert(e.id))
        .collect();

    if valid.len() != total {
        tracing::warn!(dropped = total - valid.len(), "dropped invalid stored events");
    }
    valid
}
