use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use evtrack_core::EventStore;
use evtrack_core::storage::Storage;

pub type SharedStorage = Arc<dyn Storage + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    storage: SharedStorage,
    // Serializes requests so a load-modify-save cycle is never interleaved
    writer: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(storage: SharedStorage) -> Self {
        AppState {
            storage,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Open the event store for one request.
    ///
    /// We reload on each request to pick up changes the CLI made to the
    /// storage file since the last one.
    pub fn store(&self) -> Result<StoreHandle<'_>> {
        let writer = self
            .writer
            .lock()
            .map_err(|_| anyhow::anyhow!("Event store lock poisoned"))?;

        Ok(StoreHandle {
            store: EventStore::open(Arc::clone(&self.storage)),
            _writer: writer,
        })
    }
}

/// A freshly loaded store, held exclusively until dropped
pub struct StoreHandle<'a> {
    store: EventStore<SharedStorage>,
    _writer: MutexGuard<'a, ()>,
}

impl Deref for StoreHandle<'_> {
    type Target = EventStore<SharedStorage>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl DerefMut for StoreHandle<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use evtrack_core::storage::JsonFileStorage;

    fn titles(store: &EventStore<SharedStorage>) -> Vec<String> {
        store.list().iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn test_requests_see_writes_from_other_processes() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(Arc::new(JsonFileStorage::new(dir.path(), "events_v1")));

        state
            .store()
            .unwrap()
            .create("From server", None, Utc::now(), Utc::now())
            .unwrap();

        // Another writer on the same file, as the CLI would be
        let mut cli = EventStore::open(JsonFileStorage::new(dir.path(), "events_v1"));
        cli.create("From CLI", None, Utc::now(), Utc::now()).unwrap();

        let mut store = state.store().unwrap();
        assert_eq!(titles(&store), ["From server", "From CLI"]);

        store
            .create("From server again", None, Utc::now(), Utc::now())
            .unwrap();
        drop(store);

        let reopened = EventStore::open(JsonFileStorage::new(dir.path(), "events_v1"));
        let persisted: Vec<_> = reopened.list().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(persisted, ["From server", "From CLI", "From server again"]);
    }

    #[test]
    fn test_failed_request_leaves_state_usable() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(Arc::new(JsonFileStorage::new(dir.path(), "events_v1")));

        assert!(state.store().unwrap().create(" ", None, Utc::now(), Utc::now()).is_err());
        assert!(state.store().unwrap().is_empty());
    }
}
