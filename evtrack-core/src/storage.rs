//! Persistence backends for the event collection.
//!
//! The whole collection is stored as one JSON array under a fixed storage
//! key. `JsonFileStorage` maps the key to `<data_dir>/<key>.json`;
//! `MemoryStorage` keeps nothing across processes.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{TrackerError, TrackerResult};
use crate::event::Event;

/// Default storage key, shared with the browser front end.
pub const DEFAULT_STORAGE_KEY: &str = "events_v1";

/// A place the event collection is mirrored to.
pub trait Storage {
    /// Load the stored collection. `Ok(None)` means nothing was stored yet.
    fn load(&self) -> TrackerResult<Option<Vec<Event>>>;

    /// Replace the stored collection.
    fn save(&self, events: &[Event]) -> TrackerResult<()>;
}

/// JSON file storage at `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: &Path, key: &str) -> Self {
        JsonFileStorage {
            path: dir.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> TrackerResult<Option<Vec<Event>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let events: Vec<Event> = serde_json::from_str(&content).map_err(|e| {
            TrackerError::Storage(format!("Could not parse {}: {}", self.path.display(), e))
        })?;

        Ok(Some(events))
    }

    fn save(&self, events: &[Event]) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(events)?;

        // Write then rename, so a crash mid-write never leaves a truncated file
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

/// In-process storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with raw content, as if written by an earlier session.
    pub fn with_raw(content: impl Into<String>) -> Self {
        MemoryStorage {
            saved: Mutex::new(Some(content.into())),
        }
    }

    /// The last serialized collection, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        // The slot holds a complete string or nothing, so a poisoned lock is still usable
        self.saved.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> TrackerResult<Option<Vec<Event>>> {
        match self.slot().as_deref() {
            Some(content) => Ok(Some(serde_json::from_str(content)?)),
            None => Ok(None),
        }
    }

    fn save(&self, events: &[Event]) -> TrackerResult<()> {
        let content = serde_json::to_string(events)?;
        *self.slot() = Some(content);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn load(&self) -> TrackerResult<Option<Vec<Event>>> {
        (**self).load()
    }

    fn save(&self, events: &[Event]) -> TrackerResult<()> {
        (**self).save(events)
    }
}
