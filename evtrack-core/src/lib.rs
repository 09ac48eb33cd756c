//! Core types for evtrack.
//!
//! This crate provides everything the CLI and the server share:
//! - `Event` and `EventStore` for the in-memory collection
//! - `filter` for past/upcoming views computed against an explicit `now`
//! - `flow` for the create and edit/delete dialogs
//! - `storage` for mirroring the collection to disk

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod flow;
pub mod storage;
pub mod store;
pub mod style;

pub use error::{TrackerError, TrackerResult};
pub use event::{Event, EventChanges, EventId};
pub use filter::{Filter, filter_events};
pub use store::EventStore;
pub use style::EventStyle;
