//! Interactive flows over the event store.
//!
//! A flow is a short-lived sequence bounded by a dialog opening and closing.
//! Flows hold no store of their own: the store is passed into every
//! committing operation.

mod create;
mod edit;

pub use create::CreationFlow;
pub use edit::{EditFlow, EditForm, EditOutcome};
