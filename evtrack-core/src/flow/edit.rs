//! Edit/delete flow: `Idle -> Editing(event) -> Idle`.

use crate::error::{TrackerError, TrackerResult};
use crate::event::{Event, EventChanges, EventId};
use crate::storage::Storage;
use crate::store::EventStore;

/// Editable fields, pre-filled from the selected event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub location: String,
}

impl EditForm {
    fn to_changes(&self) -> EventChanges {
        EventChanges::replace(self.title.clone(), Some(self.location.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditFlow {
    #[default]
    Idle,
    Editing { id: EventId, form: EditForm },
}

/// How an edit session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Saved(Event),
    Deleted(Event),
    /// The event disappeared while the dialog was open.
    Stale(EventId),
}

impl EditFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for `event`, filling the form with its fields.
    pub fn begin(&mut self, event: &Event) {
        *self = EditFlow::Editing {
            id: event.id,
            form: EditForm {
                title: event.title.clone(),
                location: event.location.clone().unwrap_or_default(),
            },
        };
    }

    pub fn editing_id(&self) -> Option<EventId> {
        match self {
            EditFlow::Idle => None,
            EditFlow::Editing { id, .. } => Some(*id),
        }
    }

    pub fn form(&self) -> Option<&EditForm> {
        match self {
            EditFlow::Idle => None,
            EditFlow::Editing { form, .. } => Some(form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        match self {
            EditFlow::Idle => None,
            EditFlow::Editing { form, .. } => Some(form),
        }
    }

    /// Commit the form. Returns `Ok(None)` when no dialog is open.
    ///
    /// A blank title keeps the dialog open. A stale id closes it without
    /// touching the store.
    pub fn save<S: Storage>(
        &mut self,
        store: &mut EventStore<S>,
    ) -> TrackerResult<Option<EditOutcome>> {
        let EditFlow::Editing { id, form } = self else {
            return Ok(None);
        };
        let id = *id;

        let outcome = match store.update(id, &form.to_changes()) {
            Ok(event) => EditOutcome::Saved(event.clone()),
            Err(TrackerError::NotFound(_)) => {
                tracing::debug!(%id, "edited event no longer exists");
                EditOutcome::Stale(id)
            }
            Err(e) => return Err(e),
        };

        *self = EditFlow::Idle;
        Ok(Some(outcome))
    }

    /// Delete the event being edited and close the dialog.
    pub fn delete<S: Storage>(&mut self, store: &mut EventStore<S>) -> Option<EditOutcome> {
        let id = self.editing_id()?;
        *self = EditFlow::Idle;

        Some(match store.remove(id) {
            Some(event) => EditOutcome::Deleted(event),
            None => EditOutcome::Stale(id),
        })
    }

    pub fn cancel(&mut self) {
        *self = EditFlow::Idle;
    }
}
