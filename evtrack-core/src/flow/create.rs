//! Creation flow: `Idle -> Collecting(date) -> Idle`.

use chrono::{DateTime, Utc};

use crate::error::TrackerResult;
use crate::event::Event;
use crate::storage::Storage;
use crate::store::EventStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreationFlow {
    #[default]
    Idle,
    /// A slot was selected; the dialog is collecting title and location.
    Collecting { date: DateTime<Utc> },
}

impl CreationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user picked a calendar slot. Re-selecting replaces the date.
    pub fn select_slot(&mut self, date: DateTime<Utc>) {
        *self = CreationFlow::Collecting { date };
    }

    pub fn selected_date(&self) -> Option<DateTime<Utc>> {
        match self {
            CreationFlow::Idle => None,
            CreationFlow::Collecting { date } => Some(*date),
        }
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self, CreationFlow::Collecting { .. })
    }

    /// Whether the save action should be enabled for this title.
    pub fn can_save(title: &str) -> bool {
        !title.trim().is_empty()
    }

    /// Save the collected event on the selected date.
    ///
    /// With no slot selected the event lands on `now`. A blank title leaves
    /// the flow open so the user can fix it; success closes it.
    pub fn confirm<'s, S: Storage>(
        &mut self,
        store: &'s mut EventStore<S>,
        title: &str,
        location: Option<String>,
        now: DateTime<Utc>,
    ) -> TrackerResult<&'s Event> {
        let date = self.selected_date().unwrap_or(now);
        let event = store.create(title, location, date, now)?;
        *self = CreationFlow::Idle;
        Ok(event)
    }

    /// Close the dialog, discarding input.
    pub fn cancel(&mut self) {
        *self = CreationFlow::Idle;
    }
}
