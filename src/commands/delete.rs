use anyhow::Result;
use chrono::Utc;
use dialoguer::Confirm;
use evtrack_core::flow::{EditFlow, EditOutcome};
use evtrack_core::storage::Storage;
use evtrack_core::{EventId, EventStore};
use owo_colors::OwoColorize;

use crate::render::RenderAt;

pub fn run<S: Storage>(store: &mut EventStore<S>, id: EventId, force: bool) -> Result<()> {
    let event = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Event #{} not found", id))?;

    let mut flow = EditFlow::new();
    flow.begin(event);

    // Confirm unless --force
    if !force {
        println!("  {}", event.render_at(Utc::now()));
        let confirmed = Confirm::new()
            .with_prompt("Delete this event?")
            .default(false)
            .interact()?;

        if !confirmed {
            flow.cancel();
            return Ok(());
        }
    }

    if let Some(EditOutcome::Deleted(event)) = flow.delete(store) {
        println!("{}", format!("  Deleted: {}", event).red());
    }

    Ok(())
}
