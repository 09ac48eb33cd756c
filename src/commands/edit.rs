use anyhow::Result;
use dialoguer::Input;
use evtrack_core::flow::{EditFlow, EditOutcome};
use evtrack_core::storage::Storage;
use evtrack_core::{EventId, EventStore};
use owo_colors::OwoColorize;

pub fn run<S: Storage>(
    store: &mut EventStore<S>,
    id: EventId,
    title: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let event = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Event #{} not found", id))?;

    let mut flow = EditFlow::new();
    flow.begin(event);

    let interactive = title.is_none() && location.is_none();

    if let Some(form) = flow.form_mut() {
        if interactive {
            form.title = Input::<String>::new()
                .with_prompt("  Title")
                .with_initial_text(form.title.clone())
                .validate_with(|input: &String| {
                    if input.trim().is_empty() {
                        Err("A title is required")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;

            form.location = Input::<String>::new()
                .with_prompt("  Where? (skip)")
                .with_initial_text(form.location.clone())
                .allow_empty(true)
                .interact_text()?;
        } else {
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(location) = location {
                form.location = location;
            }
        }
    }

    match flow.save(store)? {
        Some(EditOutcome::Saved(event)) => {
            if interactive {
                println!();
            }
            println!("{}", format!("  Updated: {}", event).yellow());
        }
        Some(EditOutcome::Stale(id)) => {
            println!("{}", format!("  Event #{} no longer exists", id).dimmed());
        }
        Some(EditOutcome::Deleted(_)) | None => {}
    }

    Ok(())
}
