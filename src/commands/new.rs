use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use dialoguer::Input;
use evtrack_core::EventStore;
use evtrack_core::flow::CreationFlow;
use evtrack_core::storage::Storage;
use owo_colors::OwoColorize;

use crate::dates::{parse_day, slot_for_day};

pub fn run<S: Storage>(
    store: &mut EventStore<S>,
    title: Option<String>,
    date: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let interactive = title.is_none() || date.is_none();
    let today = Local::now().date_naive();

    // --- Day ---
    let day = match date {
        Some(d) => parse_day(&d, today)?,
        None if interactive => prompt_day(today)?,
        None => today,
    };

    let mut flow = CreationFlow::new();
    flow.select_slot(slot_for_day(day));

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .validate_with(|input: &String| {
                if CreationFlow::can_save(input) {
                    Ok(())
                } else {
                    Err("A title is required")
                }
            })
            .interact_text()?,
    };

    // --- Location ---
    let location = if let Some(loc) = location {
        Some(loc)
    } else if interactive {
        let loc: String = Input::new()
            .with_prompt("  Where? (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        Some(loc)
    } else {
        None
    };

    let event = flow.confirm(store, &title, location, Utc::now())?;

    if interactive {
        println!();
    }
    println!(
        "{} {}",
        format!("  Created: {}", event).green(),
        format!("#{}", event.id).dimmed()
    );

    Ok(())
}

/// Prompt for the day, retrying on parse errors.
fn prompt_day(today: NaiveDate) -> Result<NaiveDate> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Which day? (today)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;

        match parse_day(&input, today) {
            Ok(day) => return Ok(day),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::local_day;
    use evtrack_core::storage::MemoryStorage;

    #[test]
    fn test_non_interactive_create() {
        let mut store = EventStore::open(MemoryStorage::new());

        run(
            &mut store,
            Some("Standup".into()),
            Some("2030-01-15".into()),
            Some("Room A".into()),
        )
        .unwrap();

        let event = &store.list()[0];
        assert_eq!(event.title, "Standup");
        assert_eq!(event.location.as_deref(), Some("Room A"));
        assert_eq!(local_day(event.start), NaiveDate::from_ymd_opt(2030, 1, 15).unwrap());
        assert_eq!(event.start, event.end);
    }

    #[test]
    fn test_non_interactive_blank_title_fails() {
        let mut store = EventStore::open(MemoryStorage::new());

        let result = run(&mut store, Some("  ".into()), Some("today".into()), None);
        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
