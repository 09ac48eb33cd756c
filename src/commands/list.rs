use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use evtrack_core::storage::Storage;
use evtrack_core::{Event, EventStore, Filter, filter_events};
use owo_colors::OwoColorize;

use crate::dates::{format_date_label, local_day};
use crate::render::{Render, RenderAt, pluralize};

pub fn run<S: Storage>(store: &EventStore<S>, filter: Filter) -> Result<()> {
    let now = Utc::now();
    let events = filter_events(store.list(), filter, now);

    if events.is_empty() {
        println!("{}", format!("No {} found", filter.render()).dimmed());
        return Ok(());
    }

    for line in render_grouped(&events, now) {
        println!("{}", line);
    }

    println!();
    println!(
        "{}",
        format!("{} {}", events.len(), pluralize("event", events.len())).dimmed()
    );

    Ok(())
}

/// Render events grouped under day headers, earliest day first.
fn render_grouped(events: &[&Event], now: DateTime<Utc>) -> Vec<String> {
    let today = now.with_timezone(&Local).date_naive();

    // Stable sort keeps store order among events on the same instant
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.start);

    let mut lines = Vec::new();
    let mut current_day = None;

    for event in sorted {
        let day = local_day(event.start);

        if current_day != Some(day) {
            if current_day.is_some() {
                lines.push(String::new());
            }
            lines.push(format_date_label(day, today).bold().to_string());
            current_day = Some(day);
        }

        lines.push(format!("  {}", event.render_at(now)));
    }

    lines
}
