//! TUI rendering for evtrack types.
//!
//! Extension traits that add colored terminal rendering to evtrack-core
//! types using owo_colors. Event colors come from the core style hook so
//! the terminal and the browser agree on what "past" looks like.

use chrono::{DateTime, Local, Utc};
use evtrack_core::{Event, EventStyle, Filter};
use owo_colors::OwoColorize;

/// Rendering that depends on the current time.
pub trait RenderAt {
    fn render_at(&self, now: DateTime<Utc>) -> String;
}

impl RenderAt for Event {
    fn render_at(&self, now: DateTime<Utc>) -> String {
        let (r, g, b) = EventStyle::for_event(self, now).rgb;
        let time = self.start.with_timezone(&Local).format("%H:%M").to_string();
        let id = format!("#{}", self.id);

        let mut line = format!("{:>7} {}", time.dimmed(), self.title.truecolor(r, g, b));
        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
        }
        line.push_str(&format!(" {}", id.dimmed()));
        line
    }
}

/// Plain rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Filter {
    fn render(&self) -> String {
        match self {
            Filter::All => "events".to_string(),
            Filter::Past => "past events".to_string(),
            Filter::Upcoming => "upcoming events".to_string(),
        }
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use evtrack_core::EventId;

    #[test]
    fn test_event_line_contains_fields() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let event = Event::new(EventId(7), "Standup", Some("Room A".into()), now).unwrap();

        let line = event.render_at(now);
        assert!(line.contains("Standup"));
        assert!(line.contains("@ Room A"));
        assert!(line.contains("#7"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 3), "events");
    }
}
