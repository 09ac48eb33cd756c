//! Per-event presentation hints keyed on past/upcoming.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Event;

/// Background colour and class name a front end applies to one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventStyle {
    pub class_name: &'static str,
    pub background_color: &'static str,
    /// The same colour as RGB components, for terminal rendering.
    #[serde(skip)]
    pub rgb: (u8, u8, u8),
}

impl EventStyle {
    pub const PAST: EventStyle = EventStyle {
        class_name: "event-past",
        background_color: "rgb(222, 105, 135)",
        rgb: (222, 105, 135),
    };

    pub const UPCOMING: EventStyle = EventStyle {
        class_name: "event-upcoming",
        background_color: "rgb(140, 189, 76)",
        rgb: (140, 189, 76),
    };

    pub fn for_event(event: &Event, now: DateTime<Utc>) -> Self {
        if event.is_past(now) {
            Self::PAST
        } else {
            Self::UPCOMING
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_style_follows_is_past() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let event = Event::new(EventId(1), "Standup", None, now).unwrap();

        assert_eq!(EventStyle::for_event(&event, now), EventStyle::UPCOMING);
        assert_eq!(
            EventStyle::for_event(&event, now + Duration::minutes(1)),
            EventStyle::PAST
        );
    }

    #[test]
    fn test_style_serializes_without_rgb() {
        let json = serde_json::to_value(EventStyle::PAST).unwrap();
        assert_eq!(json["class_name"], "event-past");
        assert_eq!(json["background_color"], "rgb(222, 105, 135)");
        assert!(json.get("rgb").is_none());
    }
}
