//! Event types.
//!
//! An `Event` is a single calendar entry anchored to a point in time. Events
//! are treated as instantaneous: every event the flows create has
//! `start == end`. Whether an event lies in the past is never stored; it is
//! derived on read from a caller-supplied `now`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Opaque event identifier: a millisecond timestamp taken at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl EventId {
    /// Next id for an event created at `now`, strictly greater than `last`.
    ///
    /// Ids are monotonic, so two events created within the same millisecond
    /// still get distinct ids.
    pub fn next(now: DateTime<Utc>, last: Option<EventId>) -> TrackerResult<Self> {
        let candidate = now.timestamp_millis();
        match last {
            Some(last) if last.0 >= candidate => last.successor(),
            _ => Ok(EventId(candidate)),
        }
    }

    /// The id right after this one.
    pub fn successor(self) -> TrackerResult<Self> {
        self.0.checked_add(1).map(EventId).ok_or_else(|| {
            TrackerError::Storage(format!("no event id left after {}", self.0))
        })
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(EventId)
            .map_err(|_| TrackerError::Validation(format!("'{}' is not a valid event id", s)))
    }
}

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_location")]
    pub location: Option<String>,
    #[serde(with = "iso_millis")]
    pub start: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub end: DateTime<Utc>,
}

impl Event {
    /// Build an instantaneous event (`start == end == at`).
    ///
    /// The title is trimmed and must not be empty. Empty locations become `None`.
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        location: Option<String>,
        at: DateTime<Utc>,
    ) -> TrackerResult<Self> {
        let title = validate_title(&title.into())?;
        let at = at.trunc_subsecs(3);

        Ok(Event {
            id,
            title,
            location: normalize_location(location),
            start: at,
            end: at,
        })
    }

    /// Whether the event started before `now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.start < now
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} @ {}", self.title, location),
            None => write!(f, "{}", self.title),
        }
    }
}

/// A partial update for an existing event.
///
/// `None` leaves a field untouched. `location: Some(None)` clears the location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChanges {
    pub title: Option<String>,
    pub location: Option<Option<String>>,
}

impl EventChanges {
    /// Changes that replace both editable fields, as the edit form commits them.
    pub fn replace(title: impl Into<String>, location: Option<String>) -> Self {
        EventChanges {
            title: Some(title.into()),
            location: Some(location),
        }
    }

    /// Merge into a copy of `event`, validating the result.
    pub(crate) fn apply_to(&self, event: &Event) -> TrackerResult<Event> {
        let mut updated = event.clone();

        if let Some(title) = &self.title {
            updated.title = validate_title(title)?;
        }
        if let Some(location) = &self.location {
            updated.location = normalize_location(location.clone());
        }

        Ok(updated)
    }
}

/// Trim a title, rejecting blank ones.
pub fn validate_title(title: &str) -> TrackerResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation("title must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn normalize_location(location: Option<String>) -> Option<String> {
    location.filter(|l| !l.trim().is_empty())
}

fn deserialize_location<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let location = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_location(location))
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix,
/// e.g. `2025-03-20T15:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, h, 0, 0).unwrap()
    }

    #[test]
    fn test_new_event_is_instantaneous() {
        let event = Event::new(EventId(1), "Standup", Some("Room A".into()), at(9)).unwrap();
        assert_eq!(event.start, event.end);
        assert_eq!(event.location.as_deref(), Some("Room A"));
    }

    #[test]
    fn test_new_event_rejects_blank_title() {
        let result = Event::new(EventId(1), "   ", None, at(9));
        assert!(matches!(result, Err(TrackerError::Validation(_))));
    }

    #[test]
    fn test_empty_location_becomes_none() {
        let event = Event::new(EventId(1), "Lunch", Some(String::new()), at(12)).unwrap();
        assert_eq!(event.location, None);
    }

    #[test]
    fn test_is_past_is_strict() {
        let event = Event::new(EventId(1), "Lunch", None, at(12)).unwrap();
        assert!(!event.is_past(at(12)));
        assert!(event.is_past(at(12) + Duration::milliseconds(1)));
        assert!(!event.is_past(at(11)));
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let now = at(9);
        let first = EventId::next(now, None).unwrap();
        assert_eq!(first.0, now.timestamp_millis());

        let second = EventId::next(now, Some(first)).unwrap();
        assert_eq!(second.0, first.0 + 1);

        let later = EventId::next(now + Duration::seconds(5), Some(second)).unwrap();
        assert_eq!(later.0, (now + Duration::seconds(5)).timestamp_millis());
    }

    #[test]
    fn test_next_id_after_max_is_an_error() {
        let result = EventId::next(at(9), Some(EventId(i64::MAX)));
        assert!(matches!(result, Err(TrackerError::Storage(_))));
        assert!(EventId(i64::MAX).successor().is_err());
    }

    #[test]
    fn test_serializes_iso_millis() {
        let event = Event::new(EventId(42), "Standup", None, at(15)).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["start"], "2025-03-20T15:00:00.000Z");
        assert_eq!(json["location"], serde_json::Value::Null);
    }

    #[test]
    fn test_deserializes_browser_shape() {
        let json = r#"{"id":1710946800000,"title":"Standup","location":"","start":"2025-03-20T15:00:00.000Z","end":"2025-03-20T15:00:00.000Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, EventId(1710946800000));
        assert_eq!(event.location, None);
        assert_eq!(event.start, at(15));
    }

    #[test]
    fn test_deserializes_missing_location() {
        let json = r#"{"id":1,"title":"Standup","start":"2025-03-20T15:00:00Z","end":"2025-03-20T15:00:00Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.location, None);
    }

    #[test]
    fn test_changes_clear_location() {
        let event = Event::new(EventId(1), "Standup", Some("Room A".into()), at(9)).unwrap();
        let changes = EventChanges {
            title: None,
            location: Some(None),
        };
        let updated = changes.apply_to(&event).unwrap();
        assert_eq!(updated.location, None);
        assert_eq!(updated.title, "Standup");
    }

    #[test]
    fn test_changes_reject_blank_title() {
        let event = Event::new(EventId(1), "Standup", None, at(9)).unwrap();
        let result = EventChanges::replace("", None).apply_to(&event);
        assert!(matches!(result, Err(TrackerError::Validation(_))));
    }

    #[test]
    fn test_event_id_from_str() {
        assert_eq!("17".parse::<EventId>().unwrap(), EventId(17));
        assert!("abc".parse::<EventId>().is_err());
    }
}
