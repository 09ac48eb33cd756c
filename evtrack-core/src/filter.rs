//! Past/upcoming filtering.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::event::Event;

/// Which events to display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Past,
    Upcoming,
}

impl Filter {
    pub fn matches(&self, event: &Event, now: DateTime<Utc>) -> bool {
        match self {
            Filter::All => true,
            Filter::Past => event.is_past(now),
            Filter::Upcoming => !event.is_past(now),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Filter::All => "all",
            Filter::Past => "past",
            Filter::Upcoming => "upcoming",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Filter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "past" => Ok(Filter::Past),
            "upcoming" => Ok(Filter::Upcoming),
            other => Err(TrackerError::Validation(format!(
                "Unknown filter '{}'. Expected all, past or upcoming",
                other
            ))),
        }
    }
}

/// The events matching `filter` at `now`, in store order.
pub fn filter_events(events: &[Event], filter: Filter, now: DateTime<Utc>) -> Vec<&Event> {
    events.iter().filter(|e| filter.matches(e, now)).collect()
}
