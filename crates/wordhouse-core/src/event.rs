//! Event records.

use crate::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled church event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,

    /// Event title.
    pub title: String,

    /// Venue description.
    pub venue: Option<String>,

    /// Promotional image URL.
    pub image: Option<String>,

    /// First day of the event.
    pub start_date: DateTime<Utc>,

    /// Last day, for multi-day events.
    pub end_date: Option<DateTime<Utc>>,

    /// Free-text time description (e.g. "10:00 AM").
    pub time: Option<String>,

    /// Event description.
    pub description: Option<String>,

    /// External registration link.
    pub registration_link: Option<String>,

    /// Whether the event is televised.
    pub televised: Option<bool>,

    /// Stream link for televised events.
    pub televised_link: Option<String>,
}

impl Event {
    /// Returns true if the event is still upcoming or running at `today`.
    ///
    /// An event counts when its start date is `today` or later, or when it
    /// carries an end date that is `today` or later.
    pub fn is_current(&self, today: DateTime<Utc>) -> bool {
        self.start_date >= today || self.end_date.is_some_and(|end| end >= today)
    }
}
