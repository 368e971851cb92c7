//! Devotional entries.

use crate::DevotionalId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A daily devotional entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Devotional {
    /// Unique identifier.
    pub id: DevotionalId,

    /// Publication date; defaults to the creation time.
    pub date: DateTime<Utc>,

    /// Devotional topic.
    pub topic: Option<String>,

    /// Speaker or author.
    pub speaker: Option<String>,

    /// The devotional text.
    pub body: Option<String>,
}

impl Devotional {
    /// Creates a new entry dated now.
    pub fn new(topic: Option<String>, speaker: Option<String>, body: Option<String>) -> Self {
        Self {
            id: DevotionalId::new(),
            date: Utc::now(),
            topic,
            speaker,
            body,
        }
    }
}
