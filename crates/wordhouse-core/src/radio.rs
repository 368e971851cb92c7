//! Radio schedule slots.

use crate::RadioSlotId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A slot on the radio broadcast schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioSlot {
    /// Unique identifier.
    pub id: RadioSlotId,

    /// Programme name.
    pub name: String,

    /// Programme description.
    pub description: Option<String>,

    /// Cover image URL.
    pub image: Option<String>,

    /// When the programme airs.
    pub air_time: DateTime<Utc>,

    /// IANA time zone label the air time was entered in.
    pub time_zone: Option<String>,

    /// When the slot was created.
    pub created_at: DateTime<Utc>,
}
