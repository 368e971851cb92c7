//! Sermon records.
//!
//! A sermon is the one document kind that owns externally stored binary
//! assets: a thumbnail image and an audio recording. Each slot holds the
//! opaque reference returned by the object store, or is empty. A non-empty
//! slot always corresponds to a store operation that succeeded; the file
//! lifecycle layer maintains that invariant across replaces and deletes.

use crate::SermonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sermon record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sermon {
    /// Unique sermon identifier.
    pub id: SermonId,

    /// Sermon title.
    pub title: String,

    /// Date the sermon was delivered.
    pub date: DateTime<Utc>,

    /// Speaker name.
    pub speaker: Option<String>,

    /// Series the sermon belongs to.
    pub series: Option<String>,

    /// Object reference for the thumbnail image, if one was uploaded.
    pub thumbnail: Option<String>,

    /// Object reference for the audio recording, if one was uploaded.
    pub audio: Option<String>,
}

impl Sermon {
    /// Returns the non-empty file references held by this record.
    ///
    /// Used by cascade delete: every reference yielded here must be released
    /// when the record is removed.
    pub fn file_references(&self) -> impl Iterator<Item = &str> {
        self.thumbnail
            .as_deref()
            .into_iter()
            .chain(self.audio.as_deref())
            .filter(|r| !r.is_empty())
    }
}
