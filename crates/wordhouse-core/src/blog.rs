//! Blog posts with unique-visitor counting.

use crate::BlogId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post.
///
/// `unique_ips` is a deduplicated set of caller network addresses, appended
/// to as a side effect of fetching the post by id. The set is the post's
/// view counter; reads of a single post are deliberately not pure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    /// Unique identifier.
    pub id: BlogId,

    /// Post title.
    pub title: String,

    /// Category label.
    pub category: Option<String>,

    /// Header image URL.
    pub image: Option<String>,

    /// Post body.
    pub body: Option<String>,

    /// Author name.
    pub author: Option<String>,

    /// Publication date; defaults to the creation time.
    pub date: DateTime<Utc>,

    /// Deduplicated caller addresses that have viewed this post.
    #[serde(default)]
    pub unique_ips: Vec<String>,
}

impl Blog {
    /// Records a view from `addr`, deduplicated.
    ///
    /// Returns true if the address had not been seen before.
    pub fn record_view(&mut self, addr: &str) -> bool {
        if self.unique_ips.iter().any(|ip| ip == addr) {
            false
        } else {
            self.unique_ips.push(addr.to_string());
            true
        }
    }

    /// Returns the unique-visitor count.
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.unique_ips.len()
    }
}
