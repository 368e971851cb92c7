//! Chat sessions for live radio broadcasts.
//!
//! Comments are embedded in the session document in arrival order; clients
//! poll for them, there is no push delivery.

use crate::ChatSessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatComment {
    /// Display name of the commenter.
    pub name: Option<String>,

    /// Comment text.
    pub comment: Option<String>,

    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// A chat session bounded to a broadcast window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique identifier.
    pub id: ChatSessionId,

    /// When the session opens.
    pub start_time: DateTime<Utc>,

    /// When the session closes.
    pub end_time: DateTime<Utc>,

    /// Comments in arrival order.
    #[serde(default)]
    pub comments: Vec<ChatComment>,

    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Creates a session for the given window.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: ChatSessionId::new(),
            start_time,
            end_time,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Appends a comment stamped now.
    pub fn add_comment(&mut self, name: Option<String>, comment: Option<String>) {
        self.comments.push(ChatComment {
            name,
            comment,
            created_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_keep_arrival_order() {
        let now = Utc::now();
        let mut session = ChatSession::new(now, now + chrono::Duration::hours(1));
        session.add_comment(Some("Ada".into()), Some("first".into()));
        session.add_comment(Some("Grace".into()), Some("second".into()));

        let texts: Vec<_> = session
            .comments
            .iter()
            .filter_map(|c| c.comment.as_deref())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
