//! Mailing-list subscribers.

use crate::SubscriberId;
use serde::{Deserialize, Serialize};

/// A mailing-list subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    /// Unique identifier.
    pub id: SubscriberId,

    /// Subscriber display name, substituted into broadcast placeholders.
    pub name: String,

    /// Destination address.
    pub email: String,
}

impl Subscriber {
    /// Creates a new subscriber.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: SubscriberId::new(),
            name: name.into(),
            email: email.into(),
        }
    }
}
