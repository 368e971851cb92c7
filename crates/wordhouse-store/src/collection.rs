//! Generic in-memory document collection.

use crate::{StoreError, StoreResult};
use dashmap::DashMap;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::hash::Hash;

/// A document kind storable in a [`Collection`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// The id type for this kind.
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;

    /// Collection name used in errors and logs.
    const KIND: &'static str;

    /// Returns the document id.
    fn id(&self) -> Self::Id;
}

/// A concurrent in-memory collection of one document kind.
///
/// Single-document operations are atomic (the map locks one entry at a
/// time); listings operate on a point-in-time snapshot.
pub struct Collection<T: Entity> {
    docs: DashMap<T::Id, T>,
}

impl<T: Entity> Collection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }

    /// Inserts a document, returning a copy of what was stored.
    pub fn insert(&self, doc: T) -> T {
        self.docs.insert(doc.id(), doc.clone());
        doc
    }

    /// Fetches a document by id.
    pub fn get(&self, id: &T::Id) -> StoreResult<T> {
        self.docs
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    /// Mutates a document in place and returns the updated copy.
    ///
    /// The closure runs under the entry lock, so concurrent updates to the
    /// same document serialize.
    pub fn update(&self, id: &T::Id, f: impl FnOnce(&mut T)) -> StoreResult<T> {
        let mut entry = self
            .docs
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
        f(entry.value_mut());
        Ok(entry.value().clone())
    }

    /// Removes a document, returning it.
    pub fn remove(&self, id: &T::Id) -> StoreResult<T> {
        self.docs
            .remove(id)
            .map(|(_, doc)| doc)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    /// Returns a snapshot of every document, unordered.
    pub fn list(&self) -> Vec<T> {
        self.docs.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Returns every document sorted by `cmp`.
    pub fn sorted_by(&self, cmp: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
        let mut docs = self.list();
        docs.sort_by(cmp);
        docs
    }

    /// Returns documents matching `pred`, sorted by `cmp`.
    pub fn filter_sorted(
        &self,
        pred: impl FnMut(&T) -> bool,
        cmp: impl FnMut(&T, &T) -> Ordering,
    ) -> Vec<T> {
        let mut docs: Vec<T> = self.list().into_iter().filter(pred).collect();
        docs.sort_by(cmp);
        docs
    }

    /// Returns the distinct non-empty values of a field, sorted.
    pub fn distinct(&self, field: impl Fn(&T) -> Option<String>) -> Vec<String> {
        let values: BTreeSet<String> = self
            .docs
            .iter()
            .filter_map(|d| field(d.value()))
            .filter(|v| !v.is_empty())
            .collect();
        values.into_iter().collect()
    }

    /// Returns the number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Removes every document.
    pub fn clear(&self) {
        self.docs.clear();
    }
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

mod kinds {
    use super::Entity;
    use wordhouse_core::{
        Blog, BlogId, ChatSession, ChatSessionId, Devotional, DevotionalId, Event, EventId,
        RadioSlot, RadioSlotId, Sermon, SermonId, Subscriber, SubscriberId,
    };

    macro_rules! entity {
        ($ty:ty, $id:ty, $kind:literal) => {
            impl Entity for $ty {
                type Id = $id;
                const KIND: &'static str = $kind;

                fn id(&self) -> Self::Id {
                    self.id
                }
            }
        };
    }

    entity!(Sermon, SermonId, "sermon");
    entity!(Event, EventId, "event");
    entity!(Devotional, DevotionalId, "devotional");
    entity!(Blog, BlogId, "blog");
    entity!(RadioSlot, RadioSlotId, "radio slot");
    entity!(ChatSession, ChatSessionId, "chat session");
    entity!(Subscriber, SubscriberId, "subscriber");
}
