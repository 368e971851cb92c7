//! Tri-state fields for partial updates.
//!
//! A JSON update body distinguishes three states per field: the key is absent
//! (leave the stored value alone), the key is `null` (clear the value), or the
//! key carries a value (set it). `Option<T>` can only express two of those, so
//! update request types use [`Patch<T>`] with `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

/// A field in a partial-update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was omitted: keep the stored value.
    Keep,
    /// Field was explicitly `null`: clear the stored value.
    Clear,
    /// Field carried a value: replace the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns true if the field was omitted.
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Returns true if the field was explicitly cleared.
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }

    /// Returns the value if one was provided.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Applies the patch to an optional stored field.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(v) => *slot = Some(v),
        }
    }

    /// Applies the patch to a required stored field.
    ///
    /// `Clear` is ignored here; callers that want to reject an explicit null
    /// on a required field check [`Patch::is_clear`] during validation.
    pub fn apply_to_required(self, slot: &mut T) {
        if let Self::Set(v) = self {
            *slot = v;
        }
    }
}

// Keep is the default for any T, so no T: Default bound.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A present key deserializes here: null becomes Clear, anything else
        // Set. An absent key never reaches this impl and falls back to the
        // serde(default) of Keep.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Self::Set(v),
            None => Self::Clear,
        })
    }
}
