//! Opaque object references.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// An opaque handle to a stored binary object.
///
/// The backend hands one out on store; records persist it as a string.
/// Historically records have held the handle in more than one shape: a bare
/// identifier, or a full download URL with the identifier in an `id` query
/// parameter. [`ObjectRef::parse`] accepts both; anything else is treated as
/// "nothing to delete" rather than an error, because the caller is clearing
/// the record slot either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(String);

impl ObjectRef {
    /// Wraps a backend-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the reference, returning the identifier.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Extracts a reference from a stored slot value.
    ///
    /// Accepted shapes, in order:
    /// - an absolute URL carrying an `id` query parameter,
    /// - a relative string with an `id=` query parameter,
    /// - a bare identifier (alphanumeric plus `-`, `_`, `.`).
    ///
    /// Empty and unparsable values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(url) = Url::parse(raw) {
            return url
                .query_pairs()
                .find(|(key, _)| key == "id")
                .map(|(_, value)| Self::new(value.into_owned()));
        }

        if Self::is_bare_id(raw) {
            return Some(Self::new(raw));
        }

        // Relative legacy form: "uc?export=download&id=XYZ" without a scheme.
        raw.match_indices("id=")
            .find(|(pos, _)| {
                *pos == 0 || matches!(raw.as_bytes()[pos - 1], b'?' | b'&')
            })
            .map(|(pos, _)| {
                let tail = &raw[pos + 3..];
                let id = tail.split('&').next().unwrap_or(tail);
                Self::new(id)
            })
            .filter(|r| !r.0.is_empty())
    }

    fn is_bare_id(raw: &str) -> bool {
        raw.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_identifier() {
        let r = ObjectRef::parse("1AbC-xyz_9.bin").unwrap();
        assert_eq!(r.as_str(), "1AbC-xyz_9.bin");
    }

    #[test]
    fn parses_id_from_absolute_url() {
        let r = ObjectRef::parse("https://drive.example.com/uc?export=download&id=F1LE").unwrap();
        assert_eq!(r.as_str(), "F1LE");
    }

    #[test]
    fn parses_id_from_relative_query() {
        let r = ObjectRef::parse("uc?export=download&id=F1LE").unwrap();
        assert_eq!(r.as_str(), "F1LE");
    }

    #[test]
    fn empty_value_is_nothing_to_delete() {
        assert!(ObjectRef::parse("").is_none());
        assert!(ObjectRef::parse("   ").is_none());
    }

    #[test]
    fn url_without_id_param_is_nothing_to_delete() {
        assert!(ObjectRef::parse("https://drive.example.com/uc?export=download").is_none());
    }

    #[test]
    fn unparsable_garbage_is_nothing_to_delete() {
        assert!(ObjectRef::parse("no such file!").is_none());
    }

    #[test]
    fn id_substring_inside_other_param_does_not_match() {
        assert!(ObjectRef::parse("uc?valid=true").is_none());
    }
}
