use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique key for a topic (e.g. `"hooks"`).
///
/// Any string is a valid key; lookups for ids that were never recorded
/// fall back to defaults rather than failing.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new `TopicId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({:?})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TopicId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for TopicId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TopicId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_topic_id_display() {
        let id = TopicId::new("hooks");
        assert_eq!(id.to_string(), "hooks");
        assert_eq!(format!("{id:?}"), "TopicId(\"hooks\")");
    }

    #[test]
    fn test_topic_id_accepts_anything() {
        let id = TopicId::from("");
        assert_eq!(id.as_str(), "");
        let id = TopicId::from(String::from("context api / v2"));
        assert_eq!(id, TopicId::new("context api / v2"));
    }

    #[test]
    fn test_topic_id_borrows_as_str_for_lookups() {
        let mut set = BTreeSet::new();
        set.insert(TopicId::new("forms"));
        assert!(set.contains("forms"));
        assert!(!set.contains("hooks"));
    }
}
