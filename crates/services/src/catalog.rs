use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;
use tutor_core::model::{Topic, TopicDraft, TopicId};

use crate::error::CatalogError;

const BUILTIN_TOPICS: &str = include_str!("../content/topics.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    topics: Vec<TopicDraft>,
}

/// Ordered, read-only list of topics and their quiz questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Build a catalog from validated topics, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for no topics and
    /// `CatalogError::DuplicateTopic` if an id appears twice.
    pub fn new(topics: Vec<Topic>) -> Result<Self, CatalogError> {
        if topics.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(topics.len());
        for topic in &topics {
            if !seen.insert(topic.id()) {
                return Err(CatalogError::DuplicateTopic(topic.id().clone()));
            }
        }
        Ok(Self { topics })
    }

    /// Validate drafts and build a catalog from them.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidTopic` for the first draft that fails
    /// validation, plus the errors of [`TopicCatalog::new`].
    pub fn from_drafts(drafts: Vec<TopicDraft>) -> Result<Self, CatalogError> {
        let topics = drafts
            .into_iter()
            .enumerate()
            .map(|(position, draft)| {
                let id = draft.id.clone();
                draft
                    .validate()
                    .map_err(|source| CatalogError::InvalidTopic { position, id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(topics)
    }

    /// Parse a catalog from JSON of the form `{ "topics": [ ... ] }`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input, plus the errors of
    /// [`TopicCatalog::from_drafts`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let catalog = Self::from_drafts(file.topics)?;
        debug!(topics = catalog.len(), "topic catalog loaded");
        Ok(catalog)
    }

    /// The topics bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` only if the bundled content is broken.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_TOPICS)
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn get(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id() == id)
    }

    /// Look up a topic by its 1-based position in the catalog.
    #[must_use]
    pub fn nth(&self, position: usize) -> Option<&Topic> {
        position
            .checked_sub(1)
            .and_then(|index| self.topics.get(index))
    }

    pub fn ids(&self) -> impl Iterator<Item = &TopicId> {
        self.topics.iter().map(Topic::id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
