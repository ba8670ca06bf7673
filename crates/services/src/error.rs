//! Shared error types for the services crate.

use thiserror::Error;

use tutor_core::model::{QuizConfigError, TopicError, TopicId};

/// Errors emitted while loading a `TopicCatalog`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no topics")]
    Empty,
    #[error("duplicate topic id: {0}")]
    DuplicateTopic(TopicId),
    #[error("topic {position} ({id}) is invalid: {source}")]
    InvalidTopic {
        position: usize,
        id: String,
        #[source]
        source: TopicError,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors emitted when opening a topic quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("unknown topic: {0}")]
    UnknownTopic(TopicId),
    #[error(transparent)]
    Config(#[from] QuizConfigError),
}
