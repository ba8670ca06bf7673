use std::sync::Arc;

use tutor_core::model::{CompletionPolicy, TopicId};

use crate::Clock;
use crate::catalog::TopicCatalog;
use crate::error::QuizServiceError;
use crate::overview::ProgressOverview;
use crate::progress_store::ProgressStore;
use crate::quiz::TopicQuizService;

/// Assembles the session-scoped services handed to every topic view.
///
/// Owns the one `ProgressStore` for the session; every quiz opened here
/// shares it.
#[derive(Debug, Clone)]
pub struct TutorServices {
    catalog: Arc<TopicCatalog>,
    progress: ProgressStore,
    policy: CompletionPolicy,
    clock: Clock,
}

impl TutorServices {
    #[must_use]
    pub fn new(catalog: TopicCatalog, policy: CompletionPolicy, clock: Clock) -> Self {
        Self {
            catalog: Arc::new(catalog),
            progress: ProgressStore::new(),
            policy,
            clock,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    /// Handle to the shared progress store.
    #[must_use]
    pub fn progress(&self) -> ProgressStore {
        self.progress.clone()
    }

    #[must_use]
    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    /// Open a fresh quiz attempt for a catalog topic.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::UnknownTopic` if the id is not in the catalog.
    pub fn open_quiz(&self, topic_id: &TopicId) -> Result<TopicQuizService, QuizServiceError> {
        let topic = self
            .catalog
            .get(topic_id)
            .ok_or_else(|| QuizServiceError::UnknownTopic(topic_id.clone()))?;
        Ok(TopicQuizService::new(topic, self.progress(), self.policy)?.with_clock(self.clock))
    }

    #[must_use]
    pub fn overview(&self) -> ProgressOverview {
        ProgressOverview::build(&self.catalog, &self.progress, self.policy)
    }
}
