use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};
use tutor_core::model::{ProgressState, Score, TopicId};

/// Session-wide completion and score tracking shared by every topic view.
///
/// Cloning yields another handle to the same state. Each operation takes the
/// lock once, so readers never see a half-applied update.
#[derive(Clone, Default)]
pub struct ProgressStore {
    state: Arc<RwLock<ProgressState>>,
}

impl ProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a topic complete. Repeated calls leave the state unchanged.
    ///
    /// Returns `true` only for the call that first completed the topic.
    pub fn mark_topic_complete(&self, topic: &TopicId) -> bool {
        let inserted = self.write().mark_complete(topic);
        if inserted {
            info!(topic = %topic, "topic completed");
        } else {
            debug!(topic = %topic, "topic already complete");
        }
        inserted
    }

    #[must_use]
    pub fn is_topic_completed(&self, topic: &TopicId) -> bool {
        self.read().is_completed(topic.as_str())
    }

    /// Store the latest quiz score for a topic; the previous score is discarded.
    pub fn update_quiz_score(&self, topic: &TopicId, score: Score) {
        let previous = self.write().record_score(topic, score);
        debug!(topic = %topic, score = score.value(), previous = ?previous.map(Score::value), "quiz score updated");
    }

    /// Latest score as a plain percentage, `0` if the topic was never scored.
    ///
    /// Use [`ProgressStore::quiz_score`] to tell "never scored" from "scored 0%".
    #[must_use]
    pub fn get_quiz_score(&self, topic: &TopicId) -> u8 {
        self.quiz_score(topic).map_or(0, Score::value)
    }

    #[must_use]
    pub fn quiz_score(&self, topic: &TopicId) -> Option<Score> {
        self.read().score(topic.as_str())
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.read().completed_count()
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ProgressState {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, ProgressState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("progress lock poisoned; continuing with last written state");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProgressState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("progress lock poisoned; continuing with last written state");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("ProgressStore")
            .field("completed", &state.completed_count())
            .field("scored", &state.quiz_scores().count())
            .finish()
    }
}
