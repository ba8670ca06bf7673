use chrono::{DateTime, Utc};
use tutor_core::model::{QuizResult, Score, TopicId};

/// What happened to progress when an attempt was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub topic_id: TopicId,
    /// 1-based attempt number within this session.
    pub attempt: u32,
    pub result: QuizResult,
    pub passed: bool,
    /// True only on the attempt that first marked the topic complete.
    pub newly_completed: bool,
    pub submitted_at: DateTime<Utc>,
}

impl AttemptOutcome {
    #[must_use]
    pub fn score(&self) -> Score {
        self.result.score
    }
}

/// Result of a successful `next()` on a topic quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Moved { index: usize },
    Finished(AttemptOutcome),
}
