use std::fmt;

use tracing::{debug, info};
use tutor_core::model::{
    Advance, CompletionPolicy, Feedback, QuizError, QuizResult, QuizSession, Topic, TopicId,
};

use super::attempt::{AttemptOutcome, QuizStep};
use crate::Clock;
use crate::error::QuizServiceError;
use crate::progress_store::ProgressStore;

//
// ─── TOPIC QUIZ ────────────────────────────────────────────────────────────────
//

/// Runs a topic's quiz and feeds submitted scores into the shared progress store.
///
/// Every submitted attempt overwrites the topic's score; attempts that reach
/// the policy's pass mark also mark the topic complete. The underlying
/// `QuizSession` never touches progress itself.
pub struct TopicQuizService {
    topic_id: TopicId,
    title: String,
    description: String,
    session: QuizSession,
    progress: ProgressStore,
    policy: CompletionPolicy,
    clock: Clock,
    attempts: Vec<AttemptOutcome>,
}

impl TopicQuizService {
    /// Open the quiz for `topic`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Config` if the topic has no questions.
    pub fn new(
        topic: &Topic,
        progress: ProgressStore,
        policy: CompletionPolicy,
    ) -> Result<Self, QuizServiceError> {
        let session = topic.start_quiz()?;
        debug!(topic = %topic.id(), questions = session.total_questions(), "quiz opened");
        Ok(Self {
            topic_id: topic.id().clone(),
            title: topic.title().to_string(),
            description: topic.description().to_string(),
            session,
            progress,
            policy,
            clock: Clock::default(),
            attempts: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Topic blurb shown under the title; may be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Read-only quiz state for rendering.
    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    #[must_use]
    pub fn attempts(&self) -> &[AttemptOutcome] {
        &self.attempts
    }

    #[must_use]
    pub fn last_attempt(&self) -> Option<&AttemptOutcome> {
        self.attempts.last()
    }

    /// # Errors
    ///
    /// See [`QuizSession::select_answer`].
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        self.session.select_answer(option)?;
        debug!(topic = %self.topic_id, index = self.session.current_index(), option, "answer selected");
        Ok(())
    }

    /// # Errors
    ///
    /// See [`QuizSession::check_answer`].
    pub fn check_answer(&mut self) -> Result<Feedback<'_>, QuizError> {
        let feedback = self.session.check_answer()?;
        debug!(topic = %self.topic_id, index = feedback.index, correct = feedback.is_correct, "answer checked");
        Ok(feedback)
    }

    /// Advance the quiz; on submission, record the score and apply the policy.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::next`].
    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        match self.session.next()? {
            Advance::Moved { index } => {
                debug!(topic = %self.topic_id, index, "moved to next question");
                Ok(QuizStep::Moved { index })
            }
            Advance::Submitted(result) => Ok(QuizStep::Finished(self.record(result))),
        }
    }

    /// # Errors
    ///
    /// See [`QuizSession::previous`].
    pub fn previous(&mut self) -> Result<usize, QuizError> {
        let index = self.session.previous()?;
        debug!(topic = %self.topic_id, index, "moved to previous question");
        Ok(index)
    }

    /// # Errors
    ///
    /// See [`QuizSession::retake`].
    pub fn retake(&mut self) -> Result<(), QuizError> {
        self.session.retake()?;
        debug!(topic = %self.topic_id, "quiz restarted");
        Ok(())
    }

    fn record(&mut self, result: QuizResult) -> AttemptOutcome {
        self.progress.update_quiz_score(&self.topic_id, result.score);

        let passed = self.policy.is_passing(result.score);
        let newly_completed = passed && self.progress.mark_topic_complete(&self.topic_id);

        let attempt = u32::try_from(self.attempts.len() + 1).unwrap_or(u32::MAX);
        let outcome = AttemptOutcome {
            topic_id: self.topic_id.clone(),
            attempt,
            result,
            passed,
            newly_completed,
            submitted_at: self.clock.now(),
        };

        info!(
            topic = %self.topic_id,
            attempt,
            score = result.score.value(),
            correct = result.correct,
            total = result.total,
            passed,
            "quiz submitted"
        );

        self.attempts.push(outcome.clone());
        outcome
    }
}

impl fmt::Debug for TopicQuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicQuizService")
            .field("topic_id", &self.topic_id)
            .field("session", &self.session)
            .field("policy", &self.policy)
            .field("attempts_len", &self.attempts.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
