use std::fmt;
use thiserror::Error;

use crate::model::question::{Question, QuestionDraft, QuestionError};
use crate::model::score::Score;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Problems with the question set, raised once when a quiz is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizConfigError {
    #[error("a quiz needs at least one question")]
    NoQuestions,

    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// A transition that is not allowed in the current state.
///
/// Rejected transitions never change the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question {index} has not been answered")]
    Unanswered { index: usize },

    #[error("option {option} is out of range for {options} options")]
    OptionOutOfRange { option: usize, options: usize },

    #[error("already on the first question")]
    AtFirstQuestion,

    #[error("quiz has already been submitted")]
    Submitted,

    #[error("quiz has not been submitted yet")]
    NotSubmitted,
}

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

/// Where the attempt currently is. The question index lives on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Choosing an option for the current question.
    Answering,
    /// Feedback for the current question is shown.
    Reviewing,
    /// All questions done; the score is final.
    Submitted,
}

/// Final tally of a submitted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: Score,
    pub correct: usize,
    pub total: usize,
}

/// Correctness feedback for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub index: usize,
    pub selected: usize,
    pub correct_option: usize,
    pub is_correct: bool,
    pub correct_text: &'a str,
    pub explanation: Option<&'a str>,
}

/// Outcome of a successful `next()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Moved { index: usize },
    /// The last question was confirmed; reported once per attempt.
    Submitted(QuizResult),
}

/// One row of the post-submission review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub index: usize,
    pub prompt: &'a str,
    pub selected: Option<usize>,
    pub selected_text: Option<&'a str>,
    pub is_correct: bool,
    pub correct_option: usize,
    pub correct_text: &'a str,
    pub explanation: Option<&'a str>,
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub current: usize,
    pub is_submitted: bool,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// One attempt at a fixed, ordered list of questions.
///
/// Starts in `Answering` on question 0 with every slot unanswered. The
/// transition that reaches `Submitted` returns the score; `retake` starts a
/// fresh attempt over the same questions.
#[derive(Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<usize>>,
    phase: QuizPhase,
    result: Option<QuizResult>,
}

impl QuizSession {
    /// Start a quiz over already validated questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizConfigError::NoQuestions` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizConfigError> {
        if questions.is_empty() {
            return Err(QuizConfigError::NoQuestions);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            current: 0,
            answers,
            phase: QuizPhase::Answering,
            result: None,
        })
    }

    /// Validate drafts and start a quiz over them.
    ///
    /// # Errors
    ///
    /// Returns `QuizConfigError::NoQuestions` for an empty list and
    /// `QuizConfigError::InvalidQuestion` for the first draft that fails validation.
    pub fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, QuizConfigError> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| QuizConfigError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers[self.current]
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == QuizPhase::Submitted
    }

    /// Whether `next()` would currently be accepted.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_submitted() && self.current_answer().is_some()
    }

    /// Whether `previous()` would currently be accepted.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.is_submitted() && self.current > 0
    }

    /// Final result, present only once submitted.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.result
    }

    /// Returns a summary of the current attempt.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.questions.len(),
            answered: self.answers.iter().filter(|slot| slot.is_some()).count(),
            current: self.current,
            is_submitted: self.is_submitted(),
        }
    }

    /// Feedback for the current question while it is being reviewed.
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback<'_>> {
        if self.phase != QuizPhase::Reviewing {
            return None;
        }
        self.current_answer()
            .map(|selected| self.feedback_for(self.current, selected))
    }

    /// Choose an option for the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Submitted` after submission and
    /// `QuizError::OptionOutOfRange` for an option the question does not have.
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        self.ensure_open()?;
        let options = self.current_question().option_count();
        if option >= options {
            return Err(QuizError::OptionOutOfRange { option, options });
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// Reveal whether the current answer is correct.
    ///
    /// Checking again while already reviewing returns the same feedback.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Unanswered` if nothing is selected yet and
    /// `QuizError::Submitted` after submission.
    pub fn check_answer(&mut self) -> Result<Feedback<'_>, QuizError> {
        self.ensure_open()?;
        let selected = self.ensure_answered()?;
        self.phase = QuizPhase::Reviewing;
        Ok(self.feedback_for(self.current, selected))
    }

    /// Confirm the current answer and move on, or submit on the last question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Unanswered` if nothing is selected yet and
    /// `QuizError::Submitted` after submission.
    pub fn next(&mut self) -> Result<Advance, QuizError> {
        self.ensure_open()?;
        self.ensure_answered()?;

        if !self.is_last_question() {
            self.current += 1;
            self.phase = QuizPhase::Answering;
            return Ok(Advance::Moved {
                index: self.current,
            });
        }

        let result = self.tally();
        self.phase = QuizPhase::Submitted;
        self.result = Some(result);
        Ok(Advance::Submitted(result))
    }

    /// Go back one question. The earlier answer is kept but its feedback is not.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AtFirstQuestion` on question 0 and
    /// `QuizError::Submitted` after submission.
    pub fn previous(&mut self) -> Result<usize, QuizError> {
        self.ensure_open()?;
        if self.current == 0 {
            return Err(QuizError::AtFirstQuestion);
        }
        self.current -= 1;
        self.phase = QuizPhase::Answering;
        Ok(self.current)
    }

    /// Start over with the same questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotSubmitted` unless the quiz has been submitted.
    pub fn retake(&mut self) -> Result<(), QuizError> {
        if !self.is_submitted() {
            return Err(QuizError::NotSubmitted);
        }
        self.answers.iter_mut().for_each(|slot| *slot = None);
        self.current = 0;
        self.phase = QuizPhase::Answering;
        self.result = None;
        Ok(())
    }

    /// Per-question review of a submitted attempt.
    #[must_use]
    pub fn review(&self) -> Option<Vec<QuestionReview<'_>>> {
        if !self.is_submitted() {
            return None;
        }
        let rows = self
            .questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(index, (question, selected))| QuestionReview {
                index,
                prompt: question.prompt(),
                selected: *selected,
                selected_text: selected.and_then(|option| question.option(option)),
                is_correct: selected.is_some_and(|option| question.is_correct(option)),
                correct_option: question.correct_option(),
                correct_text: question.correct_option_text(),
                explanation: question.explanation(),
            })
            .collect();
        Some(rows)
    }

    fn ensure_open(&self) -> Result<(), QuizError> {
        if self.is_submitted() {
            return Err(QuizError::Submitted);
        }
        Ok(())
    }

    fn ensure_answered(&self) -> Result<usize, QuizError> {
        self.current_answer().ok_or(QuizError::Unanswered {
            index: self.current,
        })
    }

    fn feedback_for(&self, index: usize, selected: usize) -> Feedback<'_> {
        let question = &self.questions[index];
        Feedback {
            index,
            selected,
            correct_option: question.correct_option(),
            is_correct: question.is_correct(selected),
            correct_text: question.correct_option_text(),
            explanation: question.explanation(),
        }
    }

    fn tally(&self) -> QuizResult {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, selected)| {
                selected.is_some_and(|option| question.is_correct(option))
            })
            .count();
        let total = self.questions.len();
        QuizResult {
            score: Score::from_ratio(correct, total),
            correct,
            total,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers", &self.answers)
            .field("phase", &self.phase)
            .field("result", &self.result)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
