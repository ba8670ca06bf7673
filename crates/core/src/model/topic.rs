use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TopicId;
use crate::model::question::{Question, QuestionDraft, QuestionError};
use crate::model::quiz::{QuizConfigError, QuizSession};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic id cannot be empty")]
    EmptyId,

    #[error("topic name cannot be empty")]
    EmptyName,

    #[error("topic has no quiz questions")]
    NoQuestions,

    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Topic as authored in catalog content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDraft {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

impl TopicDraft {
    /// Validate the draft into a `Topic`.
    ///
    /// A missing title falls back to the name.
    ///
    /// # Errors
    ///
    /// Returns `TopicError` if the id or name is blank, there are no
    /// questions, or any question fails validation.
    pub fn validate(self) -> Result<Topic, TopicError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(TopicError::EmptyId);
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(TopicError::EmptyName);
        }
        if self.questions.is_empty() {
            return Err(TopicError::NoQuestions);
        }

        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| TopicError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let title = self
            .title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| name.clone());

        Ok(Topic {
            id: TopicId::new(id),
            name,
            title,
            description: self.description.trim().to_string(),
            questions,
        })
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// A unit of learning content with its self-check quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    name: String,
    title: String,
    description: String,
    questions: Vec<Question>,
}

impl Topic {
    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    /// Short label used in navigation and progress lists.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Start a fresh quiz attempt for this topic.
    ///
    /// # Errors
    ///
    /// Returns `QuizConfigError::NoQuestions` if the topic has no questions,
    /// which validated topics never do.
    pub fn start_quiz(&self) -> Result<QuizSession, QuizConfigError> {
        QuizSession::new(self.questions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TopicDraft {
        TopicDraft {
            id: " hooks ".into(),
            name: "Hooks".into(),
            title: None,
            description: " State in functions. ".into(),
            questions: vec![QuestionDraft::new("Q", ["a", "b"], 1)],
        }
    }

    #[test]
    fn validate_trims_and_defaults_title() {
        let topic = draft().validate().unwrap();
        assert_eq!(topic.id().as_str(), "hooks");
        assert_eq!(topic.title(), "Hooks");
        assert_eq!(topic.description(), "State in functions.");
        assert_eq!(topic.questions().len(), 1);
    }

    #[test]
    fn validate_rejects_missing_pieces() {
        let mut no_id = draft();
        no_id.id = "  ".into();
        assert_eq!(no_id.validate().unwrap_err(), TopicError::EmptyId);

        let mut no_name = draft();
        no_name.name = String::new();
        assert_eq!(no_name.validate().unwrap_err(), TopicError::EmptyName);

        let mut no_questions = draft();
        no_questions.questions.clear();
        assert_eq!(no_questions.validate().unwrap_err(), TopicError::NoQuestions);
    }

    #[test]
    fn validate_reports_bad_question_index() {
        let mut bad = draft();
        bad.questions.push(QuestionDraft::new("Q2", ["a", "b"], 2));
        let err = bad.validate().unwrap_err();
        assert!(matches!(err, TopicError::InvalidQuestion { index: 1, .. }));
    }

    #[test]
    fn start_quiz_uses_topic_questions() {
        let topic = draft().validate().unwrap();
        let quiz = topic.start_quiz().unwrap();
        assert_eq!(quiz.total_questions(), 1);
        assert_eq!(quiz.current_question().prompt(), "Q");
    }
}
