use thiserror::Error;

use crate::model::{QuestionError, QuizConfigError, QuizError, ScoreError, SettingsError, TopicError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    QuizConfig(#[from] QuizConfigError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
