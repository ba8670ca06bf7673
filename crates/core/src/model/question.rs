use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct option {correct} is out of range for {options} options")]
    CorrectOptionOutOfRange { correct: usize, options: usize },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as authored in topic content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_option: usize,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_option,
            explanation: None,
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Validate the draft into a `Question`.
    ///
    /// Prompt and options are trimmed; a blank explanation is dropped.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an option is blank, fewer than
    /// two options are given, or `correct_option` does not index an option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: self.options.len(),
            });
        }

        let mut options = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.into_iter().enumerate() {
            let option = option.trim().to_string();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            options.push(option);
        }

        if self.correct_option >= options.len() {
            return Err(QuestionError::CorrectOptionOutOfRange {
                correct: self.correct_option,
                options: options.len(),
            });
        }

        let explanation = self
            .explanation
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(Question {
            prompt,
            options,
            correct_option: self.correct_option,
            explanation,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// Always has at least two options and a `correct_option` that indexes one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_option: usize,
    explanation: Option<String>,
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn correct_option_text(&self) -> &str {
        &self.options[self.correct_option]
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
