use thiserror::Error;

use crate::model::score::{Score, ScoreError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("pass threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(u8),
}

impl From<ScoreError> for SettingsError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::OutOfRange(value) => SettingsError::InvalidThreshold(value),
        }
    }
}

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// Decides when a quiz score counts as mastering its topic.
///
/// The quiz engine itself never applies this; topic-level callers do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPolicy {
    pass_threshold: Score,
}

impl CompletionPolicy {
    /// Default pass mark for a topic quiz.
    pub const DEFAULT_THRESHOLD: u8 = 70;

    /// Creates a policy with a custom pass mark.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidThreshold` if `pass_threshold` is above 100.
    pub fn new(pass_threshold: u8) -> Result<Self, SettingsError> {
        Ok(Self {
            pass_threshold: Score::new(pass_threshold)?,
        })
    }

    #[must_use]
    pub fn pass_threshold(&self) -> Score {
        self.pass_threshold
    }

    #[must_use]
    pub fn is_passing(&self, score: Score) -> bool {
        score.meets(self.pass_threshold)
    }
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: Score::saturating(Self::DEFAULT_THRESHOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_passes_at_seventy() {
        let policy = CompletionPolicy::default();
        assert_eq!(policy.pass_threshold().value(), 70);
        assert!(policy.is_passing(Score::new(70).unwrap()));
        assert!(!policy.is_passing(Score::new(67).unwrap()));
    }

    #[test]
    fn custom_threshold_is_validated() {
        assert!(CompletionPolicy::new(100).is_ok());
        let err = CompletionPolicy::new(120).unwrap_err();
        assert_eq!(err, SettingsError::InvalidThreshold(120));
    }

    #[test]
    fn zero_threshold_passes_everything() {
        let policy = CompletionPolicy::new(0).unwrap();
        assert!(policy.is_passing(Score::ZERO));
    }
}
