use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur when building a score.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score must be between 0 and 100, got {0}")]
    OutOfRange(u8),
}

//
// ─── SCORE ────────────────────────────────────────────────────────────────────
//

/// Whole-number quiz percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const MAX: Score = Score(100);

    /// Builds a score from a raw percentage.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfRange` if the value is above 100.
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > 100 {
            return Err(ScoreError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Builds a score, capping values above 100.
    #[must_use]
    pub const fn saturating(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Percentage of `correct` out of `total`, rounded half up.
    ///
    /// `correct` is clamped to `total`. An empty total yields `Score::ZERO`;
    /// quiz sessions never reach this because they reject empty question lists.
    #[must_use]
    pub fn from_ratio(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let correct = correct.min(total) as u64;
        let total = total as u64;
        // round(100 * c / t) with .5 going up, without floats
        let rounded = (200 * correct + total) / (2 * total);
        Self(rounded as u8)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns true if this score reaches `threshold`.
    #[must_use]
    pub fn meets(self, threshold: Score) -> bool {
        self >= threshold
    }
}

impl TryFrom<u8> for Score {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
