use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::ids::TopicId;
use crate::model::score::Score;

/// Completion and quiz scores for every topic touched in a session.
///
/// A topic can be complete without a score and scored without being
/// complete. Entries are only ever added or overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    completed_topics: BTreeSet<TopicId>,
    quiz_scores: BTreeMap<TopicId, Score>,
}

impl ProgressState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a topic complete. Returns `true` if it was not complete before.
    pub fn mark_complete(&mut self, topic: &TopicId) -> bool {
        if self.completed_topics.contains(topic) {
            return false;
        }
        self.completed_topics.insert(topic.clone())
    }

    #[must_use]
    pub fn is_completed(&self, topic: &str) -> bool {
        self.completed_topics.contains(topic)
    }

    /// Store the latest score for a topic. Returns the score it replaced, if any.
    pub fn record_score(&mut self, topic: &TopicId, score: Score) -> Option<Score> {
        self.quiz_scores.insert(topic.clone(), score)
    }

    #[must_use]
    pub fn score(&self, topic: &str) -> Option<Score> {
        self.quiz_scores.get(topic).copied()
    }

    pub fn quiz_scores(&self) -> impl Iterator<Item = (&TopicId, Score)> {
        self.quiz_scores.iter().map(|(topic, score)| (topic, *score))
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed_topics.is_empty() && self.quiz_scores.is_empty()
    }
}
