use tutor_core::model::{CompletionPolicy, ProgressState, Score, TopicId};

use crate::catalog::TopicCatalog;
use crate::progress_store::ProgressStore;

/// How a topic's latest score compares to the pass mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBadge {
    Passing,
    NeedsWork,
}

/// One line of the progress list.
///
/// Presentation-agnostic: no pre-formatted strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicProgressRow {
    pub id: TopicId,
    pub name: String,
    pub completed: bool,
    pub score: Option<Score>,
    pub badge: Option<ScoreBadge>,
}

/// Progress across every topic in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOverview {
    pub total_topics: usize,
    pub completed_topics: usize,
    pub percent_complete: Score,
    pub rows: Vec<TopicProgressRow>,
}

impl ProgressOverview {
    /// Build the overview from the current store state.
    ///
    /// Completed ids that are not in the catalog are ignored, so the
    /// percentage never exceeds 100.
    #[must_use]
    pub fn build(catalog: &TopicCatalog, store: &ProgressStore, policy: CompletionPolicy) -> Self {
        Self::from_state(catalog, &store.snapshot(), policy)
    }

    #[must_use]
    pub fn from_state(
        catalog: &TopicCatalog,
        state: &ProgressState,
        policy: CompletionPolicy,
    ) -> Self {
        let rows: Vec<TopicProgressRow> = catalog
            .topics()
            .iter()
            .map(|topic| {
                let score = state.score(topic.id().as_str());
                TopicProgressRow {
                    id: topic.id().clone(),
                    name: topic.name().to_string(),
                    completed: state.is_completed(topic.id().as_str()),
                    score,
                    badge: score.map(|score| {
                        if policy.is_passing(score) {
                            ScoreBadge::Passing
                        } else {
                            ScoreBadge::NeedsWork
                        }
                    }),
                }
            })
            .collect();

        let completed_topics = rows.iter().filter(|row| row.completed).count();
        Self {
            total_topics: rows.len(),
            completed_topics,
            percent_complete: Score::from_ratio(completed_topics, rows.len()),
            rows,
        }
    }

    #[must_use]
    pub fn row(&self, id: &TopicId) -> Option<&TopicProgressRow> {
        self.rows.iter().find(|row| &row.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_shows_nothing_done() {
        let catalog = TopicCatalog::builtin().unwrap();
        let overview =
            ProgressOverview::build(&catalog, &ProgressStore::new(), CompletionPolicy::default());
        assert_eq!(overview.total_topics, 9);
        assert_eq!(overview.completed_topics, 0);
        assert_eq!(overview.percent_complete, Score::ZERO);
        assert!(overview.rows.iter().all(|row| row.score.is_none() && row.badge.is_none()));
    }

    #[test]
    fn badges_follow_policy_and_unknown_ids_are_ignored() {
        let catalog = TopicCatalog::builtin().unwrap();
        let store = ProgressStore::new();
        let hooks = TopicId::new("hooks");
        let forms = TopicId::new("forms");

        store.update_quiz_score(&hooks, Score::new(100).unwrap());
        store.mark_topic_complete(&hooks);
        store.update_quiz_score(&forms, Score::new(33).unwrap());
        store.mark_topic_complete(&TopicId::new("not-in-catalog"));

        let overview = ProgressOverview::build(&catalog, &store, CompletionPolicy::default());
        assert_eq!(overview.completed_topics, 1);
        assert_eq!(overview.percent_complete.value(), 11);

        let hooks_row = overview.row(&hooks).unwrap();
        assert!(hooks_row.completed);
        assert_eq!(hooks_row.badge, Some(ScoreBadge::Passing));

        let forms_row = overview.row(&forms).unwrap();
        assert!(!forms_row.completed);
        assert_eq!(forms_row.badge, Some(ScoreBadge::NeedsWork));
    }
}
