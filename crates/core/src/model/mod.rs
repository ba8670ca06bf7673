mod ids;
mod policy;
mod progress;
mod question;
mod quiz;
mod score;
mod topic;

pub use ids::TopicId;
pub use policy::{CompletionPolicy, SettingsError};
pub use progress::ProgressState;
pub use question::{Question, QuestionDraft, QuestionError};
pub use quiz::{
    Advance, Feedback, QuestionReview, QuizConfigError, QuizError, QuizPhase, QuizProgress,
    QuizResult, QuizSession,
};
pub use score::{Score, ScoreError};
pub use topic::{Topic, TopicDraft, TopicError};
