mod attempt;
mod service;

// Public API of the topic quiz subsystem.
pub use crate::error::QuizServiceError;
pub use attempt::{AttemptOutcome, QuizStep};
pub use service::TopicQuizService;
