#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod overview;
pub mod progress_store;
pub mod quiz;
pub mod tutor;

pub use tutor_core::Clock;

pub use catalog::TopicCatalog;
pub use error::{CatalogError, QuizServiceError};
pub use overview::{ProgressOverview, ScoreBadge, TopicProgressRow};
pub use progress_store::ProgressStore;
pub use quiz::{AttemptOutcome, QuizStep, TopicQuizService};
pub use tutor::TutorServices;
