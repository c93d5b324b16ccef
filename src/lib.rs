// Anonqa - Moderation and lifecycle engine for an anonymous teen-support Q&A platform
// Owns a question from anonymous submission through moderation to answering

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;

pub use config::Limits;
pub use error::{QaError, QaResult};
pub use logging::setup_log;

// Re-export commonly used types
pub use auth::{Caller, Capability};
pub use models::{
    Answer, AnswerId, Category, ModerationDecision, Question, QuestionId, QuestionStatus, Role,
    User, UserId,
};
pub use store::{DocumentStore, MemoryStore, QuestionFilter};
