pub mod answer;
pub mod question;
pub mod user;

pub use answer::{Answer, AnswerId, Like, LikeToggle};
pub use question::{Category, ModerationDecision, Question, QuestionId, QuestionStatus};
pub use user::{
    ApplicationStatus, ExpertApplication, ExpertProfile, Role, StatCounter, User, UserId, UserStats,
};
