//! Service layer for anonqa
//!
//! Business logic of the question lifecycle, kept free of transport concerns.
//! Each function takes the document store and typed inputs and returns either
//! data or a typed `QaError`, so the HTTP layer above only translates.

pub mod answer;
pub mod expert;
pub mod moderation;
pub mod question;

// Re-export commonly used types
pub use answer::{
    add_answer, get_answers, mark_best_answer, toggle_like, AddAnswerInput, AnswersView, LikeView,
};
pub use expert::{
    apply_for_expert, list_applications, list_experts, review_application, ExpertApplicationInput,
    ReviewApplicationInput,
};
pub use moderation::{
    list_pending, moderate_question, moderation_stats, ModerateInput, ModerationStats,
    PageRequest, PendingPage,
};
pub use question::{
    get_question, list_questions, list_questions_by_category, submit_question, QuestionView,
    SubmitQuestionInput,
};
