//! Field bounds and paging defaults shared by the services

use serde::{Deserialize, Serialize};

/// Length bounds and paging defaults
///
/// The defaults mirror the platform's schema constraints: 5000-character
/// question and answer bodies, 500-character rejection reasons, 10 items per
/// moderation page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub max_question_chars: usize,
    pub max_answer_chars: usize,
    pub max_rejection_chars: usize,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_question_chars: 5000,
            max_answer_chars: 5000,
            max_rejection_chars: 500,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}
