use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::candidate_question::QuestionType;

pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 10;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct GenerationRequest {
    #[validate(length(min = 1, message = "Topic is required"))]
    pub topic: String,

    pub content_hint: Option<String>,

    #[validate(range(min = 1, max = 10))]
    pub requested_count: u32,

    #[serde(default)]
    pub question_type: QuestionType,
}

impl GenerationRequest {
    /// Builds a request with the topic trimmed and the count clamped into
    /// `MIN_QUESTIONS..=MAX_QUESTIONS`.
    pub fn new(topic: &str, content_hint: Option<&str>, requested_count: u32) -> Self {
        Self {
            topic: topic.trim().to_string(),
            content_hint: content_hint
                .map(str::trim)
                .filter(|hint| !hint.is_empty())
                .map(str::to_string),
            requested_count: clamp_count(requested_count),
            question_type: QuestionType::MultipleChoice,
        }
    }

    /// Re-applies the invariants to a request that was deserialized or
    /// constructed field by field.
    pub fn normalized(mut self) -> Self {
        self.topic = self.topic.trim().to_string();
        self.requested_count = clamp_count(self.requested_count);
        self
    }
}

pub fn clamp_count(count: u32) -> u32 {
    count.clamp(MIN_QUESTIONS, MAX_QUESTIONS)
}
