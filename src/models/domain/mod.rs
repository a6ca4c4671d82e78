pub mod candidate_question;
pub mod generation_request;
pub mod question_identity;
pub mod score_result;
pub mod topic_history;
pub use candidate_question::{CandidateQuestion, OptionLabel, QuestionSource, QuestionType, ValidationError};
pub use generation_request::{GenerationRequest, MAX_QUESTIONS, MIN_QUESTIONS};
pub use question_identity::{normalize_question_text, question_identity};
pub use score_result::{QuestionOutcome, ScoreResult};
pub use topic_history::{QuizResultSummary, TopicHistory};
