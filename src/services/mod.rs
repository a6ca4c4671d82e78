pub mod backfill_service;
pub mod openai_generator;
pub mod question_generator;
pub mod quiz_service;
pub mod response_parser;
pub mod scoring_service;
pub mod stats_service;

pub use backfill_service::BackfillService;
pub use openai_generator::OpenAiQuestionGenerator;
pub use question_generator::{GeneratorError, GeneratorRequest, OfflineQuestionGenerator, QuestionGenerator};
pub use quiz_service::{AssemblySettings, QuizService};
pub use response_parser::{ParsedBatch, QuizValidationReport, ResponseParser};
pub use scoring_service::ScoringService;
pub use stats_service::StatsService;
