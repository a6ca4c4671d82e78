use async_trait::async_trait;
use thiserror::Error;

use crate::constants::backfill_bank::with_topic;
use crate::constants::offline_bank::{FOLLOW_UP_QUESTIONS, FOLLOW_UP_VARIATIONS, OFFLINE_TEMPLATES};
use crate::models::domain::{OptionLabel, QuestionType};

/// Failure reported by a question generator backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("Generator rejected credentials: {0}")]
    Auth(String),

    #[error("Generator rate limited: {0}")]
    RateLimited(String),

    #[error("Generator call failed: {0}")]
    Transient(String),
}

impl GeneratorError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, GeneratorError::RateLimited(_) | GeneratorError::Transient(_))
    }
}

/// One call's worth of input for a generator backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorRequest {
    pub topic: String,
    pub content_hint: Option<String>,
    pub count: u32,
    pub question_type: QuestionType,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Asks for questions that differ from an earlier batch.
    pub follow_up: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Returns raw question text in the `Q<n>.` block format.
    async fn generate(&self, request: &GeneratorRequest) -> Result<String, GeneratorError>;
}

/// Renders one question in the block format the response parser reads.
pub fn format_question_block(
    question_number: u32,
    question: &str,
    options: &[String; 4],
    correct_answer: &str,
    explanation: &str,
) -> String {
    let option_lines = OptionLabel::ALL
        .iter()
        .zip(options.iter())
        .map(|(label, text)| format!("{}) {}", label, text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Q{}. {}\n{}\nCorrect Answer: {}\nExplanation: {}\n",
        question_number, question, option_lines, correct_answer, explanation
    )
}

/// Deterministic local generator used when no API access is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineQuestionGenerator;

impl OfflineQuestionGenerator {
    pub fn new() -> Self {
        Self
    }

    fn first_batch(topic: &str, count: u32) -> String {
        (0..count as usize)
            .map(|index| {
                let template = &OFFLINE_TEMPLATES[index % OFFLINE_TEMPLATES.len()];
                let cycle = index / OFFLINE_TEMPLATES.len();
                let mut question = with_topic(template.question, topic);
                if cycle > 0 {
                    question = format!("{} (Variation {})", question, cycle);
                }
                let options = template.options.map(|option| with_topic(option, topic));

                format_question_block(
                    index as u32 + 1,
                    &question,
                    &options,
                    template.correct_answer,
                    &with_topic(template.explanation, topic),
                )
            })
            .collect()
    }

    fn follow_up_batch(topic: &str, count: u32) -> String {
        (0..count as usize)
            .map(|index| {
                let focus = with_topic(FOLLOW_UP_VARIATIONS[index % FOLLOW_UP_VARIATIONS.len()], topic);
                let lowered = focus.to_lowercase();
                let question =
                    FOLLOW_UP_QUESTIONS[index % FOLLOW_UP_QUESTIONS.len()].replace("{variation}", &lowered);
                let options = [
                    format!("Fundamental principles of {}", lowered),
                    format!("Advanced techniques in {}", lowered),
                    format!("Common challenges in {}", lowered),
                    "All of the above aspects".to_string(),
                ];

                format_question_block(
                    index as u32 + 1,
                    &question,
                    &options,
                    "D",
                    &format!(
                        "{} encompasses fundamental principles, advanced techniques, and common challenges.",
                        focus
                    ),
                )
            })
            .collect()
    }
}

#[async_trait]
impl QuestionGenerator for OfflineQuestionGenerator {
    async fn generate(&self, request: &GeneratorRequest) -> Result<String, GeneratorError> {
        log::debug!(
            "Offline generator producing {} question(s) for '{}' (follow_up={})",
            request.count,
            request.topic,
            request.follow_up
        );

        let text = if request.follow_up {
            Self::follow_up_batch(&request.topic, request.count)
        } else {
            Self::first_batch(&request.topic, request.count)
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::response_parser::ResponseParser;

    fn request(count: u32, follow_up: bool) -> GeneratorRequest {
        GeneratorRequest {
            topic: "IoT".to_string(),
            content_hint: None,
            count,
            question_type: QuestionType::MultipleChoice,
            temperature: 0.7,
            max_tokens: 500,
            follow_up,
        }
    }

    #[test]
    fn test_retryable_errors() {
        assert!(GeneratorError::RateLimited("429".into()).is_retryable());
        assert!(GeneratorError::Transient("timeout".into()).is_retryable());
        assert!(!GeneratorError::Auth("bad key".into()).is_retryable());
    }

    #[tokio::test]
    async fn test_offline_output_parses_into_valid_questions() {
        let text = OfflineQuestionGenerator::new()
            .generate(&request(5, false))
            .await
            .unwrap();

        let batch = ResponseParser::parse(&text, QuestionType::MultipleChoice);
        assert_eq!(batch.valid_count(), 5);
        assert_eq!(
            batch.candidates[0].question_text,
            "What is the primary purpose of IoT?"
        );
        assert_eq!(batch.candidates[0].correct_answer, Some(OptionLabel::A));
    }

    #[tokio::test]
    async fn test_offline_output_is_deterministic_and_distinct_past_the_bank() {
        let generator = OfflineQuestionGenerator::new();
        let first = generator.generate(&request(20, false)).await.unwrap();
        let second = generator.generate(&request(20, false)).await.unwrap();
        assert_eq!(first, second);

        let batch = ResponseParser::parse(&first, QuestionType::MultipleChoice);
        let report = ResponseParser::validate_quiz(&batch.candidates);
        assert_eq!(report.valid_questions, 20);
        assert!(!report
            .warnings
            .iter()
            .any(|w| w.contains("Duplicate question")));
    }

    #[tokio::test]
    async fn test_follow_up_uses_variation_bank() {
        let text = OfflineQuestionGenerator::new()
            .generate(&request(2, true))
            .await
            .unwrap();

        let batch = ResponseParser::parse(&text, QuestionType::MultipleChoice);
        assert_eq!(batch.valid_count(), 2);
        assert_eq!(
            batch.candidates[0].question_text,
            "What are the key aspects of advanced iot concepts?"
        );
        assert_eq!(batch.candidates[1].correct_answer, Some(OptionLabel::D));
    }

    #[test]
    fn test_formats_block_with_labelled_options() {
        let options = ["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        let block = format_question_block(3, "Why?", &options, "C", "Because.");
        assert_eq!(
            block,
            "Q3. Why?\nA) a\nB) b\nC) c\nD) d\nCorrect Answer: C\nExplanation: Because.\n"
        );
    }
}
