use crate::models::domain::{
    CandidateQuestion, OptionLabel, QuestionSource, QuestionType, QuizResultSummary,
};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::Utc;

    /// Creates a valid question with options "Option A".."Option D" and answer B
    pub fn valid_question(question_number: u32, text: &str) -> CandidateQuestion {
        CandidateQuestion {
            question_number,
            question_type: QuestionType::MultipleChoice,
            question_text: text.to_string(),
            options: OptionLabel::ALL
                .iter()
                .map(|label| (*label, format!("Option {}", label)))
                .collect(),
            correct_answer: Some(OptionLabel::B),
            explanation: "Because B is right.".to_string(),
            source: QuestionSource::Generated,
            invalid_reason: None,
        }
    }

    pub fn question_with_text(text: &str) -> CandidateQuestion {
        valid_question(1, text)
    }

    /// Renders a well-formed block the way a generator would
    pub fn question_block(question_number: u32, text: &str) -> String {
        format!(
            "Q{}. {}\nA) Option A\nB) Option B\nC) Option C\nD) Option D\nCorrect Answer: B\nExplanation: Because B is right.\n",
            question_number, text
        )
    }

    pub fn summary_with_percentage(percentage: f64) -> QuizResultSummary {
        QuizResultSummary {
            timestamp: Utc::now(),
            score: (percentage / 10.0).round() as u32,
            total_questions: 10,
            correct_answers: (percentage / 10.0).round() as u32,
            percentage,
            quiz_type: QuestionType::MultipleChoice.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_valid_question() {
        let question = valid_question(2, "What is IoT?");
        assert_eq!(question.question_number, 2);
        assert_eq!(question.structural_error(), None);
    }

    #[test]
    fn test_fixtures_summary() {
        let summary = summary_with_percentage(80.0);
        assert_eq!(summary.correct_answers, 8);
        assert_eq!(summary.quiz_type, "multiple_choice");
    }
}
