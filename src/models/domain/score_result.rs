use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::topic_history::QuizResultSummary;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuestionOutcome {
    pub question_number: u32,
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScoreResult {
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub quiz_type: String,
    pub per_question_breakdown: Vec<QuestionOutcome>,
}

impl From<&ScoreResult> for QuizResultSummary {
    fn from(result: &ScoreResult) -> Self {
        QuizResultSummary {
            timestamp: result.timestamp,
            score: result.score,
            total_questions: result.total_questions,
            correct_answers: result.correct_answers,
            percentage: result.percentage,
            quiz_type: result.quiz_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_persisted_fields_only() {
        let result = ScoreResult {
            timestamp: Utc::now(),
            score: 2,
            correct_answers: 2,
            incorrect_answers: 1,
            total_questions: 3,
            percentage: 66.7,
            quiz_type: "multiple_choice".to_string(),
            per_question_breakdown: vec![QuestionOutcome {
                question_number: 1,
                question_text: "Q".to_string(),
                user_answer: "A".to_string(),
                correct_answer: "A".to_string(),
                is_correct: true,
                explanation: "E".to_string(),
            }],
        };

        let summary = QuizResultSummary::from(&result);
        assert_eq!(summary.score, 2);
        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.percentage, 66.7);
        assert_eq!(summary.timestamp, result.timestamp);

        let json = serde_json::to_value(&summary).expect("summary should serialize");
        assert!(json.get("per_question_breakdown").is_none());
    }
}
