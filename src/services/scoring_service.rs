use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};

use crate::models::domain::{
    topic_history::round_one_decimal, CandidateQuestion, QuestionOutcome, QuizResultSummary,
    ScoreResult,
};
use crate::repositories::HistoryRepository;

pub struct ScoringService {
    history: Arc<dyn HistoryRepository>,
}

impl ScoringService {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    /// Grades a quiz against answers keyed by question number.
    ///
    /// Answers are compared trimmed and case-insensitively; a missing answer
    /// counts as incorrect.
    pub fn grade_quiz(
        questions: &[CandidateQuestion],
        answers: &HashMap<u32, String>,
        graded_at: DateTime<Utc>,
    ) -> ScoreResult {
        let per_question_breakdown: Vec<QuestionOutcome> = questions
            .iter()
            .map(|question| {
                let user_answer = answers
                    .get(&question.question_number)
                    .map(|answer| answer.trim().to_uppercase())
                    .unwrap_or_default();
                let correct_answer = question
                    .correct_answer
                    .map(|label| label.as_str().to_string())
                    .unwrap_or_default();
                let is_correct = !user_answer.is_empty() && user_answer == correct_answer;

                QuestionOutcome {
                    question_number: question.question_number,
                    question_text: question.question_text.clone(),
                    user_answer,
                    correct_answer,
                    is_correct,
                    explanation: question.explanation.clone(),
                }
            })
            .collect();

        let total_questions = questions.len() as u32;
        let correct_answers = per_question_breakdown.iter().filter(|o| o.is_correct).count() as u32;
        let percentage = if total_questions > 0 {
            round_one_decimal(correct_answers as f64 / total_questions as f64 * 100.0)
        } else {
            0.0
        };

        ScoreResult {
            timestamp: graded_at,
            score: correct_answers,
            correct_answers,
            incorrect_answers: total_questions - correct_answers,
            total_questions,
            percentage,
            quiz_type: questions
                .first()
                .map(|q| q.question_type.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            per_question_breakdown,
        }
    }

    /// Grades the quiz and, when a topic is given, appends the result to its
    /// history. Storage failures are logged and do not affect the result.
    pub async fn score_quiz(
        &self,
        questions: &[CandidateQuestion],
        answers: &HashMap<u32, String>,
        topic: Option<&str>,
    ) -> ScoreResult {
        let result = Self::grade_quiz(questions, answers, Utc::now());

        if let Some(topic) = topic {
            if let Err(e) = self
                .history
                .append_result(topic, QuizResultSummary::from(&result))
                .await
            {
                log::warn!("Failed to store quiz result for '{}': {}", topic, e);
            }
        }

        log::info!(
            "Scored quiz: {}/{} ({}%)",
            result.correct_answers,
            result.total_questions,
            result.percentage
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::JsonHistoryRepository;
    use crate::test_utils::fixtures::valid_question;

    fn quiz() -> Vec<CandidateQuestion> {
        vec![
            valid_question(1, "One?"),
            valid_question(2, "Two?"),
            valid_question(3, "Three?"),
        ]
    }

    #[test]
    fn test_grades_case_insensitively_and_treats_missing_as_wrong() {
        let answers = HashMap::from([(1, " b ".to_string()), (2, "C".to_string())]);

        let result = ScoringService::grade_quiz(&quiz(), &answers, Utc::now());

        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.incorrect_answers, 2);
        assert_eq!(result.score, 1);
        assert_eq!(result.percentage, 33.3);
        assert_eq!(result.quiz_type, "multiple_choice");
        assert!(result.per_question_breakdown[0].is_correct);
        assert_eq!(result.per_question_breakdown[2].user_answer, "");
        assert!(!result.per_question_breakdown[2].is_correct);
    }

    #[test]
    fn test_empty_quiz_scores_zero() {
        let result = ScoringService::grade_quiz(&[], &HashMap::new(), Utc::now());

        assert_eq!(result.total_questions, 0);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.quiz_type, "unknown");
    }

    #[test]
    fn test_grading_is_deterministic() {
        let answers = HashMap::from([(1, "B".to_string()), (3, "b".to_string())]);
        let graded_at = Utc::now();

        assert_eq!(
            ScoringService::grade_quiz(&quiz(), &answers, graded_at),
            ScoringService::grade_quiz(&quiz(), &answers, graded_at)
        );
    }

    #[tokio::test]
    async fn test_score_quiz_appends_result_for_topic() {
        let dir = tempfile::tempdir().unwrap();
        let history: Arc<dyn HistoryRepository> =
            Arc::new(JsonHistoryRepository::open(dir.path().join("history.json")).await);
        let service = ScoringService::new(history.clone());
        let answers = HashMap::from([(1, "B".to_string()), (2, "B".to_string())]);

        let result = service.score_quiz(&quiz(), &answers, Some("IoT")).await;
        service.score_quiz(&quiz(), &answers, None).await;

        assert_eq!(result.percentage, 66.7);
        let stats = history.get_stats("IoT").await.unwrap();
        assert_eq!(stats.total_quizzes_taken, 1);
        assert_eq!(stats.best_score, 66.7);
    }
}
