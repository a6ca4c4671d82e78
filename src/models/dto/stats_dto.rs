use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{QuizResultSummary, TopicHistory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicStats {
    pub topic: String,
    pub total_questions_served: u64,
    pub unique_questions_available: usize,
    pub total_quizzes_taken: usize,
    pub average_score: f64,
    pub best_score: f64,
    pub last_updated: Option<DateTime<Utc>>,
    pub quiz_results: Vec<QuizResultSummary>,
}

impl TopicStats {
    pub fn empty(topic: &str) -> Self {
        TopicStats {
            topic: topic.to_string(),
            total_questions_served: 0,
            unique_questions_available: 0,
            total_quizzes_taken: 0,
            average_score: 0.0,
            best_score: 0.0,
            last_updated: None,
            quiz_results: Vec::new(),
        }
    }

    pub fn from_history(topic: &str, history: &TopicHistory) -> Self {
        TopicStats {
            topic: topic.to_string(),
            total_questions_served: history.total_questions_served,
            unique_questions_available: history.question_hashes.len(),
            total_quizzes_taken: history.quiz_results.len(),
            average_score: history.average_score(),
            best_score: history.best_score(),
            last_updated: Some(history.last_updated),
            quiz_results: history.quiz_results.clone(),
        }
    }
}

/// Roll-up across every topic with history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryOverview {
    pub total_topics: usize,
    pub total_questions_served: u64,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatsReport {
    Topic(TopicStats),
    Overview(HistoryOverview),
}
