use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::dto::{HistoryOverview, StatsReport, TopicStats},
    repositories::HistoryRepository,
};

/// Read-only views over the history store.
pub struct StatsService {
    history: Arc<dyn HistoryRepository>,
}

impl StatsService {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    pub async fn topic_stats(&self, topic: &str) -> AppResult<TopicStats> {
        self.history.get_stats(topic).await
    }

    pub async fn overview(&self) -> AppResult<HistoryOverview> {
        let topics = self.history.list_topics().await?;

        let mut total_questions_served = 0;
        for topic in &topics {
            total_questions_served += self.history.get_stats(topic).await?.total_questions_served;
        }

        Ok(HistoryOverview {
            total_topics: topics.len(),
            total_questions_served,
            topics,
        })
    }

    /// Per-topic stats when a topic is given, otherwise the cross-topic roll-up.
    pub async fn get_topic_stats(&self, topic: Option<&str>) -> AppResult<StatsReport> {
        match topic {
            Some(topic) => Ok(StatsReport::Topic(self.topic_stats(topic).await?)),
            None => Ok(StatsReport::Overview(self.overview().await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::JsonHistoryRepository;
    use crate::test_utils::fixtures::{question_with_text, summary_with_percentage};

    #[tokio::test]
    async fn test_overview_sums_served_counts_across_topics() {
        let dir = tempfile::tempdir().unwrap();
        let history: Arc<dyn HistoryRepository> =
            Arc::new(JsonHistoryRepository::open(dir.path().join("history.json")).await);
        history
            .record_served("IoT", &[question_with_text("A?"), question_with_text("B?")])
            .await
            .unwrap();
        history
            .record_served("Robotics", &[question_with_text("C?")])
            .await
            .unwrap();
        history
            .append_result("Robotics", summary_with_percentage(50.0))
            .await
            .unwrap();

        let service = StatsService::new(history);

        match service.get_topic_stats(None).await.unwrap() {
            StatsReport::Overview(overview) => {
                assert_eq!(overview.total_topics, 2);
                assert_eq!(overview.total_questions_served, 3);
                assert_eq!(overview.topics, vec!["IoT".to_string(), "Robotics".to_string()]);
            }
            other => panic!("expected overview, got {:?}", other),
        }

        match service.get_topic_stats(Some("Robotics")).await.unwrap() {
            StatsReport::Topic(stats) => {
                assert_eq!(stats.total_quizzes_taken, 1);
                assert_eq!(stats.average_score, 50.0);
            }
            other => panic!("expected topic stats, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_topic_has_empty_stats() {
        let dir = tempfile::tempdir().unwrap();
        let history: Arc<dyn HistoryRepository> =
            Arc::new(JsonHistoryRepository::open(dir.path().join("history.json")).await);

        let stats = StatsService::new(history).topic_stats("Nothing").await.unwrap();

        assert_eq!(stats, TopicStats::empty("Nothing"));
    }
}
