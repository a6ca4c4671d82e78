use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{HistoryRepository, JsonHistoryRepository},
    services::{
        AssemblySettings, OfflineQuestionGenerator, OpenAiQuestionGenerator, QuestionGenerator,
        QuizService, ScoringService, StatsService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub scoring_service: Arc<ScoringService>,
    pub stats_service: Arc<StatsService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let history: Arc<dyn HistoryRepository> =
            Arc::new(JsonHistoryRepository::open(config.history_file.clone()).await);
        Self::with_history(config, history)
    }

    /// Wires the services over an existing history store.
    pub fn with_history(config: Config, history: Arc<dyn HistoryRepository>) -> AppResult<Self> {
        let generator: Arc<dyn QuestionGenerator> = if config.openai_mock {
            log::info!("OPENAI_MOCK is set, using the offline question generator");
            Arc::new(OfflineQuestionGenerator::new())
        } else {
            Arc::new(OpenAiQuestionGenerator::new(&config)?)
        };

        let quiz_service = Arc::new(QuizService::new(
            generator,
            history.clone(),
            AssemblySettings::from_config(&config),
        ));
        let scoring_service = Arc::new(ScoringService::new(history.clone()));
        let stats_service = Arc::new(StatsService::new(history));

        Ok(Self {
            quiz_service,
            scoring_service,
            stats_service,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::domain::GenerationRequest;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_mock_mode_wires_offline_generator() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::test_config();
        config.history_file = dir.path().join("history.json");

        let state = AppState::new(config).await.expect("state should build");
        let questions = state
            .quiz_service
            .generate_quiz(GenerationRequest::new("IoT", None, 4))
            .await
            .unwrap();

        assert_eq!(questions.len(), 4);
        assert!(dir.path().join("history.json").exists());
    }

    #[tokio::test]
    async fn test_live_mode_requires_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::test_config();
        config.openai_mock = false;
        config.history_file = dir.path().join("history.json");

        assert!(matches!(
            AppState::new(config).await,
            Err(AppError::ConfigError(_))
        ));
    }
}
