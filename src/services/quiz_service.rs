use std::{collections::HashSet, sync::Arc, time::Duration};

use validator::Validate;

use crate::{
    config::{Config, UniquenessPolicy},
    errors::{AppError, AppResult},
    models::domain::{question_identity, CandidateQuestion, GenerationRequest},
    repositories::HistoryRepository,
    services::{
        backfill_service::BackfillService,
        question_generator::{GeneratorError, GeneratorRequest, QuestionGenerator},
        response_parser::ResponseParser,
    },
};

/// Token budget per missing question on a follow-up call.
const FOLLOW_UP_TOKENS_PER_QUESTION: u32 = 80;
const FOLLOW_UP_MAX_TOKENS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    Requested,
    Generated,
    Parsed,
    Backfilled,
    Finalized,
    Recorded,
    Failed,
}

/// Generator and policy knobs the assembler reads from `Config`.
#[derive(Debug, Clone)]
pub struct AssemblySettings {
    pub temperature: f32,
    pub follow_up_temperature: f32,
    pub max_tokens: u32,
    pub max_retries: u32,
    pub retry_backoff_secs: f64,
    pub timeout: Option<Duration>,
    pub uniqueness_policy: UniquenessPolicy,
}

impl AssemblySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            temperature: config.openai_temperature,
            follow_up_temperature: config.openai_follow_up_temperature,
            max_tokens: config.capped_max_tokens(),
            max_retries: config.generator_max_retries,
            retry_backoff_secs: config.generator_retry_backoff_secs.max(0.0),
            timeout: config.generator_timeout_secs.map(Duration::from_secs),
            uniqueness_policy: config.uniqueness_policy,
        }
    }
}

pub struct QuizService {
    generator: Arc<dyn QuestionGenerator>,
    history: Arc<dyn HistoryRepository>,
    settings: AssemblySettings,
}

impl QuizService {
    pub fn new(
        generator: Arc<dyn QuestionGenerator>,
        history: Arc<dyn HistoryRepository>,
        settings: AssemblySettings,
    ) -> Self {
        Self {
            generator,
            history,
            settings,
        }
    }

    /// Returns exactly `requested_count` valid questions numbered from 1,
    /// topping up with a follow-up call and then synthesized questions.
    pub async fn generate_quiz(&self, request: GenerationRequest) -> AppResult<Vec<CandidateQuestion>> {
        let request = request.normalized();
        if request.topic.is_empty() {
            return Err(AppError::ValidationError("Topic is required".to_string()));
        }
        request.validate()?;

        let topic = request.topic.as_str();
        let requested = request.requested_count as usize;
        let mut state = AssemblyState::Requested;

        let first_call = GeneratorRequest {
            topic: request.topic.clone(),
            content_hint: request.content_hint.clone(),
            count: request.requested_count,
            question_type: request.question_type,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            follow_up: false,
        };

        let raw = match self.generate_with_retry(&first_call).await {
            Ok(raw) => raw,
            Err(err) => {
                advance(&mut state, AssemblyState::Failed, topic);
                return Err(err);
            }
        };
        advance(&mut state, AssemblyState::Generated, topic);

        let served = self.history.served_identities(topic).await.unwrap_or_else(|e| {
            log::warn!("Could not read served questions for '{}': {}", topic, e);
            HashSet::new()
        });

        let mut accepted: Vec<CandidateQuestion> = Vec::with_capacity(requested);
        let mut batch_identities: HashSet<String> = HashSet::new();

        let batch = ResponseParser::parse(&raw, request.question_type);
        if batch.invalid_count() > 0 {
            log::info!(
                "Discarded {} invalid question(s) for '{}'",
                batch.invalid_count(),
                topic
            );
        }
        self.accept(topic, batch.into_valid(), &served, &mut batch_identities, &mut accepted);
        advance(&mut state, AssemblyState::Parsed, topic);

        let deficit = requested.saturating_sub(accepted.len()) as u32;
        if deficit > 0 {
            log::info!("Requesting {} additional question(s) for '{}'", deficit, topic);
            let follow_up = GeneratorRequest {
                count: deficit,
                temperature: self.settings.follow_up_temperature,
                max_tokens: FOLLOW_UP_MAX_TOKENS.min(deficit * FOLLOW_UP_TOKENS_PER_QUESTION),
                follow_up: true,
                ..first_call
            };

            match self.call_generator(&follow_up).await {
                Ok(raw) => {
                    let extra = ResponseParser::parse(&raw, request.question_type).into_valid();
                    self.accept(topic, extra, &served, &mut batch_identities, &mut accepted);
                }
                Err(err) => log::warn!("Follow-up generation for '{}' failed: {}", topic, err),
            }
        }

        let short = requested.saturating_sub(accepted.len()) as u32;
        if short > 0 {
            // Skip synthetic items already served for this topic or in this quiz.
            let in_quiz: HashSet<String> = accepted
                .iter()
                .map(|q| question_identity(topic, &q.question_text))
                .collect();
            let synthesized = BackfillService::next_unused(topic, short, |candidate| {
                let identity = question_identity(topic, &candidate.question_text);
                served.contains(&identity) || in_quiz.contains(&identity)
            });
            log::info!("Backfilled {} question(s) for '{}'", synthesized.len(), topic);
            accepted.extend(synthesized);
            advance(&mut state, AssemblyState::Backfilled, topic);
        }

        accepted.truncate(requested);
        for (position, question) in accepted.iter_mut().enumerate() {
            question.question_number = position as u32 + 1;
        }

        if accepted.is_empty() {
            advance(&mut state, AssemblyState::Failed, topic);
            return Err(AppError::BatchGenerationFailed {
                topic: topic.to_string(),
            });
        }

        let report = ResponseParser::validate_quiz(&accepted);
        if !report.is_clean() {
            for warning in report.errors.iter().chain(&report.warnings) {
                log::warn!("Quiz for '{}': {}", topic, warning);
            }
        }
        advance(&mut state, AssemblyState::Finalized, topic);

        match self.history.record_served(topic, &accepted).await {
            Ok(added) => log::info!(
                "Served {} question(s) for '{}' ({} new)",
                accepted.len(),
                topic,
                added
            ),
            Err(e) => log::warn!("Failed to record served questions for '{}': {}", topic, e),
        }
        advance(&mut state, AssemblyState::Recorded, topic);

        Ok(accepted)
    }

    /// Drops history for one topic, or for every topic when `topic` is `None`.
    pub async fn clear_history(&self, topic: Option<&str>) -> AppResult<()> {
        self.history.clear(topic).await?;
        match topic {
            Some(topic) => log::info!("Cleared question history for '{}'", topic),
            None => log::info!("Cleared question history for all topics"),
        }
        Ok(())
    }

    fn accept(
        &self,
        topic: &str,
        candidates: Vec<CandidateQuestion>,
        served: &HashSet<String>,
        batch_identities: &mut HashSet<String>,
        accepted: &mut Vec<CandidateQuestion>,
    ) {
        if self.settings.uniqueness_policy == UniquenessPolicy::Permissive {
            accepted.extend(candidates);
            return;
        }

        for candidate in candidates {
            let identity = question_identity(topic, &candidate.question_text);
            if served.contains(&identity) {
                log::debug!("Skipping already served question for '{}'", topic);
                continue;
            }
            if !batch_identities.insert(identity) {
                log::debug!("Skipping duplicate question in batch for '{}'", topic);
                continue;
            }
            accepted.push(candidate);
        }
    }

    async fn generate_with_retry(&self, request: &GeneratorRequest) -> AppResult<String> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.call_generator(request).await {
                Ok(raw) => return Ok(raw),
                Err(err) if err.is_retryable() && attempt <= self.settings.max_retries => {
                    let delay = self.settings.retry_backoff_secs * attempt as f64;
                    log::warn!(
                        "Generator attempt {} for '{}' failed ({}), retrying in {:.1}s",
                        attempt,
                        request.topic,
                        err,
                        delay
                    );
                    tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                }
                Err(GeneratorError::Auth(message)) => {
                    log::error!("Generator rejected credentials: {}", message);
                    return Err(AppError::Unauthorized(message));
                }
                Err(GeneratorError::RateLimited(message)) | Err(GeneratorError::Transient(message)) => {
                    log::error!(
                        "Generator unavailable for '{}' after {} attempt(s): {}",
                        request.topic,
                        attempt,
                        message
                    );
                    return Err(AppError::GeneratorUnavailable {
                        attempts: attempt,
                        message,
                    });
                }
            }
        }
    }

    async fn call_generator(&self, request: &GeneratorRequest) -> Result<String, GeneratorError> {
        match self.settings.timeout {
            Some(limit) => tokio::time::timeout(limit, self.generator.generate(request))
                .await
                .unwrap_or_else(|_| {
                    Err(GeneratorError::Transient(format!(
                        "timed out after {}s",
                        limit.as_secs()
                    )))
                }),
            None => self.generator.generate(request).await,
        }
    }
}

fn advance(state: &mut AssemblyState, next: AssemblyState, topic: &str) {
    log::debug!("Quiz for '{}': {:?} -> {:?}", topic, state, next);
    *state = next;
}
