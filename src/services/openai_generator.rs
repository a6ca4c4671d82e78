use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;

use crate::config::Config;
use crate::constants::quiz_prompt::{
    additional_questions_prompt, multiple_choice_prompt, QUIZ_SYSTEM_PROMPT,
};
use crate::errors::{AppError, AppResult};
use crate::services::question_generator::{GeneratorError, GeneratorRequest, QuestionGenerator};

/// Chat-completion backed generator.
pub struct OpenAiQuestionGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiQuestionGenerator {
    pub fn new(config: &Config) -> AppResult<Self> {
        let api_key = config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| AppError::ConfigError("OPENAI_API_KEY is not set".to_string()))?;

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        if let Some(api_base) = &config.openai_api_base {
            openai_config = openai_config.with_api_base(api_base);
        }

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        })
    }

    fn prompt_for(request: &GeneratorRequest) -> String {
        let hint = request.content_hint.as_deref();
        if request.follow_up {
            additional_questions_prompt(&request.topic, hint, request.count)
        } else {
            multiple_choice_prompt(&request.topic, hint, request.count)
        }
    }
}

static AUTH_STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:status|http|code)\W{0,3}401\b")
        .expect("AUTH_STATUS is a valid regex pattern")
});

static RATE_LIMIT_STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:status|http|code)\W{0,3}429\b")
        .expect("RATE_LIMIT_STATUS is a valid regex pattern")
});

/// Classifies a structured API error by its `code` and `type` fields, falling
/// back to the message when neither is recognised.
pub fn classify_api_error(code: Option<&str>, kind: Option<&str>, message: &str) -> GeneratorError {
    match (code, kind) {
        (Some("invalid_api_key"), _) | (_, Some("authentication_error")) => {
            GeneratorError::Auth(message.to_string())
        }
        (Some("rate_limit_exceeded" | "insufficient_quota"), _)
        | (_, Some("rate_limit_error" | "insufficient_quota" | "requests" | "tokens")) => {
            GeneratorError::RateLimited(message.to_string())
        }
        _ => classify_error_message(message),
    }
}

/// Maps a backend failure onto the generator error taxonomy by its message.
pub fn classify_error_message(message: &str) -> GeneratorError {
    let lowered = message.to_lowercase();
    if lowered.contains("invalid_api_key")
        || lowered.contains("incorrect api key")
        || AUTH_STATUS.is_match(message)
    {
        GeneratorError::Auth(message.to_string())
    } else if RATE_LIMIT_STATUS.is_match(message)
        || lowered.contains("rate limit")
        || lowered.contains("quota")
    {
        GeneratorError::RateLimited(message.to_string())
    } else {
        GeneratorError::Transient(message.to_string())
    }
}

impl From<OpenAIError> for GeneratorError {
    fn from(err: OpenAIError) -> Self {
        match &err {
            OpenAIError::ApiError(api) => {
                classify_api_error(api.code.as_deref(), api.r#type.as_deref(), &err.to_string())
            }
            OpenAIError::Reqwest(inner) => match inner.status().map(|status| status.as_u16()) {
                Some(401) => GeneratorError::Auth(err.to_string()),
                Some(429) => GeneratorError::RateLimited(err.to_string()),
                _ => classify_error_message(&err.to_string()),
            },
            _ => classify_error_message(&err.to_string()),
        }
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiQuestionGenerator {
    async fn generate(&self, request: &GeneratorRequest) -> Result<String, GeneratorError> {
        log::debug!(
            "Requesting {} question(s) for '{}' from {} (follow_up={})",
            request.count,
            request.topic,
            self.model,
            request.follow_up
        );

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(QUIZ_SYSTEM_PROMPT)
            .build()?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(Self::prompt_for(request))
            .build()?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .build()?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            log::warn!("Chat completion failed for '{}': {}", request.topic, e);
            GeneratorError::from(e)
        })?;

        Ok(response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuestionType;
    use secrecy::SecretString;

    #[test]
    fn test_classifies_auth_failures() {
        assert!(matches!(
            classify_error_message("Incorrect API key provided: sk-***"),
            GeneratorError::Auth(_)
        ));
        assert!(matches!(
            classify_error_message("invalid_api_key"),
            GeneratorError::Auth(_)
        ));
    }

    #[test]
    fn test_classifies_rate_limits_and_quota() {
        assert!(matches!(
            classify_error_message("Rate limit reached for gpt-3.5-turbo"),
            GeneratorError::RateLimited(_)
        ));
        assert!(matches!(
            classify_error_message("You exceeded your current quota"),
            GeneratorError::RateLimited(_)
        ));
        assert!(matches!(
            classify_error_message("status 429"),
            GeneratorError::RateLimited(_)
        ));
    }

    #[test]
    fn test_status_codes_need_a_status_prefix() {
        assert!(matches!(
            classify_error_message("HTTP status 401 Unauthorized"),
            GeneratorError::Auth(_)
        ));
        assert!(matches!(
            classify_error_message("request req_40112 failed after 1401 tokens"),
            GeneratorError::Transient(_)
        ));
        assert!(matches!(
            classify_error_message("stream closed at byte 4290"),
            GeneratorError::Transient(_)
        ));
    }

    #[test]
    fn test_api_error_fields_take_precedence_over_message() {
        assert!(matches!(
            classify_api_error(Some("invalid_api_key"), None, "unauthorized"),
            GeneratorError::Auth(_)
        ));
        assert!(matches!(
            classify_api_error(Some("insufficient_quota"), Some("insufficient_quota"), "billing"),
            GeneratorError::RateLimited(_)
        ));
        assert!(matches!(
            classify_api_error(None, Some("server_error"), "upstream 401 retry"),
            GeneratorError::Transient(_)
        ));
        assert!(matches!(
            classify_api_error(None, None, "Rate limit reached"),
            GeneratorError::RateLimited(_)
        ));
    }

    #[test]
    fn test_everything_else_is_transient() {
        assert!(matches!(
            classify_error_message("connection reset by peer"),
            GeneratorError::Transient(_)
        ));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = Config::test_config();
        assert!(matches!(
            OpenAiQuestionGenerator::new(&config),
            Err(AppError::ConfigError(_))
        ));

        let mut config = Config::test_config();
        config.openai_api_key = Some(SecretString::from("sk-test".to_string()));
        assert!(OpenAiQuestionGenerator::new(&config).is_ok());
    }

    #[test]
    fn test_follow_up_requests_use_additional_prompt() {
        let mut request = GeneratorRequest {
            topic: "IoT".to_string(),
            content_hint: None,
            count: 2,
            question_type: QuestionType::MultipleChoice,
            temperature: 0.8,
            max_tokens: 160,
            follow_up: true,
        };
        assert!(OpenAiQuestionGenerator::prompt_for(&request).contains("ADDITIONAL"));

        request.follow_up = false;
        assert!(!OpenAiQuestionGenerator::prompt_for(&request).contains("ADDITIONAL"));
    }
}
