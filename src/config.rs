use std::{env, path::PathBuf, str::FromStr};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

/// Whether previously served questions may be served again for a topic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UniquenessPolicy {
    /// Record history for statistics only; never block generation.
    #[default]
    Permissive,
    /// Drop candidates whose identity was already served for the topic.
    Strict,
}

impl FromStr for UniquenessPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(UniquenessPolicy::Permissive),
            "strict" => Ok(UniquenessPolicy::Strict),
            other => Err(AppError::ConfigError(format!(
                "Unknown uniqueness policy '{}', expected 'strict' or 'permissive'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: Option<SecretString>,
    pub openai_api_base: Option<String>,
    pub openai_model: String,
    pub openai_max_tokens: u32,
    pub openai_temperature: f32,
    pub openai_follow_up_temperature: f32,
    pub openai_mock: bool,
    pub history_file: PathBuf,
    pub uniqueness_policy: UniquenessPolicy,
    pub generator_max_retries: u32,
    pub generator_retry_backoff_secs: f64,
    pub generator_timeout_secs: Option<u64>,
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "True" | "TRUE" | "yes")
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            openai_api_base: env::var("OPENAI_API_BASE").ok(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            openai_max_tokens: env::var("OPENAI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            openai_temperature: env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
            openai_follow_up_temperature: env::var("OPENAI_FOLLOW_UP_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.8),
            openai_mock: env::var("OPENAI_MOCK")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            history_file: env::var("QUESTION_HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("question_history.json")),
            uniqueness_policy: env::var("QUESTION_UNIQUENESS")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(policy) => Some(policy),
                    Err(err) => {
                        log::warn!("{}; falling back to permissive", err);
                        None
                    }
                })
                .unwrap_or_default(),
            generator_max_retries: env::var("GENERATOR_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            generator_retry_backoff_secs: env::var("GENERATOR_RETRY_BACKOFF_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1.5),
            generator_timeout_secs: env::var("GENERATOR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Checks settings that would make every generation attempt fail.
    pub fn validate(&self) -> AppResult<()> {
        if !self.openai_mock {
            let has_key = self
                .openai_api_key
                .as_ref()
                .is_some_and(|key| !key.expose_secret().trim().is_empty());
            if !has_key {
                return Err(AppError::ConfigError(
                    "OPENAI_API_KEY is not set. Configure it or enable offline mode with OPENAI_MOCK=1"
                        .to_string(),
                ));
            }
        }

        if self.generator_retry_backoff_secs < 0.0 {
            return Err(AppError::ConfigError(format!(
                "GENERATOR_RETRY_BACKOFF_SECS must not be negative (got {})",
                self.generator_retry_backoff_secs
            )));
        }

        Ok(())
    }

    /// Token cap for the first generator call.
    pub fn capped_max_tokens(&self) -> u32 {
        self.openai_max_tokens.clamp(128, 800)
    }

    pub fn test_config() -> Self {
        Self {
            openai_api_key: None,
            openai_api_base: None,
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_max_tokens: 500,
            openai_temperature: 0.7,
            openai_follow_up_temperature: 0.8,
            openai_mock: true,
            history_file: PathBuf::from("question_history.test.json"),
            uniqueness_policy: UniquenessPolicy::Permissive,
            generator_max_retries: 2,
            generator_retry_backoff_secs: 0.0,
            generator_timeout_secs: None,
        }
    }
}
