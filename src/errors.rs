use thiserror::Error;

use crate::services::question_generator::GeneratorError;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Generator unavailable after {attempts} attempt(s): {message}")]
    GeneratorUnavailable { attempts: u32, message: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Batch generation failed: no valid questions for topic '{topic}'")]
    BatchGenerationFailed { topic: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::GeneratorUnavailable { .. } => "GENERATOR_UNAVAILABLE",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::BatchGenerationFailed { .. } => "BATCH_GENERATION_FAILED",
            AppError::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized(_) => {
                "Invalid OpenAI API key. Please check OPENAI_API_KEY in your environment.".to_string()
            }
            AppError::GeneratorUnavailable { .. } => {
                "OpenAI rate limit or quota exceeded. Try again later, reduce the question count, \
                 or enable offline mode by setting OPENAI_MOCK=1."
                    .to_string()
            }
            other => format!("Error generating quiz questions: {}", other),
        }
    }
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Auth(message) => AppError::Unauthorized(message),
            GeneratorError::RateLimited(message) | GeneratorError::Transient(message) => {
                AppError::GeneratorUnavailable {
                    attempts: 1,
                    message,
                }
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::StorageError(format!("JSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
