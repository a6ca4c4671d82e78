use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }

    /// Resolves answers such as `"b"`, `"B)"`, `"B. Sensors"` or `"(B)"`.
    pub fn parse_answer(raw: &str) -> Option<OptionLabel> {
        let trimmed = raw.trim().trim_start_matches(['(', '[']);
        let mut chars = trimmed.chars();
        let first = chars.next()?;
        let label = match first.to_ascii_uppercase() {
            'A' => OptionLabel::A,
            'B' => OptionLabel::B,
            'C' => OptionLabel::C,
            'D' => OptionLabel::D,
            _ => return None,
        };
        match chars.next() {
            None => Some(label),
            Some(next) if !next.is_alphanumeric() => Some(label),
            Some(_) => None,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "multiple_choice" | "mcq" => Ok(QuestionType::MultipleChoice),
            other => Err(AppError::ValidationError(format!(
                "Unsupported question type '{}'",
                other
            ))),
        }
    }
}

/// Where a candidate came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    #[default]
    Generated,
    Synthesized,
}

/// Why a parsed candidate cannot be served.
#[derive(Clone, Debug, PartialEq, Eq, Error, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Missing question text")]
    MissingQuestionText,

    #[error("Missing options (found {found}/4)")]
    MissingOptions { found: usize },

    #[error("Missing correct answer")]
    MissingCorrectAnswer,

    #[error("Missing explanation")]
    MissingExplanation,

    #[error("Correct answer '{0}' is not one of A-D")]
    UnknownCorrectAnswer(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CandidateQuestion {
    pub question_number: u32,
    #[serde(default)]
    pub question_type: QuestionType,
    pub question_text: String,
    pub options: BTreeMap<OptionLabel, String>,
    pub correct_answer: Option<OptionLabel>,
    pub explanation: String,
    #[serde(default)]
    pub source: QuestionSource,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub invalid_reason: Option<ValidationError>,
}

impl CandidateQuestion {
    pub fn is_valid(&self) -> bool {
        self.invalid_reason.is_none()
    }

    pub fn option_text(&self, label: OptionLabel) -> Option<&str> {
        self.options.get(&label).map(String::as_str)
    }

    /// Runs the structural checks in order and returns the first failure.
    pub fn structural_error(&self) -> Option<ValidationError> {
        if self.question_text.trim().is_empty() {
            return Some(ValidationError::MissingQuestionText);
        }

        let found = self
            .options
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .count();
        if found < OptionLabel::ALL.len() {
            return Some(ValidationError::MissingOptions { found });
        }

        if self.correct_answer.is_none() {
            return Some(ValidationError::MissingCorrectAnswer);
        }

        if self.explanation.trim().is_empty() {
            return Some(ValidationError::MissingExplanation);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_question() -> CandidateQuestion {
        let options = OptionLabel::ALL
            .iter()
            .map(|label| (*label, format!("Option {}", label)))
            .collect();

        CandidateQuestion {
            question_number: 1,
            question_type: QuestionType::MultipleChoice,
            question_text: "What does MQTT stand for?".to_string(),
            options,
            correct_answer: Some(OptionLabel::B),
            explanation: "It is a messaging protocol.".to_string(),
            source: QuestionSource::Generated,
            invalid_reason: None,
        }
    }

    #[test]
    fn test_option_label_parses_common_answer_shapes() {
        assert_eq!(OptionLabel::parse_answer("b"), Some(OptionLabel::B));
        assert_eq!(OptionLabel::parse_answer(" C) "), Some(OptionLabel::C));
        assert_eq!(OptionLabel::parse_answer("D. All of the above"), Some(OptionLabel::D));
        assert_eq!(OptionLabel::parse_answer("(A)"), Some(OptionLabel::A));
        assert_eq!(OptionLabel::parse_answer("E"), None);
        assert_eq!(OptionLabel::parse_answer("Because"), None);
        assert_eq!(OptionLabel::parse_answer(""), None);
    }

    #[test]
    fn test_question_type_parses_and_rejects_unknown() {
        assert_eq!(
            "multiple_choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert_eq!(
            "Multiple Choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn test_structurally_complete_question_has_no_error() {
        assert_eq!(make_question().structural_error(), None);
    }

    #[test]
    fn test_structural_checks_short_circuit_in_order() {
        let mut question = make_question();
        question.question_text = "  ".to_string();
        question.options.clear();
        assert_eq!(question.structural_error(), Some(ValidationError::MissingQuestionText));

        let mut question = make_question();
        question.options.remove(&OptionLabel::D);
        question.correct_answer = None;
        assert_eq!(
            question.structural_error(),
            Some(ValidationError::MissingOptions { found: 3 })
        );

        let mut question = make_question();
        question.correct_answer = None;
        question.explanation.clear();
        assert_eq!(question.structural_error(), Some(ValidationError::MissingCorrectAnswer));

        let mut question = make_question();
        question.explanation.clear();
        assert_eq!(question.structural_error(), Some(ValidationError::MissingExplanation));
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::MissingOptions { found: 2 }.to_string(),
            "Missing options (found 2/4)"
        );
        assert_eq!(ValidationError::MissingQuestionText.to_string(), "Missing question text");
    }

    #[test]
    fn test_candidate_serializes_options_by_label() {
        let json = serde_json::to_value(make_question()).expect("question should serialize");

        assert_eq!(json["options"]["A"], "Option A");
        assert_eq!(json["correct_answer"], "B");
        assert_eq!(json["question_type"], "multiple_choice");
        assert!(json.get("invalid_reason").is_none());
    }
}
