use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::domain::{
    normalize_question_text, CandidateQuestion, OptionLabel, QuestionSource, QuestionType,
    ValidationError,
};

static QUESTION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:\*\*)?Q(?:uestion)?[ \t]*\d+[ \t]*[.):\-]?(?:\*\*)?[ \t]*")
        .expect("QUESTION_MARKER is a valid regex pattern")
});

static OPTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?([A-D])[.)](?:\s+|$)(.*)$").expect("OPTION_LINE is a valid regex pattern")
});

static CORRECT_ANSWER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^correct[ \t]+answer\b[ \t]*[:\-]?(.*)$")
        .expect("CORRECT_ANSWER_LINE is a valid regex pattern")
});

static EXPLANATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^explanation\b[ \t]*[:\-]?(.*)$")
        .expect("EXPLANATION_LINE is a valid regex pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Question,
    Options,
    Answer,
    Explanation,
}

/// Every block found in one generator response, valid or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBatch {
    pub candidates: Vec<CandidateQuestion>,
}

impl ParsedBatch {
    pub fn valid_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.candidates.len() - self.valid_count()
    }

    pub fn invalid(&self) -> impl Iterator<Item = &CandidateQuestion> {
        self.candidates.iter().filter(|c| !c.is_valid())
    }

    pub fn into_valid(self) -> Vec<CandidateQuestion> {
        self.candidates.into_iter().filter(|c| c.is_valid()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuizValidationReport {
    pub total_questions: usize,
    pub valid_questions: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl QuizValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Splits a generator response on question markers and parses each block.
    /// Text before the first marker is ignored.
    pub fn parse(raw: &str, question_type: QuestionType) -> ParsedBatch {
        let starts: Vec<(usize, usize)> = QUESTION_MARKER
            .find_iter(raw)
            .map(|m| (m.start(), m.end()))
            .collect();

        let candidates = starts
            .iter()
            .enumerate()
            .map(|(index, &(_, body_start))| {
                let body_end = starts
                    .get(index + 1)
                    .map(|&(next_start, _)| next_start)
                    .unwrap_or(raw.len());
                Self::parse_block(&raw[body_start..body_end], index as u32 + 1, question_type)
            })
            .collect::<Vec<_>>();

        let batch = ParsedBatch { candidates };
        for invalid in batch.invalid() {
            if let Some(reason) = &invalid.invalid_reason {
                log::debug!("Question {}: {}", invalid.question_number, reason);
            }
        }
        batch
    }

    fn parse_block(block: &str, question_number: u32, question_type: QuestionType) -> CandidateQuestion {
        let mut section = Section::Question;
        let mut question_parts: Vec<&str> = Vec::new();
        let mut options: BTreeMap<OptionLabel, String> = BTreeMap::new();
        let mut raw_answer = String::new();
        let mut explanation = String::new();

        for line in block.lines() {
            let line = line.trim().trim_start_matches('*').trim_start();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = OPTION_LINE.captures(line) {
                section = Section::Options;
                if let Some(label) = OptionLabel::parse_answer(&caps[1]) {
                    options.insert(label, clean_value(&caps[2]));
                }
            } else if let Some(caps) = CORRECT_ANSWER_LINE.captures(line) {
                section = Section::Answer;
                raw_answer = clean_value(&caps[1]);
            } else if let Some(caps) = EXPLANATION_LINE.captures(line) {
                section = Section::Explanation;
                explanation = clean_value(&caps[1]);
            } else {
                match section {
                    Section::Question => question_parts.push(line),
                    Section::Explanation => {
                        if !explanation.is_empty() {
                            explanation.push(' ');
                        }
                        explanation.push_str(line);
                    }
                    Section::Options | Section::Answer => {
                        log::debug!("Question {}: ignoring unclassified line", question_number);
                    }
                }
            }
        }

        let mut candidate = CandidateQuestion {
            question_number,
            question_type,
            question_text: question_parts.join(" ").trim().to_string(),
            options,
            correct_answer: OptionLabel::parse_answer(&raw_answer),
            explanation,
            source: QuestionSource::Generated,
            invalid_reason: None,
        };
        candidate.invalid_reason = Self::validate(&candidate, &raw_answer);
        candidate
    }

    fn validate(candidate: &CandidateQuestion, raw_answer: &str) -> Option<ValidationError> {
        match candidate.structural_error() {
            Some(ValidationError::MissingCorrectAnswer) if !raw_answer.is_empty() => {
                if candidate.explanation.trim().is_empty() {
                    Some(ValidationError::MissingExplanation)
                } else {
                    Some(ValidationError::UnknownCorrectAnswer(raw_answer.to_string()))
                }
            }
            other => other,
        }
    }

    /// Reports invalid entries plus duplicate questions and duplicate option
    /// sets within one quiz.
    pub fn validate_quiz(questions: &[CandidateQuestion]) -> QuizValidationReport {
        let mut report = QuizValidationReport {
            total_questions: questions.len(),
            ..Default::default()
        };
        let mut seen_texts = HashSet::new();
        let mut seen_option_sets = HashSet::new();

        for question in questions {
            if let Some(reason) = &question.invalid_reason {
                report
                    .errors
                    .push(format!("Question {}: {}", question.question_number, reason));
                continue;
            }

            report.valid_questions += 1;

            let mut option_texts: Vec<&str> = question.options.values().map(String::as_str).collect();
            option_texts.sort_unstable();
            if !seen_option_sets.insert(option_texts.join("|")) {
                report.warnings.push(format!(
                    "Question {}: Duplicate option set detected",
                    question.question_number
                ));
            }

            if !seen_texts.insert(normalize_question_text(&question.question_text)) {
                report.warnings.push(format!(
                    "Question {}: Duplicate question detected",
                    question.question_number
                ));
            }
        }

        report
    }
}

fn clean_value(value: &str) -> String {
    value.trim().trim_matches('*').trim().to_string()
}
