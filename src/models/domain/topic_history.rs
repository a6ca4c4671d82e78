use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Persisted summary of one scored quiz.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResultSummary {
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default = "unknown_quiz_type")]
    pub quiz_type: String,
}

fn unknown_quiz_type() -> String {
    "unknown".to_string()
}

/// Parses an ISO-8601 timestamp. Values without an offset are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|naive| naive.and_utc())
                .ok()
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

/// Served-question identities and quiz results for one topic.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TopicHistory {
    #[serde(default)]
    pub question_hashes: BTreeSet<String>,
    #[serde(default)]
    pub question_count: usize,
    #[serde(default)]
    pub total_questions_served: u64,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub quiz_results: Vec<QuizResultSummary>,
}

impl Default for TopicHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicHistory {
    pub fn new() -> Self {
        Self {
            question_hashes: BTreeSet::new(),
            question_count: 0,
            total_questions_served: 0,
            last_updated: Utc::now(),
            quiz_results: Vec::new(),
        }
    }

    /// Inserts identities not seen before and returns how many were new.
    pub fn record_identities<I>(&mut self, identities: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let added = identities
            .into_iter()
            .map(|identity| self.question_hashes.insert(identity))
            .filter(|inserted| *inserted)
            .count();

        self.question_count = self.question_hashes.len();
        self.total_questions_served += added as u64;
        self.last_updated = Utc::now();
        added
    }

    pub fn append_result(&mut self, summary: QuizResultSummary) {
        self.quiz_results.push(summary);
        self.last_updated = Utc::now();
    }

    /// Restores derived fields and the served-count invariant after loading
    /// a document written by another process or version.
    pub fn repair(&mut self) {
        self.question_count = self.question_hashes.len();
        self.total_questions_served = self
            .total_questions_served
            .max(self.question_hashes.len() as u64);
    }

    pub fn average_score(&self) -> f64 {
        if self.quiz_results.is_empty() {
            return 0.0;
        }
        let total: f64 = self.quiz_results.iter().map(|r| r.percentage).sum();
        round_one_decimal(total / self.quiz_results.len() as f64)
    }

    pub fn best_score(&self) -> f64 {
        self.quiz_results
            .iter()
            .map(|r| r.percentage)
            .fold(None, |best: Option<f64>, p| Some(best.map_or(p, |b| b.max(p))))
            .map(round_one_decimal)
            .unwrap_or(0.0)
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
