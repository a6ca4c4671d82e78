use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use sha2::{Digest, Sha256};

use crate::constants::backfill_bank::{
    with_topic, ALL_OF_THE_ABOVE, OPTION_PATTERNS, QUESTION_PATTERNS, SYNTHETIC_EXPLANATION,
};
use crate::models::domain::{CandidateQuestion, OptionLabel, QuestionSource, QuestionType};

/// Upper bound on indices scanned by `next_unused` before giving up.
const MAX_SCAN: u32 = 10_000;

/// Builds template questions when the generator comes up short.
pub struct BackfillService;

impl BackfillService {
    /// Synthesizes `count` questions starting at index 1.
    pub fn synthesize(topic: &str, count: u32) -> Vec<CandidateQuestion> {
        Self::synthesize_from(topic, 1, count)
    }

    pub fn synthesize_from(topic: &str, start: u32, count: u32) -> Vec<CandidateQuestion> {
        (start..start.saturating_add(count))
            .map(|index| Self::synthesize_one(topic, index))
            .collect()
    }

    /// Walks the synthetic sequence from index 1 and keeps the first `count`
    /// items for which `is_used` returns false.
    pub fn next_unused<F>(topic: &str, count: u32, mut is_used: F) -> Vec<CandidateQuestion>
    where
        F: FnMut(&CandidateQuestion) -> bool,
    {
        let mut picked = Vec::with_capacity(count as usize);
        let mut index = 1;

        while picked.len() < count as usize && index <= MAX_SCAN {
            let candidate = Self::synthesize_one(topic, index);
            if !is_used(&candidate) {
                picked.push(candidate);
            }
            index += 1;
        }

        if picked.len() < count as usize {
            log::warn!(
                "Backfill for '{}' exhausted {} indices with {} of {} unused",
                topic,
                MAX_SCAN,
                picked.len(),
                count
            );
        }
        picked
    }

    /// Deterministic synthetic question for a 1-based index.
    pub fn synthesize_one(topic: &str, index: u32) -> CandidateQuestion {
        let index = index.max(1);
        let position = (index - 1) as usize;
        let cycle = position / QUESTION_PATTERNS.len();

        let mut question_text = with_topic(QUESTION_PATTERNS[position % QUESTION_PATTERNS.len()], topic);
        if cycle > 0 {
            question_text = format!("{} (Variation {})", question_text, cycle);
        }

        let mut option_pool: Vec<String> = OPTION_PATTERNS
            .iter()
            .map(|pattern| with_topic(pattern, topic))
            .collect();
        let mut rng = StdRng::seed_from_u64(seed_for(topic, index));
        option_pool.shuffle(&mut rng);

        let mut options: BTreeMap<OptionLabel, String> = OptionLabel::ALL[..3]
            .iter()
            .copied()
            .zip(option_pool)
            .collect();
        options.insert(OptionLabel::D, ALL_OF_THE_ABOVE.to_string());

        CandidateQuestion {
            question_number: index,
            question_type: QuestionType::MultipleChoice,
            question_text,
            options,
            correct_answer: Some(OptionLabel::D),
            explanation: with_topic(SYNTHETIC_EXPLANATION, topic),
            source: QuestionSource::Synthesized,
            invalid_reason: None,
        }
    }
}

fn seed_for(topic: &str, index: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(topic.as_bytes());
    hasher.update([0u8]);
    hasher.update(index.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
