use sha2::{Digest, Sha256};

/// Trims, collapses whitespace runs to a single space and lowercases.
pub fn normalize_question_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Content identity of a question within a topic.
///
/// The topic is part of the key so identical wording under two topics is
/// tracked separately.
pub fn question_identity(topic: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(topic.as_bytes());
    hasher.update([0u8]);
    hasher.update(normalize_question_text(text).as_bytes());
    format!("{:x}", hasher.finalize())
}
