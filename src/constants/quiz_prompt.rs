pub const QUIZ_SYSTEM_PROMPT: &str =
    "You are an expert educational content creator. Generate high-quality quiz questions.";

/// Reference content longer than this is cut before it reaches the prompt.
pub const CONTENT_HINT_MAX_CHARS: usize = 1000;

const QUESTION_FORMAT: &str = "Q1. [Write a clear, specific question about {topic} - make it unique from other questions]
A) [Write a complete, meaningful answer option - NOT a placeholder]
B) [Write a complete, meaningful answer option - NOT a placeholder]
C) [Write a complete, meaningful answer option - NOT a placeholder]
D) [Write a complete, meaningful answer option - NOT a placeholder]
Correct Answer: [Write the letter A, B, C, or D]
Explanation: [Provide a clear explanation of why this answer is correct]";

const MULTIPLE_CHOICE_PROMPT: &str = "Generate {count} UNIQUE, high-quality multiple choice questions specifically about {topic}.

{reference}

CRITICAL REQUIREMENTS:
- Each question must be UNIQUE and test different aspects of {topic}
- NO duplicate questions or similar question patterns
- Each question must be specifically relevant to {topic}
- Cover different subtopics, concepts, and difficulty levels within {topic}

IMPORTANT: Each question must follow this EXACT format:

{format}

Requirements:
- Questions must be specific and test understanding of {topic}
- All 4 options (A, B, C, D) must be complete sentences/phrases, NOT placeholders
- Options should be plausible but clearly distinguishable
- Only one option should be correct
- Explanations should help students understand the concept
- Vary difficulty from basic to advanced
- NO repetition of question patterns or similar wording";

const ADDITIONAL_QUESTIONS_PROMPT: &str = "Generate {count} ADDITIONAL, UNIQUE multiple choice questions about {topic}.

{reference}

CRITICAL: These questions must be COMPLETELY DIFFERENT from any previous questions about {topic}.
Focus on different aspects, subtopics, or perspectives of {topic}.

IMPORTANT: Each question must follow this EXACT format:

{format}

Requirements:
- Questions must be about DIFFERENT aspects of {topic} than previous questions
- All 4 options must be complete sentences/phrases, NOT placeholders
- Only one option should be correct
- Vary difficulty and focus areas within {topic}";

fn reference_section(content_hint: Option<&str>) -> String {
    match content_hint.map(str::trim).filter(|hint| !hint.is_empty()) {
        Some(hint) => {
            let truncated: String = hint.chars().take(CONTENT_HINT_MAX_CHARS).collect();
            format!("Use the following content as reference: {}", truncated)
        }
        None => String::new(),
    }
}

fn render(template: &str, topic: &str, content_hint: Option<&str>, count: u32) -> String {
    template
        .replace("{format}", QUESTION_FORMAT)
        .replace("{count}", &count.to_string())
        .replace("{topic}", topic)
        .replace("{reference}", &reference_section(content_hint))
}

pub fn multiple_choice_prompt(topic: &str, content_hint: Option<&str>, count: u32) -> String {
    render(MULTIPLE_CHOICE_PROMPT, topic, content_hint, count)
}

pub fn additional_questions_prompt(topic: &str, content_hint: Option<&str>, count: u32) -> String {
    render(ADDITIONAL_QUESTIONS_PROMPT, topic, content_hint, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_topic_count_and_format() {
        let prompt = multiple_choice_prompt("IoT", None, 5);
        assert!(prompt.starts_with("Generate 5 UNIQUE"));
        assert!(prompt.contains("specifically about IoT"));
        assert!(prompt.contains("Correct Answer: [Write the letter A, B, C, or D]"));
        assert!(!prompt.contains("{topic}"));
        assert!(!prompt.contains("reference:"));
    }

    #[test]
    fn test_content_hint_is_truncated() {
        let hint = "x".repeat(CONTENT_HINT_MAX_CHARS + 500);
        let prompt = additional_questions_prompt("IoT", Some(&hint), 2);
        assert!(prompt.contains("ADDITIONAL"));
        assert!(prompt.contains(&"x".repeat(CONTENT_HINT_MAX_CHARS)));
        assert!(!prompt.contains(&"x".repeat(CONTENT_HINT_MAX_CHARS + 1)));
    }
}
