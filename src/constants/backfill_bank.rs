pub const QUESTION_PATTERNS: [&str; 20] = [
    "What are the key aspects of {topic}?",
    "How does {topic} work in practice?",
    "Which factors influence {topic} implementation?",
    "What role does {topic} play in modern technology?",
    "How is {topic} typically implemented?",
    "What are the main benefits of using {topic}?",
    "What challenges commonly arise in {topic}?",
    "How has {topic} evolved over time?",
    "What are the practical applications of {topic}?",
    "How can {topic} performance be optimized?",
    "What makes {topic} effective?",
    "How does {topic} compare to alternatives?",
    "What skills are needed for {topic}?",
    "How does {topic} impact business operations?",
    "What are the security considerations in {topic}?",
    "How is {topic} integrated with other systems?",
    "What tools are commonly used with {topic}?",
    "How do you troubleshoot {topic} issues?",
    "What are the best practices for {topic}?",
    "How do you measure {topic} success?",
];

pub const OPTION_PATTERNS: [&str; 15] = [
    "Core principles and fundamentals of {topic}",
    "Advanced techniques and methodologies in {topic}",
    "Practical applications and real-world uses of {topic}",
    "Industry standards and best practices for {topic}",
    "Emerging trends and future developments in {topic}",
    "Integration and compatibility aspects of {topic}",
    "Performance optimization strategies in {topic}",
    "Security and reliability considerations in {topic}",
    "Cost-effectiveness and efficiency in {topic}",
    "Scalability and maintenance of {topic} systems",
    "Quality assurance and testing in {topic}",
    "Documentation and training for {topic}",
    "Monitoring and analytics for {topic}",
    "Automation and workflow optimization in {topic}",
    "Compliance and regulatory aspects of {topic}",
];

pub const ALL_OF_THE_ABOVE: &str = "All of the above";

pub const SYNTHETIC_EXPLANATION: &str = "This question covers multiple important aspects of {topic} including various concepts, techniques, and applications.";

pub fn with_topic(template: &str, topic: &str) -> String {
    template.replace("{topic}", topic)
}
