/// A topic template rendered by the offline generator. `{topic}` is substituted.
pub struct OfflineTemplate {
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: &'static str,
    pub explanation: &'static str,
}

pub const OFFLINE_TEMPLATES: [OfflineTemplate; 15] = [
    OfflineTemplate {
        question: "What is the primary purpose of {topic}?",
        options: [
            "To provide fundamental understanding of {topic} concepts",
            "To implement advanced algorithms in {topic}",
            "To solve complex problems using {topic}",
            "To optimize performance in {topic} systems",
        ],
        correct_answer: "A",
        explanation: "The primary purpose of {topic} is to provide fundamental understanding of its core concepts and principles.",
    },
    OfflineTemplate {
        question: "Which of the following is a key characteristic of {topic}?",
        options: [
            "Scalability in {topic} applications",
            "Efficiency in {topic} processing",
            "Reliability in {topic} systems",
            "All of the above are key characteristics",
        ],
        correct_answer: "D",
        explanation: "Scalability, efficiency and reliability are all essential in {topic} systems.",
    },
    OfflineTemplate {
        question: "What is the main advantage of using {topic}?",
        options: [
            "Improved performance in {topic} operations",
            "Better resource management in {topic}",
            "Enhanced security in {topic} applications",
            "All of the above advantages",
        ],
        correct_answer: "D",
        explanation: "{topic} provides multiple advantages including improved performance, better resource management, and enhanced security.",
    },
    OfflineTemplate {
        question: "How does {topic} contribute to modern technology?",
        options: [
            "By providing innovative solutions in {topic}",
            "Through automation and efficiency in {topic}",
            "By enabling data-driven decisions in {topic}",
            "All of the above contributions",
        ],
        correct_answer: "D",
        explanation: "{topic} contributes to modern technology through innovation, automation, and data-driven approaches.",
    },
    OfflineTemplate {
        question: "What are the core principles underlying {topic}?",
        options: [
            "Modularity and reusability in {topic}",
            "Scalability and performance in {topic}",
            "Security and reliability in {topic}",
            "All of the above principles",
        ],
        correct_answer: "D",
        explanation: "The core principles of {topic} include modularity, scalability, security, and reliability.",
    },
    OfflineTemplate {
        question: "Which approach is most effective for learning {topic}?",
        options: [
            "Hands-on practice with {topic}",
            "Theoretical study of {topic} concepts",
            "Combination of theory and practice",
            "Memorization of {topic} facts",
        ],
        correct_answer: "C",
        explanation: "Learning {topic} effectively requires both theoretical understanding and practical application.",
    },
    OfflineTemplate {
        question: "What challenges are commonly faced in {topic} implementation?",
        options: [
            "Complexity and integration issues",
            "Performance and scalability concerns",
            "Security and maintenance challenges",
            "All of the above challenges",
        ],
        correct_answer: "D",
        explanation: "Common challenges in {topic} include complexity, performance, security, and maintenance issues.",
    },
    OfflineTemplate {
        question: "How has {topic} evolved in recent years?",
        options: [
            "Through technological advancements",
            "By adopting new methodologies",
            "Through increased automation",
            "All of the above developments",
        ],
        correct_answer: "D",
        explanation: "{topic} has evolved through technological advancements, new methodologies, and increased automation.",
    },
    OfflineTemplate {
        question: "What role does {topic} play in industry applications?",
        options: [
            "Enabling digital transformation",
            "Improving operational efficiency",
            "Supporting innovation and growth",
            "All of the above roles",
        ],
        correct_answer: "D",
        explanation: "{topic} plays a crucial role in digital transformation, efficiency improvement, and innovation support.",
    },
    OfflineTemplate {
        question: "What future trends are expected in {topic}?",
        options: [
            "Artificial intelligence integration",
            "Cloud-native architectures",
            "Enhanced automation capabilities",
            "All of the above trends",
        ],
        correct_answer: "D",
        explanation: "Future trends in {topic} include AI integration, cloud-native approaches, and enhanced automation.",
    },
    OfflineTemplate {
        question: "What is the most critical factor in successful {topic} deployment?",
        options: [
            "Proper planning and strategy for {topic}",
            "Skilled personnel and expertise in {topic}",
            "Adequate resources and infrastructure for {topic}",
            "All factors are equally critical",
        ],
        correct_answer: "D",
        explanation: "Successful {topic} deployment requires proper planning, skilled personnel, and adequate resources.",
    },
    OfflineTemplate {
        question: "How does {topic} compare to traditional approaches?",
        options: [
            "{topic} offers better efficiency than traditional methods",
            "{topic} provides more flexibility than traditional approaches",
            "{topic} enables better scalability than traditional systems",
            "{topic} offers advantages in all these areas",
        ],
        correct_answer: "D",
        explanation: "{topic} provides significant advantages over traditional approaches in efficiency, flexibility, and scalability.",
    },
    OfflineTemplate {
        question: "What skills are essential for working with {topic}?",
        options: [
            "Technical knowledge of {topic} fundamentals",
            "Problem-solving and analytical skills",
            "Communication and collaboration abilities",
            "All of these skills are essential",
        ],
        correct_answer: "D",
        explanation: "Working with {topic} requires technical knowledge, problem-solving skills, and communication abilities.",
    },
    OfflineTemplate {
        question: "What impact does {topic} have on organizational productivity?",
        options: [
            "Increased efficiency in {topic} processes",
            "Better decision-making through {topic} insights",
            "Enhanced collaboration in {topic} teams",
            "All of the above impacts",
        ],
        correct_answer: "D",
        explanation: "{topic} enhances organizational productivity through increased efficiency, better decision-making, and enhanced collaboration.",
    },
    OfflineTemplate {
        question: "What are the key considerations for {topic} security?",
        options: [
            "Data protection and privacy in {topic}",
            "Access control and authentication for {topic}",
            "Compliance and regulatory requirements for {topic}",
            "All of the above considerations",
        ],
        correct_answer: "D",
        explanation: "{topic} security requires attention to data protection, access control, and compliance requirements.",
    },
];

/// Focus areas used for follow-up requests. `{topic}` is substituted.
pub const FOLLOW_UP_VARIATIONS: [&str; 10] = [
    "Advanced {topic} Concepts",
    "Practical {topic} Applications",
    "Industry {topic} Standards",
    "Modern {topic} Trends",
    "Real-world {topic} Scenarios",
    "Emerging {topic} Technologies",
    "Best Practices in {topic}",
    "Common Pitfalls in {topic}",
    "Future of {topic}",
    "Integration of {topic} with Other Technologies",
];

pub const FOLLOW_UP_QUESTIONS: [&str; 5] = [
    "What are the key aspects of {variation}?",
    "How does {variation} impact modern technology?",
    "What challenges are associated with {variation}?",
    "What benefits does {variation} provide?",
    "How is {variation} implemented in practice?",
];
