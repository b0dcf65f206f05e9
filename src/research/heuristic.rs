//! Structural heuristic answers
//!
//! Last stop of the degradation chain. Derives a topic from the query and
//! fills a fixed research outline around it, so some answer always exists.

use regex::Regex;
use std::sync::LazyLock;

static QUESTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)what is|who is|how to|why|explain").expect("question pattern is valid")
});

/// Topic phrase of a query with question words removed and first letter capitalized
pub fn derive_topic(query: &str) -> String {
    let stripped = QUESTION_PREFIX.replace_all(query, "");
    let topic = stripped.trim();

    let mut chars = topic.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Markdown research outline for the query's topic
pub fn generate_meta_heuristic_answer(query: &str) -> String {
    let title = derive_topic(query);

    format!(
        "### Structural Analysis of **{title}**\n\n\
         While direct real-time access to the knowledge graph is currently limited, \
         we can structure the analysis of **{title}** through the following standard \
         research dimensions:\n\n\
         #### 1. Core Definition\n\
         In a general context, **{title}** typically refers to a specific concept, entity, \
         or phenomenon within its respective field. Understanding it requires examining its \
         fundamental properties and primary function.\n\n\
         #### 2. Key Dimensions\n\
         Research into this topic usually focuses on:\n\
         *   **Mechanisms:** How it functions or operates.\n\
         *   **Context:** The historical or situational background.\n\
         *   **Impact:** The significance or effect it has on related systems.\n\n\
         #### 3. Analytical Framework\n\
         To fully synthesize **{title}**, one would typically evaluate:\n\
         *   **Theoretical Basis:** The underlying principles.\n\
         *   **Practical Application:** Real-world use cases or examples.\n\
         *   **Current Trends:** How the understanding of this topic is evolving.\n\n\
         *Note: This is a structural framework generated by the CogniFlow Heuristic Engine \
         to guide further research.*"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADINGS: [&str; 3] = [
        "#### 1. Core Definition",
        "#### 2. Key Dimensions",
        "#### 3. Analytical Framework",
    ];

    #[test]
    fn test_topic_strips_question_words() {
        assert_eq!(derive_topic("What is Quantum Foo?"), "Quantum Foo?");
        assert_eq!(derive_topic("how to bake bread"), "Bake bread");
        assert_eq!(derive_topic("EXPLAIN entropy"), "Entropy");
        assert_eq!(derive_topic("why"), "");
    }

    #[test]
    fn test_answer_contains_topic_and_headings() {
        let answer = generate_meta_heuristic_answer("What is Quantum Foo?");
        assert!(answer.contains("Quantum Foo"));
        assert!(answer.starts_with("### Structural Analysis of **Quantum Foo?**"));
        for heading in HEADINGS {
            assert!(answer.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn test_answer_is_never_empty() {
        for query in ["", "   ", "why", "what is"] {
            let answer = generate_meta_heuristic_answer(query);
            assert!(!answer.is_empty());
            assert!(HEADINGS.iter().all(|h| answer.contains(h)));
        }
    }

    #[test]
    fn test_answer_is_deterministic() {
        assert_eq!(
            generate_meta_heuristic_answer("who is Ada Lovelace"),
            generate_meta_heuristic_answer("who is Ada Lovelace")
        );
    }

    #[test]
    fn test_line_structure_preserved() {
        let answer = generate_meta_heuristic_answer("tides");
        assert!(answer.contains("research dimensions:\n\n#### 1. Core Definition\nIn a general"));
        assert!(answer.contains("\n*   **Impact:** The significance"));
        assert!(answer.ends_with("to guide further research.*"));
    }
}
