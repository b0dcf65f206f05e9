//! Prompt building utilities for model backends.
//!
//! All providers share one system instruction; each backend shapes it into
//! the wire format its API expects.

/// Instruction given to every model
pub const SYSTEM_PROMPT: &str = "You are a helpful research assistant. Answer the user's query clearly and comprehensively. You MUST use Markdown formatting: use '##' for main sections, '###' for subsections, and bullet points ('-') or numbered lists ('1.') for details. Do NOT use HTML tags.";

/// Single-turn prompt for APIs without a system role
pub fn build_inline_prompt(query: &str) -> String {
    format!("{}\n\nQuery: {}", SYSTEM_PROMPT, query)
}

/// `[INST]`-wrapped prompt for raw text-generation endpoints
pub fn build_instruct_prompt(query: &str) -> String {
    format!("[INST] {} \n\n {} [/INST]", SYSTEM_PROMPT, query)
}

/// Remove an echoed prompt from raw generated text
pub fn strip_echoed_prompt(generated: &str, prompt: &str) -> String {
    generated.replacen(prompt, "", 1).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_prompt_contains_query() {
        let prompt = build_inline_prompt("what is gravity");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with("Query: what is gravity"));
    }

    #[test]
    fn test_instruct_prompt_wraps_query() {
        let prompt = build_instruct_prompt("what is ram");
        assert!(prompt.starts_with("[INST] "));
        assert!(prompt.ends_with(" what is ram [/INST]"));
    }

    #[test]
    fn test_strip_echoed_prompt() {
        let prompt = build_instruct_prompt("q");
        let generated = format!("{}  The answer is here.  ", prompt);
        assert_eq!(strip_echoed_prompt(&generated, &prompt), "The answer is here.");

        // Nothing echoed: only trimmed
        assert_eq!(strip_echoed_prompt("  plain ", &prompt), "plain");
    }
}
