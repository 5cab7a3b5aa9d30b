// src/keywords.rs
//! Topic gate: case-insensitive substring match against the configured
//! keyword list. No tokenization, no word boundaries.

#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Keywords are lower-cased once here, at startup.
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// True iff any keyword appears as a substring of `text`, ignoring case.
    /// Empty text never matches and never fails.
    pub fn matches(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let t = text.to_lowercase();
        self.keywords.iter().any(|k| t.contains(k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(words: &[&str]) -> KeywordFilter {
        let owned: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        KeywordFilter::new(&owned)
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let f = filter(&["ai", "machine learning"]);
        assert!(f.matches("Exploring new AI tools"));
        assert!(f.matches("MACHINE LEARNING roundup"));
        assert!(!f.matches("nothing relevant"));
    }

    #[test]
    fn empty_text_never_matches() {
        let f = filter(&["ai"]);
        assert!(!f.matches(""));
    }

    #[test]
    fn blank_keywords_are_dropped() {
        let f = filter(&["  ", "llm"]);
        assert!(f.matches("An LLM explainer"));
        assert!(!f.matches("plain news"));
    }
}
