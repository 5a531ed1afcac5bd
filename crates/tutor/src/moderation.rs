//! Content-safety classification for tutoring input.
//!
//! Flagged input gets the canned refusal reply without touching the quota,
//! the completion service, or the prompt log. The classifier is a trait so
//! deployments can plug in a real moderation backend; the default is a
//! case-insensitive blocklist.

/// Decides whether raw user input is acceptable for the tutor.
pub trait ContentClassifier: Send + Sync {
    /// Returns true when the text should be refused.
    fn is_flagged(&self, text: &str) -> bool;
}

/// Wordlist-based classifier.
///
/// Matches case-insensitively on whole words so e.g. a blocked term inside
/// a longer identifier does not trip it.
pub struct BlocklistClassifier {
    blocked: Vec<String>,
}

impl BlocklistClassifier {
    pub fn new(blocked: impl IntoIterator<Item = String>) -> Self {
        Self {
            blocked: blocked.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

impl Default for BlocklistClassifier {
    fn default() -> Self {
        const DEFAULT_BLOCKLIST: &[&str] = &[
            "fuck", "shit", "bitch", "asshole", "bastard", "cunt", "dick", "slut", "whore",
        ];
        Self::new(DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()))
    }
}

impl ContentClassifier for BlocklistClassifier {
    fn is_flagged(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| !word.is_empty() && self.blocked.iter().any(|b| b == word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        let classifier = BlocklistClassifier::default();
        assert!(!classifier.is_flagged("How does Dijkstra's algorithm work?"));
    }

    #[test]
    fn blocked_word_is_flagged_case_insensitively() {
        let classifier = BlocklistClassifier::new(vec!["badword".to_string()]);
        assert!(classifier.is_flagged("this is a BADWORD, sorry"));
    }

    #[test]
    fn blocked_word_inside_a_longer_word_is_not_flagged() {
        let classifier = BlocklistClassifier::new(vec!["ass".to_string()]);
        assert!(!classifier.is_flagged("let me assess this assignment"));
    }
}
