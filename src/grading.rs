use crate::config::NO_MEANING;

/// True when `input` spells `expected`, ignoring case and surrounding whitespace.
///
/// An empty `expected` (no word drawn yet) never matches.
pub fn check(expected: &str, input: &str) -> bool {
    let expected = expected.trim();
    if expected.is_empty() {
        return false;
    }
    input.trim().to_lowercase() == expected.to_lowercase()
}

/// What the user sees after submitting a spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub attempt: String,
    pub expected: String,
    pub meaning: Option<String>,
    pub example: Option<String>,
}

impl Feedback {
    pub fn headline(&self) -> String {
        if self.correct {
            "Correct!".to_string()
        } else {
            format!(
                "Incorrect. Your spelling: {} / Correct spelling: {}",
                self.attempt.trim(),
                self.expected
            )
        }
    }

    pub fn meaning_text(&self) -> &str {
        self.meaning.as_deref().unwrap_or(NO_MEANING)
    }

    /// Headline, meaning and example as separate display lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.headline(), format!("Meaning: {}", self.meaning_text())];
        if let Some(example) = &self.example {
            lines.push(format!("Example: {}", example));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ignores_case_and_whitespace() {
        assert!(check("Apple", "apple "));
        assert!(check("Apple", "  APPLE"));
        assert!(check(" Apple ", "apple"));
    }

    #[test]
    fn test_check_rejects_partial_spelling() {
        assert!(!check("Apple", "Appl"));
        assert!(!check("Apple", "Apples"));
        assert!(!check("Apple", ""));
    }

    #[test]
    fn test_check_without_word_is_false() {
        assert!(!check("", "anything"));
        assert!(!check("", ""));
        assert!(!check("   ", "   "));
    }

    #[test]
    fn test_check_handles_non_ascii() {
        assert!(check("Café", "café"));
        assert!(check("Straße", "STRAßE"));
    }

    #[test]
    fn test_feedback_correct() {
        let feedback = Feedback {
            correct: true,
            attempt: "cat".to_string(),
            expected: "cat".to_string(),
            meaning: Some("an animal".to_string()),
            example: None,
        };
        assert_eq!(feedback.lines(), vec!["Correct!", "Meaning: an animal"]);
    }

    #[test]
    fn test_feedback_incorrect_shows_spelling_and_placeholders() {
        let feedback = Feedback {
            correct: false,
            attempt: "dgo ".to_string(),
            expected: "dog".to_string(),
            meaning: None,
            example: Some("The dog barks.".to_string()),
        };
        assert_eq!(
            feedback.lines(),
            vec![
                "Incorrect. Your spelling: dgo / Correct spelling: dog",
                "Meaning: No meaning available",
                "Example: The dog barks.",
            ]
        );
    }
}
