//! Affirmative/negative classification of free-text answers.

/// Tokens always recognised as "yes".
pub const DEFAULT_AFFIRMATIVES: [&str; 4] = ["y", "yes", "yup", "sure"];

/// Maps raw answers to a definite yes/no.
///
/// Total: anything not in the affirmative set, including empty input, is a no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerClassifier {
    affirmatives: Vec<String>,
}

impl Default for AnswerClassifier {
    fn default() -> Self {
        Self {
            affirmatives: DEFAULT_AFFIRMATIVES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AnswerClassifier {
    /// Default tokens plus `extra`. Blank extras are ignored.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classifier = Self::default();
        for token in extra {
            let token = token.as_ref().trim().to_lowercase();
            if !token.is_empty() && !classifier.affirmatives.contains(&token) {
                classifier.affirmatives.push(token);
            }
        }
        classifier
    }

    pub fn is_affirmative(&self, text: &str) -> bool {
        let answer = text.trim().to_lowercase();
        self.affirmatives.iter().any(|token| *token == answer)
    }

    pub fn tokens(&self) -> &[String] {
        &self.affirmatives
    }
}

/// Classify with the default token set.
pub fn is_affirmative(text: &str) -> bool {
    let answer = text.trim();
    DEFAULT_AFFIRMATIVES
        .iter()
        .any(|token| token.eq_ignore_ascii_case(answer))
}
