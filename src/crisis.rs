//! Crisis language screening for journal text

/// Phrases that redirect the writer to safety resources instead of submitting.
pub const DEFAULT_CRISIS_KEYWORDS: &[&str] = &["suicide", "kill myself", "die", "end it", "better off dead"];

/// Case-insensitive substring scan over a fixed keyword list.
///
/// No stemming or word boundaries: "die" also matches inside "diet". The list
/// is product policy and comes from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CrisisScreener {
    keywords: Vec<String>,
}

impl CrisisScreener {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when any keyword occurs anywhere in the text
    pub fn screen(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for CrisisScreener {
    fn default() -> Self {
        Self::new(DEFAULT_CRISIS_KEYWORDS)
    }
}
