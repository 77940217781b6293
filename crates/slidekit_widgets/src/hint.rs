//! Hint texts shown behind the thumb

/// Text pair for the two committed states
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HintTexts {
    /// Shown while not committed
    pub default_text: String,
    /// Shown once committed
    pub slided_text: String,
}

impl HintTexts {
    pub fn new(default_text: impl Into<String>, slided_text: impl Into<String>) -> Self {
        Self {
            default_text: default_text.into(),
            slided_text: slided_text.into(),
        }
    }

    pub fn text_for(&self, committed: bool) -> &str {
        if committed {
            &self.slided_text
        } else {
            &self.default_text
        }
    }
}
