use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAR_CLASS: &str = "split-char";
pub const DEFAULT_WORD_CLASS: &str = "split-word";
pub const DEFAULT_LINE_CLASS: &str = "split-line";

/// Class-name overrides for each wrapper kind.
///
/// Unset entries fall back to `split-char`, `split-word` and `split-line`
/// independently of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitClasses {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

impl SplitClasses {
    pub fn char_class(&self) -> &str {
        self.char.as_deref().unwrap_or(DEFAULT_CHAR_CLASS)
    }

    pub fn word_class(&self) -> &str {
        self.word.as_deref().unwrap_or(DEFAULT_WORD_CLASS)
    }

    pub fn line_class(&self) -> &str {
        self.line.as_deref().unwrap_or(DEFAULT_LINE_CLASS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    pub classes: SplitClasses,
}

impl SplitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_char_class(mut self, class: impl Into<String>) -> Self {
        self.classes.char = Some(class.into());
        self
    }

    pub fn with_word_class(mut self, class: impl Into<String>) -> Self {
        self.classes.word = Some(class.into());
        self
    }

    pub fn with_line_class(mut self, class: impl Into<String>) -> Self {
        self.classes.line = Some(class.into());
        self
    }
}
