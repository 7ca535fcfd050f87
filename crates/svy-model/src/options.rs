//! Configuration options for the validation engine.

use serde::{Deserialize, Serialize};

/// Policy for rows where a skip trigger's base column is itself blank.
///
/// Historical rule-authoring conventions disagreed on this case, so it is
/// an explicit option rather than a hidden default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlankSkipBase {
    /// Treat the row as not required (fewer false Missing flags).
    #[default]
    NotRequired,
    /// Treat the row as required to answer.
    Required,
}

/// Options controlling engine behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    /// How to gate rows whose skip-base column is blank.
    pub blank_skip_base: BlankSkipBase,

    /// Additional junk words for the open-end check, merged with the
    /// built-in set. Matched case-insensitively against trimmed text.
    pub extra_junk_words: Vec<String>,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blank_skip_base(mut self, policy: BlankSkipBase) -> Self {
        self.blank_skip_base = policy;
        self
    }

    pub fn with_extra_junk_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_junk_words = words.into_iter().map(Into::into).collect();
        self
    }
}
