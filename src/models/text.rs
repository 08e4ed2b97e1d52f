//! Two-locale display text.

use serde::{Deserialize, Serialize};

/// Display text in the festival's local language and in English.
///
/// Either side may be empty; [`LocalizedText::display`] falls back to the
/// other one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Text in the local language.
    #[serde(default)]
    pub local: String,
    /// English text.
    #[serde(default)]
    pub english: String,
}

impl LocalizedText {
    /// Creates text with both locales.
    pub fn new(local: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            english: english.into(),
        }
    }

    /// Creates text with the same value in both locales.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            local: text.clone(),
            english: text,
        }
    }

    /// Whether both locales are blank.
    pub fn is_blank(&self) -> bool {
        self.local.trim().is_empty() && self.english.trim().is_empty()
    }

    /// Preferred display string: local text, else English.
    pub fn display(&self) -> &str {
        if self.local.trim().is_empty() {
            &self.english
        } else {
            &self.local
        }
    }
}
