//! Whitespace and case rules for fragment text.
//!
//! Layout providers hand over text exactly as drawn, which for generated
//! statements usually means trailing newlines, padding spaces and the odd
//! non-breaking space (U+00A0). Labels are compared after normalization;
//! cell values are returned after normalization.

use serde::{Deserialize, Serialize};

/// Caller-configurable text normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextNormalization {
    /// Strip leading/trailing whitespace, including non-breaking spaces.
    pub trim_whitespace: bool,
    /// Replace every internal whitespace run with a single ASCII space.
    pub collapse_whitespace: bool,
    /// Compare header labels without regard to case.
    ///
    /// Only affects label matching; cell values keep their case.
    pub case_insensitive: bool,
}

impl Default for TextNormalization {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            collapse_whitespace: false,
            case_insensitive: false,
        }
    }
}

impl TextNormalization {
    /// Leave text exactly as the provider produced it.
    pub fn verbatim() -> Self {
        Self {
            trim_whitespace: false,
            collapse_whitespace: false,
            case_insensitive: false,
        }
    }

    /// Enable or disable trimming.
    pub fn with_trim_whitespace(mut self, enable: bool) -> Self {
        self.trim_whitespace = enable;
        self
    }

    /// Enable or disable whitespace collapsing.
    pub fn with_collapse_whitespace(mut self, enable: bool) -> Self {
        self.collapse_whitespace = enable;
        self
    }

    /// Enable or disable case-insensitive label matching.
    pub fn with_case_insensitive(mut self, enable: bool) -> Self {
        self.case_insensitive = enable;
        self
    }

    /// Normalize a cell value.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_tabular::text::TextNormalization;
    ///
    /// let norm = TextNormalization::default();
    /// assert_eq!(norm.normalize_value("\u{a0}1,234.56 \n"), "1,234.56");
    /// ```
    pub fn normalize_value(&self, text: &str) -> String {
        let text = if self.trim_whitespace { text.trim() } else { text };
        if !self.collapse_whitespace {
            return text.to_string();
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if self.trim_whitespace {
            return collapsed;
        }

        // Untrimmed edges keep one space each
        if collapsed.is_empty() {
            return if text.is_empty() { String::new() } else { " ".to_string() };
        }
        let lead = if text.starts_with(char::is_whitespace) { " " } else { "" };
        let trail = if text.ends_with(char::is_whitespace) { " " } else { "" };
        format!("{}{}{}", lead, collapsed, trail)
    }

    /// Normalize a header label or a fragment text for label comparison.
    pub fn normalize_label(&self, text: &str) -> String {
        let value = self.normalize_value(text);
        if self.case_insensitive {
            value.to_lowercase()
        } else {
            value
        }
    }

    /// Compare two label texts under these rules.
    pub fn labels_equal(&self, a: &str, b: &str) -> bool {
        self.normalize_label(a) == self.normalize_label(b)
    }
}
