//! Blank value handling for imported files

use serde::{Deserialize, Serialize};

/// Cell values that mean "not set" in optional CSV columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlankValues {
    /// Patterns to treat as blank
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for BlankValues {
    fn default() -> Self {
        Self {
            patterns: vec![
                String::new(),
                "-".to_string(),
                "N/A".to_string(),
                "null".to_string(),
                "none".to_string(),
                "なし".to_string(),
            ],
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl BlankValues {
    pub fn is_blank(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace { value.trim() } else { value };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// `None` for blank cells, the trimmed value otherwise
    pub fn optional(&self, value: &str) -> Option<String> {
        if self.is_blank(value) {
            None
        } else {
            Some(value.trim().to_string())
        }
    }

    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    pub fn remove_pattern(&mut self, pattern: &str) {
        self.patterns.retain(|p| p != pattern);
    }
}
