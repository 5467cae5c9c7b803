//! Text fields: multi-line content, as string fields with a larger cap.

use serde::{Deserialize, Serialize};

use crate::translate::Translator;

use super::string::{length_and_check_constraints, truncate};
use super::Constraint;

/// Smallest allowed maximum length.
pub const MIN_LENGTH: usize = 1;
/// Hard cap on the maximum length.
pub const MAX_LENGTH: usize = 10_000;

/// Parameters of a text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextParameters {
    max_length: usize,
    default: Option<String>,
    check: Option<String>,
}

impl Default for TextParameters {
    fn default() -> Self {
        Self {
            max_length: MAX_LENGTH,
            default: None,
            check: None,
        }
    }
}

impl TextParameters {
    /// The configured maximum length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The configured default, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The configured check pattern, if any.
    pub fn check(&self) -> Option<&str> {
        self.check.as_deref()
    }

    /// Sets the maximum length, clamped to `[MIN_LENGTH, MAX_LENGTH]`.
    pub fn set_max_length(&mut self, value: usize) {
        self.max_length = value.clamp(MIN_LENGTH, MAX_LENGTH);
    }

    /// Sets the default, truncated to the configured maximum length.
    pub fn set_default_value(&mut self, value: impl Into<String>) {
        self.default = Some(truncate(value.into(), self.max_length));
    }

    /// Clears the default.
    pub fn clear_default_value(&mut self) {
        self.default = None;
    }

    /// Sets the check pattern. An empty pattern clears it.
    pub fn set_check(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        self.check = if pattern.is_empty() {
            None
        } else {
            Some(pattern)
        };
    }

    pub(super) fn constraints(&self, translator: &dyn Translator) -> Vec<Constraint> {
        length_and_check_constraints(self.max_length, self.check.as_deref(), translator)
    }
}
