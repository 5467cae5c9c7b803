//! String fields: single-line text with a length cap and optional
//! full-match check pattern.

use serde::{Deserialize, Serialize};

use crate::translate::Translator;

use super::Constraint;

/// Smallest allowed maximum length.
pub const MIN_LENGTH: usize = 1;
/// Hard cap on the maximum length.
pub const MAX_LENGTH: usize = 250;

/// Parameters of a string field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringParameters {
    max_length: usize,
    default: Option<String>,
    /// Optional custom pattern the whole value must match.
    check: Option<String>,
}

impl Default for StringParameters {
    fn default() -> Self {
        Self {
            max_length: MAX_LENGTH,
            default: None,
            check: None,
        }
    }
}

impl StringParameters {
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

/// Shared constraint generation for string and text fields.
pub(super) fn length_and_check_constraints(
    max_length: usize,
    check: Option<&str>,
    translator: &dyn Translator,
) -> Vec<Constraint> {
    let mut constraints = vec![Constraint::MaxLength {
        limit: max_length,
        message: translator.translate("field.value.too_long", &[("max", max_length.to_string())]),
    }];
    if let Some(pattern) = check {
        constraints.push(Constraint::Regex {
            // The check pattern must match the whole value.
            pattern: format!("^(?:{pattern})$"),
            message: translator.translate("field.value.check_failed", &[]),
        });
    }
    constraints
}

/// Truncates a value to at most `max` characters.
pub(super) fn truncate(value: String, max: usize) -> String {
    if value.chars().count() <= max {
        value
    } else {
        value.chars().take(max).collect()
    }
}
