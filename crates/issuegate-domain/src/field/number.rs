//! Number fields: signed integers in a symmetric configurable range.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::translate::Translator;

use super::Constraint;

/// Smallest allowed value.
pub const MIN_VALUE: i64 = -1_000_000_000;
/// Largest allowed value.
pub const MAX_VALUE: i64 = 1_000_000_000;

static FORMAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("FORMAT_REGEX: invalid regex pattern"));

/// Parameters of a number field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberParameters {
    minimum: i64,
    maximum: i64,
    default: Option<i64>,
}

impl Default for NumberParameters {
    fn default() -> Self {
        Self {
            minimum: MIN_VALUE,
            maximum: MAX_VALUE,
            default: None,
        }
    }
}

impl NumberParameters {
    /// The configured minimum.
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    /// The configured maximum.
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// The configured default, if any.
    pub fn default_value(&self) -> Option<i64> {
        self.default
    }

    /// Sets the minimum, clamped to the global bounds.
    pub fn set_minimum(&mut self, value: i64) {
        self.minimum = value.clamp(MIN_VALUE, MAX_VALUE);
    }

    /// Sets the maximum, clamped to the global bounds.
    pub fn set_maximum(&mut self, value: i64) {
        self.maximum = value.clamp(MIN_VALUE, MAX_VALUE);
    }

    /// Sets the default, clamped to the configured range.
    pub fn set_default_value(&mut self, value: i64) {
        let clamped = value.clamp(self.minimum, self.maximum);
        if clamped != value {
            debug!(value, clamped, "number default clamped to configured range");
        }
        self.default = Some(clamped);
    }

    /// Clears the default.
    pub fn clear_default_value(&mut self) {
        self.default = None;
    }

    pub(super) fn constraints(&self, translator: &dyn Translator) -> Vec<Constraint> {
        vec![
            Constraint::Regex {
                pattern: FORMAT_REGEX.as_str().to_string(),
                message: translator.translate("field.value.integer", &[]),
            },
            Constraint::IntRange {
                min: self.minimum,
                max: self.maximum,
                message: translator.translate(
                    "field.value.range",
                    &[
                        ("min", self.minimum.to_string()),
                        ("max", self.maximum.to_string()),
                    ],
                ),
            },
        ]
    }
}

/// Parses a signed integer value.
pub(super) fn parse(text: &str) -> Option<i64> {
    let stripped = text.strip_prefix('+').unwrap_or(text);
    stripped.parse().ok()
}
