//! Duration fields: minute counts with an `H:MM` string form.
//!
//! The stored value is an integer count of minutes; the wire form is
//! `H{1,6}:MM`. [`to_number`] and [`to_string`] are exact inverses over
//! the clamped range.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::translate::Translator;

use super::Constraint;

/// Smallest allowed duration, in minutes.
pub const MIN_VALUE: u32 = 0;
/// Largest allowed duration, in minutes (999999:59).
pub const MAX_VALUE: u32 = 59_999_999;

static FORMAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,6}:[0-5]\d$").expect("FORMAT_REGEX: invalid regex pattern")
});

/// Parameters of a duration field, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationParameters {
    minimum: u32,
    maximum: u32,
    default: Option<u32>,
}

impl Default for DurationParameters {
    fn default() -> Self {
        Self {
            minimum: MIN_VALUE,
            maximum: MAX_VALUE,
            default: None,
        }
    }
}

impl DurationParameters {
    /// The configured minimum, in minutes.
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    /// The configured maximum, in minutes.
    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// The configured default, in minutes.
    pub fn default_value(&self) -> Option<u32> {
        self.default
    }

    /// Sets the minimum, clamped to the global bounds.
    pub fn set_minimum(&mut self, value: i64) {
        self.minimum = clamp(value);
    }

    /// Sets the maximum, clamped to the global bounds.
    pub fn set_maximum(&mut self, value: i64) {
        self.maximum = clamp(value);
    }

    /// Sets the default, clamped to the configured range.
    pub fn set_default_value(&mut self, value: i64) {
        let clamped = value.clamp(i64::from(self.minimum), i64::from(self.maximum));
        self.default = Some(clamped as u32);
    }

    /// Clears the default.
    pub fn clear_default_value(&mut self) {
        self.default = None;
    }

    pub(super) fn constraints(&self, translator: &dyn Translator) -> Vec<Constraint> {
        vec![
            Constraint::Regex {
                pattern: FORMAT_REGEX.as_str().to_string(),
                message: translator.translate("field.value.duration_format", &[]),
            },
            Constraint::DurationRange {
                min: self.minimum,
                max: self.maximum,
                message: translator.translate(
                    "field.value.duration_range",
                    &[
                        ("min", to_string(self.minimum)),
                        ("max", to_string(self.maximum)),
                    ],
                ),
            },
        ]
    }
}

/// Clamps a raw minute count to the representable range.
pub fn clamp(value: i64) -> u32 {
    value.clamp(i64::from(MIN_VALUE), i64::from(MAX_VALUE)) as u32
}

/// Parses an `H{1,6}:MM` string into minutes.
pub fn to_number(text: &str) -> Option<u32> {
    if !FORMAT_REGEX.is_match(text) {
        return None;
    }
    let (hours, minutes) = text.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Formats a minute count as `H:MM`, clamping first.
pub fn to_string(value: u32) -> String {
    let value = value.clamp(MIN_VALUE, MAX_VALUE);
    format!("{}:{:02}", value / 60, value % 60)
}
