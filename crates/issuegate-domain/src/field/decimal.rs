//! Decimal fields: fixed-precision values compared decimal-safe.
//!
//! Values carry up to ten integral and ten fractional digits. Comparison
//! never goes through floating point.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::translate::Translator;

use super::Constraint;

/// Number of fractional digits carried by decimal values.
pub const PRECISION: u32 = 10;

/// Smallest representable decimal value.
pub static MIN_VALUE: LazyLock<Decimal> = LazyLock::new(|| {
    Decimal::from_str("-9999999999.9999999999").expect("MIN_VALUE: invalid decimal literal")
});

/// Largest representable decimal value.
pub static MAX_VALUE: LazyLock<Decimal> = LazyLock::new(|| {
    Decimal::from_str("9999999999.9999999999").expect("MAX_VALUE: invalid decimal literal")
});

static FORMAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,10}(\.\d{1,10})?$").expect("FORMAT_REGEX: invalid regex pattern")
});

/// Parameters of a decimal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalParameters {
    minimum: Decimal,
    maximum: Decimal,
    default: Option<Decimal>,
}

impl Default for DecimalParameters {
    fn default() -> Self {
        Self {
            minimum: *MIN_VALUE,
            maximum: *MAX_VALUE,
            default: None,
        }
    }
}

impl DecimalParameters {
    /// The configured minimum.
    pub fn minimum(&self) -> Decimal {
        self.minimum
    }

    /// The configured maximum.
    pub fn maximum(&self) -> Decimal {
        self.maximum
    }

    /// The configured default, if any.
    pub fn default_value(&self) -> Option<Decimal> {
        self.default
    }

    /// Sets the minimum, clamped to the global bounds.
    pub fn set_minimum(&mut self, value: Decimal) {
        self.minimum = value.clamp(*MIN_VALUE, *MAX_VALUE);
    }

    /// Sets the maximum, clamped to the global bounds.
    pub fn set_maximum(&mut self, value: Decimal) {
        self.maximum = value.clamp(*MIN_VALUE, *MAX_VALUE);
    }

    /// Sets the default, clamped to the configured range.
    pub fn set_default_value(&mut self, value: Decimal) {
        self.default = Some(value.clamp(self.minimum, self.maximum));
    }

    /// Clears the default.
    pub fn clear_default_value(&mut self) {
        self.default = None;
    }

    pub(super) fn constraints(&self, translator: &dyn Translator) -> Vec<Constraint> {
        vec![
            Constraint::Regex {
                pattern: FORMAT_REGEX.as_str().to_string(),
                message: translator.translate("field.value.decimal_format", &[]),
            },
            Constraint::DecimalRange {
                min: self.minimum,
                max: self.maximum,
                message: translator.translate(
                    "field.value.decimal_range",
                    &[
                        ("min", self.minimum.to_string()),
                        ("max", self.maximum.to_string()),
                    ],
                ),
            },
        ]
    }
}

/// Parses a decimal value without going through floating point.
pub(super) fn parse(text: &str) -> Option<Decimal> {
    Decimal::from_str(text).ok()
}
