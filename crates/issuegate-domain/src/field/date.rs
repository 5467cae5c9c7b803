//! Date fields: parameters are day offsets from a reference timestamp.
//!
//! The minimum, maximum, and default are signed day counts relative to
//! "now" (or to a supplied as-of timestamp). The submitted value is a
//! `YYYY-MM-DD` string checked against the computed window. All date
//! arithmetic is timezone-naive and uses whole days of 86 400 seconds.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::translate::Translator;

use super::Constraint;

/// Smallest allowed day offset.
pub const MIN_VALUE: i64 = i32::MIN as i64;
/// Largest allowed day offset.
pub const MAX_VALUE: i64 = i32::MAX as i64;

const SECONDS_PER_DAY: i64 = 86_400;

static FORMAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("FORMAT_REGEX: invalid regex pattern")
});

/// Parameters of a date field, as day offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParameters {
    minimum: i32,
    maximum: i32,
    default: Option<i32>,
}

impl Default for DateParameters {
    fn default() -> Self {
        Self {
            minimum: i32::MIN,
            maximum: i32::MAX,
            default: None,
        }
    }
}

impl DateParameters {
    /// The minimum day offset.
    pub fn minimum(&self) -> i64 {
        i64::from(self.minimum)
    }

    /// The maximum day offset.
    pub fn maximum(&self) -> i64 {
        i64::from(self.maximum)
    }

    /// The default day offset, if configured.
    pub fn default_value(&self) -> Option<i32> {
        self.default
    }

    /// Sets the minimum day offset, clamped to the global bounds.
    pub fn set_minimum(&mut self, value: i64) {
        self.minimum = clamp_offset(value);
    }

    /// Sets the maximum day offset, clamped to the global bounds.
    pub fn set_maximum(&mut self, value: i64) {
        self.maximum = clamp_offset(value);
    }

    /// Sets the default day offset, clamped to the configured window.
    pub fn set_default_value(&mut self, value: i64) {
        let clamped = value.clamp(i64::from(self.minimum), i64::from(self.maximum));
        if clamped != value {
            debug!(value, clamped, "date default clamped to configured window");
        }
        self.default = Some(clamped as i32);
    }

    /// Clears the default.
    pub fn clear_default_value(&mut self) {
        self.default = None;
    }

    pub(super) fn constraints(
        &self,
        translator: &dyn Translator,
        as_of: DateTime<Utc>,
    ) -> Vec<Constraint> {
        let min = offset_date(as_of, self.minimum);
        let max = offset_date(as_of, self.maximum);
        vec![
            Constraint::Regex {
                pattern: FORMAT_REGEX.as_str().to_string(),
                message: translator.translate("field.value.date_format", &[]),
            },
            Constraint::DateRange {
                min,
                max,
                message: translator.translate(
                    "field.value.date_range",
                    &[("min", min.to_string()), ("max", max.to_string())],
                ),
            },
        ]
    }
}

fn clamp_offset(value: i64) -> i32 {
    value.clamp(MIN_VALUE, MAX_VALUE) as i32
}

/// The calendar date `offset_days` whole days from the reference.
fn offset_date(reference: DateTime<Utc>, offset_days: i32) -> NaiveDate {
    let ts = reference
        .timestamp()
        .saturating_add(i64::from(offset_days).saturating_mul(SECONDS_PER_DAY));
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.date_naive(),
        // Offsets past chrono's representable range saturate.
        None if offset_days < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// Parses a `YYYY-MM-DD` value.
pub(super) fn parse(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}
