//! Field-type facade: one entity, nine typed behaviors.
//!
//! A [`Field`] carries a [`FieldKind`], a sum type over the nine field
//! kinds, each variant holding its own typed parameter struct. All
//! behavior dispatches on a single `match` of the kind tag:
//! constraint generation for validation, raw-value coercion, and the
//! clamping getters/setters on each parameter struct.
//!
//! Uniform rules across all kinds:
//! - a required field appends a not-blank constraint after the
//!   type-specific constraints;
//! - every setter clamps out-of-range input to the nearest bound;
//! - default values are clamped/truncated the same way as bounds.
//!
//! Violations come back as data, never as errors: the caller decides
//! whether a non-empty list fails the request.

mod checkbox;
mod date;
mod decimal;
mod duration;
mod issue_ref;
mod list;
mod number;
mod string;
mod text;

#[cfg(test)]
mod proptests;

pub use checkbox::CheckboxParameters;
pub use date::DateParameters;
pub use decimal::DecimalParameters;
pub use duration::DurationParameters;
pub use issue_ref::IssueRefParameters;
pub use list::ListParameters;
pub use number::NumberParameters;
pub use string::StringParameters;
pub use text::TextParameters;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::model::{FieldId, IssueId, StateId};
use crate::translate::Translator;

/// A custom field attached to a workflow state.
///
/// Fields are exclusively owned by their state and never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub state_id: StateId,
    pub name: String,
    pub required: bool,
    pub kind: FieldKind,
}

/// The nine field kinds, each with its typed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    Checkbox(CheckboxParameters),
    Date(DateParameters),
    Decimal(DecimalParameters),
    Duration(DurationParameters),
    IssueRef(IssueRefParameters),
    List(ListParameters),
    Number(NumberParameters),
    String(StringParameters),
    Text(TextParameters),
}

/// A coerced, typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Bool(bool),
    Date(NaiveDate),
    Decimal(Decimal),
    /// Minutes.
    Duration(u32),
    IssueRef(IssueId),
    /// The stored integer value of the chosen list item.
    ListItem(i32),
    Number(i64),
    String(String),
    Text(String),
}

/// A single validation constraint with its translated message.
///
/// Constraints are generated in a fixed order per field kind and
/// evaluated against the raw submitted value by [`violations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// The value must be present and non-blank.
    NotBlank { message: String },
    /// The canonical string form must fully match the pattern.
    Regex { pattern: String, message: String },
    /// The canonical string form must be one of the listed choices.
    Choice { choices: Vec<String>, message: String },
    /// Character count limit for string/text values.
    MaxLength { limit: usize, message: String },
    /// Inclusive integer range.
    IntRange { min: i64, max: i64, message: String },
    /// Inclusive decimal range, compared decimal-safe.
    DecimalRange { min: Decimal, max: Decimal, message: String },
    /// Inclusive calendar-date window.
    DateRange { min: NaiveDate, max: NaiveDate, message: String },
    /// Inclusive range over `H:MM` durations, compared in minutes.
    DurationRange { min: u32, max: u32, message: String },
    /// The value must be a positive integer.
    GreaterThanZero { message: String },
}

/// A reported constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Dotted path of the offending property (the field name here).
    pub property_path: String,
    /// The rejected raw value, rendered for display.
    pub rejected_value: String,
    /// Translated message.
    pub message: String,
}

impl Field {
    /// Produces the ordered validation constraints for this field.
    ///
    /// `as_of` anchors date windows that are relative to "now"; pass the
    /// creation time of a historical value to re-validate it, or `None`
    /// for the current time.
    pub fn constraints(
        &self,
        translator: &dyn Translator,
        as_of: Option<DateTime<Utc>>,
    ) -> Vec<Constraint> {
        let mut constraints = match &self.kind {
            FieldKind::Checkbox(p) => p.constraints(translator),
            FieldKind::Date(p) => p.constraints(translator, as_of.unwrap_or_else(Utc::now)),
            FieldKind::Decimal(p) => p.constraints(translator),
            FieldKind::Duration(p) => p.constraints(translator),
            FieldKind::IssueRef(p) => p.constraints(translator),
            FieldKind::List(p) => p.constraints(translator),
            FieldKind::Number(p) => p.constraints(translator),
            FieldKind::String(p) => p.constraints(translator),
            FieldKind::Text(p) => p.constraints(translator),
        };
        if self.required {
            constraints.push(Constraint::NotBlank {
                message: translator.translate("field.value.required", &[]),
            });
        }
        constraints
    }

    /// Validates a raw value against this field's constraints.
    pub fn validate(
        &self,
        raw: &Value,
        translator: &dyn Translator,
        as_of: Option<DateTime<Utc>>,
    ) -> Vec<ConstraintViolation> {
        violations(&self.constraints(translator, as_of), &self.name, raw)
    }

    /// Coerces a raw value into this field's typed value.
    ///
    /// Blank input coerces to `None`; anything else either parses into
    /// the field's type or reports a structured error. Coercion does not
    /// re-check range constraints; run [`Field::validate`] first.
    pub fn coerce(&self, raw: &Value) -> DomainResult<Option<FieldValue>> {
        let Some(text) = canonical_string(raw) else {
            return Ok(None);
        };
        let parsed = match &self.kind {
            FieldKind::Checkbox(_) => checkbox::parse(&text).map(FieldValue::Bool),
            FieldKind::Date(_) => date::parse(&text).map(FieldValue::Date),
            FieldKind::Decimal(_) => decimal::parse(&text).map(FieldValue::Decimal),
            FieldKind::Duration(_) => duration::to_number(&text).map(FieldValue::Duration),
            FieldKind::IssueRef(_) => issue_ref::parse(&text).map(FieldValue::IssueRef),
            FieldKind::List(p) => p.parse(&text).map(FieldValue::ListItem),
            FieldKind::Number(_) => number::parse(&text).map(FieldValue::Number),
            FieldKind::String(_) => Some(FieldValue::String(text.clone())),
            FieldKind::Text(_) => Some(FieldValue::Text(text.clone())),
        };
        match parsed {
            Some(value) => Ok(Some(value)),
            None => Err(DomainError::InvalidFieldValue {
                field: self.name.clone(),
                message: format!("cannot interpret '{text}'"),
            }),
        }
    }

    /// The field's configured default, as a typed value.
    pub fn default_value(&self) -> Option<FieldValue> {
        match &self.kind {
            FieldKind::Checkbox(p) => Some(FieldValue::Bool(p.default_value())),
            FieldKind::Date(p) => p.default_value().map(|d| FieldValue::Number(i64::from(d))),
            FieldKind::Decimal(p) => p.default_value().map(FieldValue::Decimal),
            FieldKind::Duration(p) => p.default_value().map(FieldValue::Duration),
            FieldKind::IssueRef(_) => None,
            FieldKind::List(p) => p.default_item().map(|i| FieldValue::ListItem(i.value)),
            FieldKind::Number(p) => p.default_value().map(FieldValue::Number),
            FieldKind::String(p) => p.default_value().map(|s| FieldValue::String(s.to_string())),
            FieldKind::Text(p) => p.default_value().map(|s| FieldValue::Text(s.to_string())),
        }
    }
}

/// Evaluates constraints against a raw value.
///
/// A blank value only ever violates `NotBlank`; the remaining
/// constraints are skipped so a single omission is reported once.
/// Unparsable values are caught by the format constraint (regex or
/// choice) and skipped by the range constraints behind it.
pub fn violations(
    constraints: &[Constraint],
    property_path: &str,
    raw: &Value,
) -> Vec<ConstraintViolation> {
    let text = canonical_string(raw);
    let mut found = Vec::new();
    for constraint in constraints {
        let violated = match (constraint, text.as_deref()) {
            (Constraint::NotBlank { .. }, None) => true,
            (_, None) => false,
            (Constraint::NotBlank { .. }, Some(_)) => false,
            (Constraint::Regex { pattern, .. }, Some(s)) => !regex_matches(pattern, s),
            (Constraint::Choice { choices, .. }, Some(s)) => !choices.iter().any(|c| c == s),
            (Constraint::MaxLength { limit, .. }, Some(s)) => s.chars().count() > *limit,
            (Constraint::IntRange { min, max, .. }, Some(s)) => match s.parse::<i64>() {
                Ok(n) => n < *min || n > *max,
                Err(_) => false,
            },
            (Constraint::DecimalRange { min, max, .. }, Some(s)) => match decimal::parse(s) {
                Some(d) => d < *min || d > *max,
                None => false,
            },
            (Constraint::DateRange { min, max, .. }, Some(s)) => match date::parse(s) {
                Some(d) => d < *min || d > *max,
                None => false,
            },
            (Constraint::DurationRange { min, max, .. }, Some(s)) => {
                match duration::to_number(s) {
                    Some(n) => n < *min || n > *max,
                    None => false,
                }
            }
            (Constraint::GreaterThanZero { .. }, Some(s)) => {
                !matches!(s.parse::<i64>(), Ok(n) if n > 0)
            }
        };
        if violated {
            found.push(ConstraintViolation {
                property_path: property_path.to_string(),
                rejected_value: text.clone().unwrap_or_default(),
                message: constraint.message().to_string(),
            });
        }
    }
    found
}

impl Constraint {
    /// The translated message attached to this constraint.
    pub fn message(&self) -> &str {
        match self {
            Constraint::NotBlank { message }
            | Constraint::Regex { message, .. }
            | Constraint::Choice { message, .. }
            | Constraint::MaxLength { message, .. }
            | Constraint::IntRange { message, .. }
            | Constraint::DecimalRange { message, .. }
            | Constraint::DateRange { message, .. }
            | Constraint::DurationRange { message, .. }
            | Constraint::GreaterThanZero { message } => message,
        }
    }
}

/// Canonical string form of a raw JSON value.
///
/// Booleans map to the stored `1`/`0` form, numbers render in full, and
/// blank strings collapse to `None` alongside `null`.
fn canonical_string(raw: &Value) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn regex_matches(pattern: &str, value: &str) -> bool {
    match regex::Regex::new(pattern) {
        Ok(re) => re.is_match(value),
        // An unparsable custom pattern cannot reject anything.
        Err(_) => true,
    }
}
