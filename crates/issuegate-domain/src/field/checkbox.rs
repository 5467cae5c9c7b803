//! Checkbox fields: a strict two-value choice, stored as 0/1.

use serde::{Deserialize, Serialize};

use crate::translate::Translator;

use super::Constraint;

/// Parameters of a checkbox field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxParameters {
    default: bool,
}

impl CheckboxParameters {
    /// The configured default value.
    pub fn default_value(&self) -> bool {
        self.default
    }

    /// Sets the default value.
    pub fn set_default_value(&mut self, value: bool) {
        self.default = value;
    }

    pub(super) fn constraints(&self, translator: &dyn Translator) -> Vec<Constraint> {
        vec![Constraint::Choice {
            choices: vec!["0".to_string(), "1".to_string()],
            message: translator.translate("field.value.boolean", &[]),
        }]
    }
}

/// Parses the stored `0`/`1` form.
pub(super) fn parse(text: &str) -> Option<bool> {
    match text {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}
