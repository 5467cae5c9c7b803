//! List fields: a strict choice over the field's own items.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ListItem, ListItemId};
use crate::translate::Translator;

use super::Constraint;

static FORMAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("FORMAT_REGEX: invalid regex pattern"));

/// Parameters of a list field: its choice items and optional default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParameters {
    items: Vec<ListItem>,
    default: Option<ListItemId>,
}

impl ListParameters {
    /// Creates parameters over the given choice items.
    pub fn new(items: Vec<ListItem>) -> Self {
        Self {
            items,
            default: None,
        }
    }

    /// The field's choice items.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// The configured default item, if any.
    pub fn default_item(&self) -> Option<&ListItem> {
        let id = self.default?;
        self.items.iter().find(|item| item.id == id)
    }

    /// Sets the default item.
    ///
    /// Silently ignores an item that belongs to a different field.
    pub fn set_default_value(&mut self, item: &ListItem) {
        if self.items.iter().any(|own| own.id == item.id) {
            self.default = Some(item.id);
        } else {
            debug!(item = %item.id, "ignoring default item of a foreign field");
        }
    }

    /// Clears the default.
    pub fn clear_default_value(&mut self) {
        self.default = None;
    }

    /// Parses a submitted value into the matching item's stored value.
    pub(super) fn parse(&self, text: &str) -> Option<i32> {
        let value: i32 = text.parse().ok()?;
        self.items
            .iter()
            .find(|item| item.value == value)
            .map(|item| item.value)
    }

    pub(super) fn constraints(&self, translator: &dyn Translator) -> Vec<Constraint> {
        vec![
            Constraint::Regex {
                pattern: FORMAT_REGEX.as_str().to_string(),
                message: translator.translate("field.value.integer", &[]),
            },
            Constraint::GreaterThanZero {
                message: translator.translate("field.value.positive", &[]),
            },
            Constraint::Choice {
                choices: self.items.iter().map(|item| item.value.to_string()).collect(),
                message: translator.translate("field.value.unknown_item", &[]),
            },
        ]
    }
}
