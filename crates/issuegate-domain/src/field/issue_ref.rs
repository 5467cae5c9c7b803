//! Issue-reference fields: a positive integer naming another issue.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::IssueId;
use crate::translate::Translator;

use super::Constraint;

static FORMAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("FORMAT_REGEX: invalid regex pattern"));

/// Parameters of an issue-reference field.
///
/// The kind carries no configuration: any positive issue id is accepted;
/// whether the referenced issue exists is the caller's lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRefParameters;

impl IssueRefParameters {
    pub(super) fn constraints(&self, translator: &dyn Translator) -> Vec<Constraint> {
        vec![
            Constraint::Regex {
                pattern: FORMAT_REGEX.as_str().to_string(),
                message: translator.translate("field.value.integer", &[]),
            },
            Constraint::GreaterThanZero {
                message: translator.translate("field.value.positive", &[]),
            },
        ]
    }
}

/// Parses a positive issue id.
pub(super) fn parse(text: &str) -> Option<IssueId> {
    text.parse::<u64>().ok().filter(|n| *n > 0).map(IssueId::new)
}
