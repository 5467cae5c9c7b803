//! Responsible-assignment eligibility.

use std::sync::Arc;

use crate::error::DomainResult;
use crate::model::{State, User};

use super::traits::WorkflowReader;

/// Computes the users eligible to be assigned responsible in a state.
pub struct ResponsibleResolver<R> {
    reader: Arc<R>,
}

impl<R: WorkflowReader> ResponsibleResolver<R> {
    /// Creates a resolver over the given reader.
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    /// Members of the state's responsible groups, deduplicated and
    /// ordered by user id. A state with no responsible groups has no
    /// eligible assignees.
    pub async fn responsibles_for(&self, state: &State) -> DomainResult<Vec<User>> {
        let group_ids = self.reader.find_responsible_groups(state.id).await?;
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut members = self.reader.find_group_members(&group_ids).await?;
        members.sort_by_key(|user| user.id);
        members.dedup_by_key(|user| user.id);
        Ok(members)
    }
}
