//! State-transition resolution with dependency-aware filtering.

use std::sync::Arc;

use tracing::debug;

use crate::error::DomainResult;
use crate::model::{Issue, State, SystemRole, User};
use crate::permission::PermissionReader;

use super::traits::WorkflowReader;

/// Computes the states an issue may transition to for a given user.
pub struct TransitionResolver<R> {
    reader: Arc<R>,
}

impl<R> TransitionResolver<R>
where
    R: WorkflowReader + PermissionReader,
{
    /// Creates a resolver over the given reader.
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    /// The set of destination states reachable by `user` from the
    /// issue's current state, ordered by state id.
    ///
    /// Role-keyed and group-keyed transitions are queried independently
    /// and unioned. While the issue has open dependencies, transitions
    /// into final states are excluded from both queries; once every
    /// dependency is closed, final states come back normally.
    ///
    /// Callers gate on template lock and project suspension before
    /// consulting the resolver.
    pub async fn transitions_available_to(
        &self,
        issue: &Issue,
        user: &User,
    ) -> DomainResult<Vec<State>> {
        let mut roles = vec![SystemRole::Anyone];
        if issue.is_author(user.id) {
            roles.push(SystemRole::Author);
        }
        if issue.is_responsible(user.id) {
            roles.push(SystemRole::Responsible);
        }

        let exclude_final = self.reader.has_open_dependencies(issue.id).await?;
        if exclude_final {
            debug!(issue = %issue.id, "open dependencies exclude final destinations");
        }

        let mut states = self
            .reader
            .find_role_transitions(issue.state.id, &roles, exclude_final)
            .await?;

        let group_ids = self.reader.find_user_groups(user.id).await?;
        if !group_ids.is_empty() {
            let by_group = self
                .reader
                .find_group_transitions(issue.state.id, &group_ids, exclude_final)
                .await?;
            states.extend(by_group);
        }

        states.sort_by_key(|state| state.id);
        states.dedup_by_key(|state| state.id);
        Ok(states)
    }
}
