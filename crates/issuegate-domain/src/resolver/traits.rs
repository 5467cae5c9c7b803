//! Traits for storage lookups needed by the resolvers and voters.

use async_trait::async_trait;

use crate::error::DomainResult;
use crate::model::{
    FieldId, GroupId, IssueId, ListItemId, ProjectId, State, StateId, SystemRole, TemplateId,
    User, UserId,
};
use crate::permission::PermissionReader;

/// Workflow-graph lookups: transitions, dependencies, responsibles.
#[async_trait]
pub trait WorkflowReader: Send + Sync {
    /// Destination states of transitions out of `state_id` granted to
    /// any of the given system roles. With `exclude_final`, transitions
    /// into final states are left out.
    async fn find_role_transitions(
        &self,
        state_id: StateId,
        roles: &[SystemRole],
        exclude_final: bool,
    ) -> DomainResult<Vec<State>>;

    /// Destination states of transitions out of `state_id` granted to
    /// any of the given groups, with the same final-state exclusion.
    async fn find_group_transitions(
        &self,
        state_id: StateId,
        group_ids: &[GroupId],
        exclude_final: bool,
    ) -> DomainResult<Vec<State>>;

    /// Whether the issue has at least one unresolved dependency.
    async fn has_open_dependencies(&self, issue_id: IssueId) -> DomainResult<bool>;

    /// Groups whose members may be assigned responsible in a state.
    async fn find_responsible_groups(&self, state_id: StateId) -> DomainResult<Vec<GroupId>>;

    /// Members of the given groups.
    async fn find_group_members(&self, group_ids: &[GroupId]) -> DomainResult<Vec<User>>;
}

/// Existence queries backing the delete-guard checks.
///
/// These answer "is this entity referenced elsewhere" against the
/// persistence collaborator; the engine never walks references itself.
#[async_trait]
pub trait ExistenceReader: Send + Sync {
    /// Whether any stored field value references the field.
    async fn field_has_values(&self, field_id: FieldId) -> DomainResult<bool>;

    /// Whether any stored field value references the list item.
    async fn list_item_has_values(&self, item_id: ListItemId) -> DomainResult<bool>;

    /// Whether any lifecycle event references the state.
    async fn state_has_events(&self, state_id: StateId) -> DomainResult<bool>;

    /// Whether any issue was created from the template.
    async fn template_has_issues(&self, template_id: TemplateId) -> DomainResult<bool>;

    /// Whether the project still owns templates.
    async fn project_has_templates(&self, project_id: ProjectId) -> DomainResult<bool>;

    /// Whether the user appears in issue history or as an assignee.
    async fn user_is_referenced(&self, user_id: UserId) -> DomainResult<bool>;
}

/// The full lookup surface the decision engine needs.
pub trait Repository: PermissionReader + WorkflowReader + ExistenceReader {}

impl<T: PermissionReader + WorkflowReader + ExistenceReader> Repository for T {}
