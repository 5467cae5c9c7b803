//! In-memory store for tests and examples.
//!
//! Backed by `DashMap` for thread-safe concurrent access without
//! explicit locks, mirroring how a SQL backend would answer the same
//! queries. Workflow configuration (permissions, transitions,
//! responsible groups) and issue data are kept in separate tables keyed
//! by raw entity ids.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use issuegate_domain::error::{DomainError, DomainResult};
use issuegate_domain::model::{
    FieldId, Group, GroupId, Issue, IssueId, ListItemId, Project, ProjectId, State, StateId,
    SystemRole, Template, TemplateId, TemplatePermission, User, UserId,
};
use issuegate_domain::permission::PermissionReader;
use issuegate_domain::resolver::{ExistenceReader, WorkflowReader};

use crate::error::{StorageError, StorageResult};

/// In-memory implementation of the engine's reader traits.
#[derive(Debug, Default)]
pub struct MemoryTrackerStore {
    projects: DashMap<u64, Project>,
    templates: DashMap<u64, Template>,
    states: DashMap<u64, State>,
    issues: DashMap<u64, Issue>,
    users: DashMap<u64, User>,
    groups: DashMap<u64, Group>,
    /// Group members per group id.
    members: DashMap<u64, HashSet<u64>>,
    /// Role permission grants per template id.
    role_permissions: DashMap<u64, HashSet<(SystemRole, TemplatePermission)>>,
    /// Group permission grants per (template id, group id).
    group_permissions: DashMap<(u64, u64), HashSet<TemplatePermission>>,
    /// Role-keyed transition edges per source state id.
    role_transitions: DashMap<u64, Vec<(SystemRole, State)>>,
    /// Group-keyed transition edges per source state id.
    group_transitions: DashMap<u64, Vec<(u64, State)>>,
    /// Dependency issue ids per issue id.
    dependencies: DashMap<u64, HashSet<u64>>,
    /// Responsible groups per state id.
    responsible_groups: DashMap<u64, Vec<GroupId>>,
    /// Stored field-value counts per field id.
    field_values: DashMap<u64, u64>,
    /// Stored field-value counts per list-item id.
    list_item_values: DashMap<u64, u64>,
    /// Lifecycle event counts per state id.
    state_events: DashMap<u64, u64>,
    /// Users referenced from issue history.
    referenced_users: DashMap<u64, u64>,
}

impl MemoryTrackerStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty store wrapped in `Arc`.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    // Configuration surface

    /// Inserts or replaces a project.
    pub fn put_project(&self, project: &Project) {
        self.projects.insert(project.id.get(), project.clone());
    }

    /// Inserts or replaces a template. The owning project must exist.
    #[instrument(skip(self, template), fields(template_id = %template.id))]
    pub fn put_template(&self, template: &Template) -> StorageResult<()> {
        if !self.projects.contains_key(&template.project.id.get()) {
            return Err(StorageError::ProjectNotFound {
                project_id: template.project.id.get(),
            });
        }
        self.templates.insert(template.id.get(), template.clone());
        Ok(())
    }

    /// Inserts or replaces a state. The owning template must exist.
    #[instrument(skip(self, state), fields(state_id = %state.id))]
    pub fn put_state(&self, state: &State) -> StorageResult<()> {
        if !self.templates.contains_key(&state.template.id.get()) {
            return Err(StorageError::TemplateNotFound {
                template_id: state.template.id.get(),
            });
        }
        self.states.insert(state.id.get(), state.clone());
        Ok(())
    }

    /// Inserts or replaces a user.
    pub fn put_user(&self, user: &User) {
        self.users.insert(user.id.get(), user.clone());
    }

    /// Inserts or replaces a group.
    pub fn put_group(&self, group: &Group) {
        self.groups.insert(group.id.get(), group.clone());
        self.members.entry(group.id.get()).or_default();
    }

    /// Adds a user to a group. Both must exist.
    pub fn add_group_member(&self, group_id: GroupId, user_id: UserId) -> StorageResult<()> {
        if !self.users.contains_key(&user_id.get()) {
            return Err(StorageError::UserNotFound {
                user_id: user_id.get(),
            });
        }
        let mut members =
            self.members
                .get_mut(&group_id.get())
                .ok_or(StorageError::GroupNotFound {
                    group_id: group_id.get(),
                })?;
        members.insert(user_id.get());
        Ok(())
    }

    /// Inserts or replaces an issue. Its state must exist.
    #[instrument(skip(self, issue), fields(issue_id = %issue.id))]
    pub fn put_issue(&self, issue: &Issue) -> StorageResult<()> {
        if !self.states.contains_key(&issue.state.id.get()) {
            return Err(StorageError::StateNotFound {
                state_id: issue.state.id.get(),
            });
        }
        self.issues.insert(issue.id.get(), issue.clone());
        // Every issue leaves a creation event in its state's history.
        *self.state_events.entry(issue.state.id.get()).or_insert(0) += 1;
        Ok(())
    }

    /// Grants a template permission to a system role.
    pub fn grant_role_permission(
        &self,
        template_id: TemplateId,
        role: SystemRole,
        permission: TemplatePermission,
    ) {
        self.role_permissions
            .entry(template_id.get())
            .or_default()
            .insert((role, permission));
    }

    /// Grants a template permission to a group.
    pub fn grant_group_permission(
        &self,
        template_id: TemplateId,
        group_id: GroupId,
        permission: TemplatePermission,
    ) {
        self.group_permissions
            .entry((template_id.get(), group_id.get()))
            .or_default()
            .insert(permission);
    }

    /// Adds a role-keyed transition edge.
    pub fn add_role_transition(
        &self,
        from: StateId,
        role: SystemRole,
        to: &State,
    ) -> StorageResult<()> {
        if !self.states.contains_key(&to.id.get()) {
            return Err(StorageError::StateNotFound {
                state_id: to.id.get(),
            });
        }
        self.role_transitions
            .entry(from.get())
            .or_default()
            .push((role, to.clone()));
        Ok(())
    }

    /// Adds a group-keyed transition edge.
    pub fn add_group_transition(
        &self,
        from: StateId,
        group_id: GroupId,
        to: &State,
    ) -> StorageResult<()> {
        if !self.states.contains_key(&to.id.get()) {
            return Err(StorageError::StateNotFound {
                state_id: to.id.get(),
            });
        }
        self.group_transitions
            .entry(from.get())
            .or_default()
            .push((group_id.get(), to.clone()));
        Ok(())
    }

    /// Adds a responsible group to a state.
    pub fn add_responsible_group(&self, state_id: StateId, group_id: GroupId) {
        self.responsible_groups
            .entry(state_id.get())
            .or_default()
            .push(group_id);
    }

    /// Records that `issue_id` depends on `depends_on`.
    pub fn add_dependency(&self, issue_id: IssueId, depends_on: IssueId) -> StorageResult<()> {
        if !self.issues.contains_key(&depends_on.get()) {
            return Err(StorageError::IssueNotFound {
                issue_id: depends_on.get(),
            });
        }
        self.dependencies
            .entry(issue_id.get())
            .or_default()
            .insert(depends_on.get());
        Ok(())
    }

    /// Records a stored value for a field.
    pub fn record_field_value(&self, field_id: FieldId) {
        *self.field_values.entry(field_id.get()).or_insert(0) += 1;
    }

    /// Records a stored value for a list item.
    pub fn record_list_item_value(&self, item_id: ListItemId) {
        *self.list_item_values.entry(item_id.get()).or_insert(0) += 1;
    }

    /// Records a reference to a user in issue history.
    pub fn record_user_reference(&self, user_id: UserId) {
        *self.referenced_users.entry(user_id.get()).or_insert(0) += 1;
    }
}

#[async_trait]
impl PermissionReader for MemoryTrackerStore {
    async fn find_role_permissions(
        &self,
        template_id: TemplateId,
    ) -> DomainResult<HashSet<(SystemRole, TemplatePermission)>> {
        Ok(self
            .role_permissions
            .get(&template_id.get())
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn find_group_permissions(
        &self,
        template_id: TemplateId,
        group_ids: &[GroupId],
    ) -> DomainResult<HashSet<TemplatePermission>> {
        let mut union = HashSet::new();
        for group in group_ids {
            if let Some(granted) = self.group_permissions.get(&(template_id.get(), group.get())) {
                union.extend(granted.value().iter().copied());
            }
        }
        Ok(union)
    }

    async fn find_user_groups(&self, user_id: UserId) -> DomainResult<Vec<GroupId>> {
        let mut found: Vec<GroupId> = self
            .members
            .iter()
            .filter(|entry| entry.value().contains(&user_id.get()))
            .map(|entry| GroupId::new(*entry.key()))
            .collect();
        found.sort();
        Ok(found)
    }
}

#[async_trait]
impl WorkflowReader for MemoryTrackerStore {
    async fn find_role_transitions(
        &self,
        state_id: StateId,
        roles: &[SystemRole],
        exclude_final: bool,
    ) -> DomainResult<Vec<State>> {
        let Some(edges) = self.role_transitions.get(&state_id.get()) else {
            return Ok(Vec::new());
        };
        Ok(edges
            .value()
            .iter()
            .filter(|(role, _)| roles.contains(role))
            .filter(|(_, to)| !exclude_final || !to.is_final())
            .map(|(_, to)| to.clone())
            .collect())
    }

    async fn find_group_transitions(
        &self,
        state_id: StateId,
        group_ids: &[GroupId],
        exclude_final: bool,
    ) -> DomainResult<Vec<State>> {
        let Some(edges) = self.group_transitions.get(&state_id.get()) else {
            return Ok(Vec::new());
        };
        let wanted: HashSet<u64> = group_ids.iter().map(|g| g.get()).collect();
        Ok(edges
            .value()
            .iter()
            .filter(|(group, _)| wanted.contains(group))
            .filter(|(_, to)| !exclude_final || !to.is_final())
            .map(|(_, to)| to.clone())
            .collect())
    }

    async fn has_open_dependencies(&self, issue_id: IssueId) -> DomainResult<bool> {
        let Some(deps) = self.dependencies.get(&issue_id.get()) else {
            return Ok(false);
        };
        for dep_id in deps.value() {
            let dep = self
                .issues
                .get(dep_id)
                .ok_or(DomainError::NotFound {
                    entity: "issue",
                    id: *dep_id,
                })?;
            if !dep.value().is_closed() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn find_responsible_groups(&self, state_id: StateId) -> DomainResult<Vec<GroupId>> {
        Ok(self
            .responsible_groups
            .get(&state_id.get())
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn find_group_members(&self, group_ids: &[GroupId]) -> DomainResult<Vec<User>> {
        let mut found = Vec::new();
        for group in group_ids {
            if let Some(member_ids) = self.members.get(&group.get()) {
                for user_id in member_ids.value() {
                    if let Some(user) = self.users.get(user_id) {
                        found.push(user.value().clone());
                    }
                }
            }
        }
        Ok(found)
    }
}

#[async_trait]
impl ExistenceReader for MemoryTrackerStore {
    async fn field_has_values(&self, field_id: FieldId) -> DomainResult<bool> {
        Ok(self
            .field_values
            .get(&field_id.get())
            .is_some_and(|count| *count > 0))
    }

    async fn list_item_has_values(&self, item_id: ListItemId) -> DomainResult<bool> {
        Ok(self
            .list_item_values
            .get(&item_id.get())
            .is_some_and(|count| *count > 0))
    }

    async fn state_has_events(&self, state_id: StateId) -> DomainResult<bool> {
        Ok(self
            .state_events
            .get(&state_id.get())
            .is_some_and(|count| *count > 0))
    }

    async fn template_has_issues(&self, template_id: TemplateId) -> DomainResult<bool> {
        Ok(self
            .issues
            .iter()
            .any(|entry| entry.value().template().id == template_id))
    }

    async fn project_has_templates(&self, project_id: ProjectId) -> DomainResult<bool> {
        Ok(self
            .templates
            .iter()
            .any(|entry| entry.value().project.id == project_id))
    }

    async fn user_is_referenced(&self, user_id: UserId) -> DomainResult<bool> {
        if self
            .referenced_users
            .get(&user_id.get())
            .is_some_and(|count| *count > 0)
        {
            return Ok(true);
        }
        // Authors and current assignees are implicit references.
        Ok(self.issues.iter().any(|entry| {
            let issue = entry.value();
            issue.author == user_id || issue.responsible == Some(user_id)
        }))
    }
}
