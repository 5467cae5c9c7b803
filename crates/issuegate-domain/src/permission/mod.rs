//! Permission resolution with request-scoped memoization.
//!
//! The resolver answers whether a role or group grants a template
//! permission, and composes both into the per-issue `has_permission`
//! check (author role, responsible role, anyone role, then groups).
//!
//! # Caching
//!
//! The full role-permission set of a template and the full
//! group-permission set of a (template, user) pair are each fetched once
//! per resolver instance and memoized under composite string keys. The
//! resolver is request-scoped: construct it with the decision engine for
//! one inbound command and drop it with the request. Holding it across
//! requests would serve stale permissions after an administrator edit.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::error::DomainResult;
use crate::model::{GroupId, Issue, SystemRole, Template, TemplateId, TemplatePermission, User, UserId};

/// Storage lookups needed for permission resolution.
#[async_trait]
pub trait PermissionReader: Send + Sync {
    /// All (role, permission) grants of a template.
    async fn find_role_permissions(
        &self,
        template_id: TemplateId,
    ) -> DomainResult<HashSet<(SystemRole, TemplatePermission)>>;

    /// The union of permissions granted to any of the given groups on a
    /// template.
    async fn find_group_permissions(
        &self,
        template_id: TemplateId,
        group_ids: &[GroupId],
    ) -> DomainResult<HashSet<TemplatePermission>>;

    /// The groups a user belongs to.
    async fn find_user_groups(&self, user_id: UserId) -> DomainResult<Vec<GroupId>>;
}

/// Request-scoped permission resolver.
pub struct PermissionResolver<R> {
    reader: Arc<R>,
    /// Role grants per `"{template_id}"`.
    roles: DashMap<String, Arc<HashSet<(SystemRole, TemplatePermission)>>>,
    /// Group grants per `"{template_id}:{user_id}"`.
    groups: DashMap<String, Arc<HashSet<TemplatePermission>>>,
}

impl<R: PermissionReader> PermissionResolver<R> {
    /// Creates a resolver over the given reader.
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            reader,
            roles: DashMap::new(),
            groups: DashMap::new(),
        }
    }

    /// Whether the template grants `permission` to the system role.
    pub async fn has_role_permission(
        &self,
        template: &Template,
        role: SystemRole,
        permission: TemplatePermission,
    ) -> DomainResult<bool> {
        Ok(self
            .role_permissions(template.id)
            .await?
            .contains(&(role, permission)))
    }

    /// Whether any group of `user` holds `permission` on the template.
    pub async fn has_group_permission(
        &self,
        template: &Template,
        user: &User,
        permission: TemplatePermission,
    ) -> DomainResult<bool> {
        Ok(self
            .group_permissions(template.id, user.id)
            .await?
            .contains(&permission))
    }

    /// The composed per-issue permission check.
    ///
    /// Denies outright while the issue's template is locked or its
    /// project suspended; otherwise checks the author role (if the user
    /// authored the issue), the responsible role (if currently
    /// assigned), the anyone role, and finally the user's groups.
    /// No grant means no permission.
    pub async fn has_permission(
        &self,
        issue: &Issue,
        user: &User,
        permission: TemplatePermission,
    ) -> DomainResult<bool> {
        let template = issue.template();
        if template.is_locked || template.project.is_suspended {
            return Ok(false);
        }
        if issue.is_author(user.id)
            && self
                .has_role_permission(template, SystemRole::Author, permission)
                .await?
        {
            return Ok(true);
        }
        if issue.is_responsible(user.id)
            && self
                .has_role_permission(template, SystemRole::Responsible, permission)
                .await?
        {
            return Ok(true);
        }
        if self
            .has_role_permission(template, SystemRole::Anyone, permission)
            .await?
        {
            return Ok(true);
        }
        self.has_group_permission(template, user, permission).await
    }

    async fn role_permissions(
        &self,
        template_id: TemplateId,
    ) -> DomainResult<Arc<HashSet<(SystemRole, TemplatePermission)>>> {
        let key = template_id.to_string();
        if let Some(found) = self.roles.get(&key) {
            return Ok(found.value().clone());
        }
        debug!(template = %template_id, "role permission cache miss");
        let fetched = Arc::new(self.reader.find_role_permissions(template_id).await?);
        self.roles.insert(key, Arc::clone(&fetched));
        Ok(fetched)
    }

    async fn group_permissions(
        &self,
        template_id: TemplateId,
        user_id: UserId,
    ) -> DomainResult<Arc<HashSet<TemplatePermission>>> {
        let key = format!("{template_id}:{user_id}");
        if let Some(found) = self.groups.get(&key) {
            return Ok(found.value().clone());
        }
        debug!(template = %template_id, user = %user_id, "group permission cache miss");
        let group_ids = self.reader.find_user_groups(user_id).await?;
        let fetched = Arc::new(
            self.reader
                .find_group_permissions(template_id, &group_ids)
                .await?,
        );
        self.groups.insert(key, Arc::clone(&fetched));
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use chrono::Utc;

    use super::*;
    use crate::model::{
        IssueId, ProjectId, ResponsiblePolicy, StateId, StateKind, State, Project,
    };

    /// Counting reader: grants are fixed, every fetch is tallied.
    #[derive(Default)]
    struct CountingReader {
        role_grants: HashSet<(SystemRole, TemplatePermission)>,
        group_grants: HashSet<TemplatePermission>,
        user_groups: Vec<GroupId>,
        role_queries: AtomicU32,
        group_queries: AtomicU32,
    }

    #[async_trait]
    impl PermissionReader for CountingReader {
        async fn find_role_permissions(
            &self,
            _template_id: TemplateId,
        ) -> DomainResult<HashSet<(SystemRole, TemplatePermission)>> {
            self.role_queries.fetch_add(1, Ordering::Relaxed);
            Ok(self.role_grants.clone())
        }

        async fn find_group_permissions(
            &self,
            _template_id: TemplateId,
            group_ids: &[GroupId],
        ) -> DomainResult<HashSet<TemplatePermission>> {
            self.group_queries.fetch_add(1, Ordering::Relaxed);
            if group_ids.is_empty() {
                return Ok(HashSet::new());
            }
            Ok(self.group_grants.clone())
        }

        async fn find_user_groups(&self, _user_id: UserId) -> DomainResult<Vec<GroupId>> {
            Ok(self.user_groups.clone())
        }
    }

    fn template(locked: bool, suspended: bool) -> Template {
        Template {
            id: TemplateId::new(1),
            project: Project {
                id: ProjectId::new(1),
                name: "Support".to_string(),
                is_suspended: suspended,
            },
            name: "Ticket".to_string(),
            is_locked: locked,
            initial_state_id: Some(StateId::new(10)),
            frozen_time_days: None,
        }
    }

    fn issue(template: Template) -> Issue {
        Issue {
            id: IssueId::new(1),
            subject: "test".to_string(),
            author: UserId::new(1),
            responsible: Some(UserId::new(2)),
            state: State {
                id: StateId::new(10),
                template,
                name: "New".to_string(),
                kind: StateKind::Initial,
                responsible_policy: ResponsiblePolicy::Assign,
            },
            created_at: Utc::now(),
            closed_at: None,
            is_suspended: false,
        }
    }

    fn user(id: u64) -> User {
        User {
            id: UserId::new(id),
            fullname: format!("user {id}"),
            email: format!("u{id}@example.com"),
            is_admin: false,
            is_disabled: false,
        }
    }

    #[tokio::test]
    async fn test_no_grant_means_deny() {
        let resolver = PermissionResolver::new(Arc::new(CountingReader::default()));
        let issue = issue(template(false, false));
        let allowed = resolver
            .has_permission(&issue, &user(9), TemplatePermission::EditIssues)
            .await
            .unwrap();
        assert!(!allowed, "closed-world default is deny");
    }

    #[tokio::test]
    async fn test_author_role_grant() {
        let reader = CountingReader {
            role_grants: [(SystemRole::Author, TemplatePermission::EditIssues)].into(),
            ..Default::default()
        };
        let resolver = PermissionResolver::new(Arc::new(reader));
        let issue = issue(template(false, false));
        assert!(resolver
            .has_permission(&issue, &user(1), TemplatePermission::EditIssues)
            .await
            .unwrap());
        assert!(
            !resolver
                .has_permission(&issue, &user(3), TemplatePermission::EditIssues)
                .await
                .unwrap(),
            "author grant must not leak to other users"
        );
    }

    #[tokio::test]
    async fn test_responsible_role_grant() {
        let reader = CountingReader {
            role_grants: [(SystemRole::Responsible, TemplatePermission::ReassignIssues)].into(),
            ..Default::default()
        };
        let resolver = PermissionResolver::new(Arc::new(reader));
        let issue = issue(template(false, false));
        assert!(resolver
            .has_permission(&issue, &user(2), TemplatePermission::ReassignIssues)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_group_grant_fallback() {
        let reader = CountingReader {
            group_grants: [TemplatePermission::AddComments].into(),
            user_groups: vec![GroupId::new(7)],
            ..Default::default()
        };
        let resolver = PermissionResolver::new(Arc::new(reader));
        let issue = issue(template(false, false));
        assert!(resolver
            .has_permission(&issue, &user(9), TemplatePermission::AddComments)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_locked_template_is_a_kill_switch() {
        let reader = CountingReader {
            role_grants: [(SystemRole::Anyone, TemplatePermission::EditIssues)].into(),
            ..Default::default()
        };
        let resolver = PermissionResolver::new(Arc::new(reader));
        let issue = issue(template(true, false));
        assert!(!resolver
            .has_permission(&issue, &user(9), TemplatePermission::EditIssues)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_suspended_project_is_a_kill_switch() {
        let reader = CountingReader {
            role_grants: [(SystemRole::Anyone, TemplatePermission::EditIssues)].into(),
            ..Default::default()
        };
        let resolver = PermissionResolver::new(Arc::new(reader));
        let issue = issue(template(false, true));
        assert!(!resolver
            .has_permission(&issue, &user(9), TemplatePermission::EditIssues)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_role_permissions_fetched_once() {
        let reader = Arc::new(CountingReader {
            role_grants: [(SystemRole::Anyone, TemplatePermission::ViewIssues)].into(),
            ..Default::default()
        });
        let resolver = PermissionResolver::new(Arc::clone(&reader));
        let tpl = template(false, false);

        for _ in 0..3 {
            let allowed = resolver
                .has_role_permission(&tpl, SystemRole::Anyone, TemplatePermission::ViewIssues)
                .await
                .unwrap();
            assert!(allowed);
        }
        assert_eq!(
            reader.role_queries.load(Ordering::Relaxed),
            1,
            "repeat lookups must hit the cache"
        );
    }

    #[tokio::test]
    async fn test_group_permissions_fetched_once_per_user() {
        let reader = Arc::new(CountingReader {
            group_grants: [TemplatePermission::ViewIssues].into(),
            user_groups: vec![GroupId::new(7)],
            ..Default::default()
        });
        let resolver = PermissionResolver::new(Arc::clone(&reader));
        let tpl = template(false, false);

        for _ in 0..3 {
            resolver
                .has_group_permission(&tpl, &user(4), TemplatePermission::ViewIssues)
                .await
                .unwrap();
        }
        resolver
            .has_group_permission(&tpl, &user(5), TemplatePermission::ViewIssues)
            .await
            .unwrap();
        assert_eq!(
            reader.group_queries.load(Ordering::Relaxed),
            2,
            "one fetch per (template, user) pair"
        );
    }

    #[tokio::test]
    async fn test_composite_keys_do_not_bleed() {
        // (template 1, user 11) and (template 11, user 1) must occupy
        // distinct cache slots.
        let key_a = format!("{}:{}", TemplateId::new(1), UserId::new(11));
        let key_b = format!("{}:{}", TemplateId::new(11), UserId::new(1));
        assert_ne!(key_a, key_b);
    }
}
