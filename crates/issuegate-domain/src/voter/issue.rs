//! Issue action decisions: view, create, update, delete, state changes,
//! assignment, suspension, comments, files, and dependencies.

use crate::error::DomainResult;
use crate::model::{Issue, State, SystemRole, Template, TemplatePermission, User};
use crate::resolver::Repository;

use super::DecisionEngine;

impl<R: Repository> DecisionEngine<R> {
    /// Whether `user` may view the issue.
    ///
    /// Authors and current responsibles always pass, regardless of the
    /// permission tables and of the hard gate; everyone else needs the
    /// anyone-role or a group grant of ViewIssues.
    pub async fn can_view_issue(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) {
            return Ok(false);
        }
        if issue.is_author(user.id) || issue.is_responsible(user.id) {
            return Ok(true);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::ViewIssues)
            .await
    }

    /// Whether `user` may create an issue from the template.
    ///
    /// There is no issue yet, so only the anyone role and group grants
    /// apply. A template without an initial state cannot originate
    /// issues.
    pub async fn can_create_issue(&self, template: &Template, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) {
            return Ok(false);
        }
        if template.initial_state_id.is_none() {
            return Ok(false);
        }
        if template.is_locked || template.project.is_suspended {
            return Ok(false);
        }
        if self
            .permissions
            .has_role_permission(template, SystemRole::Anyone, TemplatePermission::CreateIssues)
            .await?
        {
            return Ok(true);
        }
        self.permissions
            .has_group_permission(template, user, TemplatePermission::CreateIssues)
            .await
    }

    /// Whether `user` may edit the issue's subject and field values.
    pub async fn can_update_issue(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_frozen(self.now) {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::EditIssues)
            .await
    }

    /// Whether `user` may delete the issue.
    pub async fn can_delete_issue(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_frozen(self.now) {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::DeleteIssues)
            .await
    }

    /// Whether `user` may move the issue into `target`.
    ///
    /// Granted purely through the transition resolver: the computed set
    /// must contain the requested destination.
    pub async fn can_change_state(
        &self,
        issue: &Issue,
        user: &User,
        target: &State,
    ) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_frozen(self.now) {
            return Ok(false);
        }
        let reachable = self
            .transitions
            .transitions_available_to(issue, user)
            .await?;
        Ok(reachable.iter().any(|state| state.id == target.id))
    }

    /// Whether `user` may reassign the issue's responsible.
    ///
    /// Only issues that already have a responsible can be reassigned.
    pub async fn can_reassign_issue(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_closed() {
            return Ok(false);
        }
        if issue.responsible.is_none() {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::ReassignIssues)
            .await
    }

    /// Whether `user` may reassign the issue to `target`, checking the
    /// target's eligibility for the current state.
    pub async fn can_reassign_issue_to(
        &self,
        issue: &Issue,
        user: &User,
        target: &User,
    ) -> DomainResult<bool> {
        if !self.can_reassign_issue(issue, user).await? {
            return Ok(false);
        }
        let eligible = self.responsibles.responsibles_for(&issue.state).await?;
        Ok(eligible.iter().any(|candidate| candidate.id == target.id))
    }

    /// Whether `user` may suspend the issue.
    pub async fn can_suspend_issue(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_closed() {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::SuspendIssues)
            .await
    }

    /// Whether `user` may resume the issue. Only a currently suspended
    /// issue can be resumed.
    pub async fn can_resume_issue(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if !issue.is_suspended || issue.is_closed() {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::ResumeIssues)
            .await
    }

    /// Whether `user` may add a public comment.
    pub async fn can_add_comment(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_frozen(self.now) {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::AddComments)
            .await
    }

    /// Whether `user` may add a private comment: public-comment
    /// eligibility plus the distinct PrivateComments grant.
    pub async fn can_add_private_comment(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !self.can_add_comment(issue, user).await? {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::PrivateComments)
            .await
    }

    /// Whether `user` may read private comments.
    ///
    /// Author and responsible are checked against PrivateComments
    /// granted to that specific role, then the anyone role, then
    /// groups. The generic composed check is deliberately not used
    /// here.
    pub async fn can_read_private_comments(
        &self,
        issue: &Issue,
        user: &User,
    ) -> DomainResult<bool> {
        if !Self::actor_enabled(user) {
            return Ok(false);
        }
        let template = issue.template();
        if issue.is_author(user.id)
            && self
                .permissions
                .has_role_permission(
                    template,
                    SystemRole::Author,
                    TemplatePermission::PrivateComments,
                )
                .await?
        {
            return Ok(true);
        }
        if issue.is_responsible(user.id)
            && self
                .permissions
                .has_role_permission(
                    template,
                    SystemRole::Responsible,
                    TemplatePermission::PrivateComments,
                )
                .await?
        {
            return Ok(true);
        }
        if self
            .permissions
            .has_role_permission(
                template,
                SystemRole::Anyone,
                TemplatePermission::PrivateComments,
            )
            .await?
        {
            return Ok(true);
        }
        self.permissions
            .has_group_permission(template, user, TemplatePermission::PrivateComments)
            .await
    }

    /// Whether `user` may attach a file. Denied outright while the
    /// configured maximum attachment size is zero.
    pub async fn can_attach_file(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if self.config.max_attachment_mb == 0 {
            return Ok(false);
        }
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_frozen(self.now) {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::AttachFiles)
            .await
    }

    /// Whether `user` may delete an attached file.
    pub async fn can_delete_file(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_frozen(self.now) {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::DeleteFiles)
            .await
    }

    /// Whether `user` may add a dependency to the issue.
    pub async fn can_add_dependency(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_closed() {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::AddDependencies)
            .await
    }

    /// Whether `user` may remove a dependency from the issue.
    pub async fn can_remove_dependency(&self, issue: &Issue, user: &User) -> DomainResult<bool> {
        if !Self::actor_enabled(user) || !Self::issue_gate(issue) {
            return Ok(false);
        }
        if issue.is_suspended || issue.is_closed() {
            return Ok(false);
        }
        self.permissions
            .has_permission(issue, user, TemplatePermission::RemoveDependencies)
            .await
    }
}
