//! Project administration decisions.

use crate::error::DomainResult;
use crate::model::{Project, User};
use crate::resolver::Repository;

use super::DecisionEngine;

impl<R: Repository> DecisionEngine<R> {
    /// Whether `user` may create a project.
    pub async fn can_create_project(&self, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user))
    }

    /// Whether `user` may update the project.
    pub async fn can_update_project(&self, _project: &Project, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user))
    }

    /// Whether `user` may suspend the project.
    pub async fn can_suspend_project(&self, project: &Project, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && !project.is_suspended)
    }

    /// Whether `user` may resume the project.
    pub async fn can_resume_project(&self, project: &Project, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && project.is_suspended)
    }

    /// Whether `user` may delete the project. A project that still owns
    /// templates is not deletable.
    pub async fn can_delete_project(&self, project: &Project, user: &User) -> DomainResult<bool> {
        if !Self::acting_admin(user) {
            return Ok(false);
        }
        Ok(!self.reader.project_has_templates(project.id).await?)
    }
}
