//! Template administration decisions.
//!
//! Structural edits to a template's workflow only happen while the
//! template is locked (maintenance mode); the lock/unlock toggles each
//! require the opposite current state.

use crate::error::DomainResult;
use crate::model::{Template, User};
use crate::resolver::Repository;

use super::DecisionEngine;

impl<R: Repository> DecisionEngine<R> {
    /// Whether `user` may create a template.
    pub async fn can_create_template(&self, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user))
    }

    /// Whether `user` may update the template's descriptive attributes.
    pub async fn can_update_template(&self, _template: &Template, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user))
    }

    /// Whether `user` may delete the template. A template that ever
    /// originated an issue is not deletable.
    pub async fn can_delete_template(&self, template: &Template, user: &User) -> DomainResult<bool> {
        if !Self::acting_admin(user) {
            return Ok(false);
        }
        Ok(!self.reader.template_has_issues(template.id).await?)
    }

    /// Whether `user` may lock the template for editing.
    pub async fn can_lock_template(&self, template: &Template, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && !template.is_locked)
    }

    /// Whether `user` may unlock the template, releasing the workflow
    /// to originate issues again.
    pub async fn can_unlock_template(&self, template: &Template, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && template.is_locked)
    }

    /// Whether `user` may edit the template's role and group permission
    /// tables.
    pub async fn can_manage_template_permissions(
        &self,
        template: &Template,
        user: &User,
    ) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && template.is_locked)
    }
}
