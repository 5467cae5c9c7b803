//! User-account administration decisions.

use crate::error::DomainResult;
use crate::model::User;
use crate::resolver::Repository;

use super::DecisionEngine;

impl<R: Repository> DecisionEngine<R> {
    /// Whether `actor` may create user accounts.
    pub async fn can_create_user(&self, actor: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(actor))
    }

    /// Whether `actor` may update the subject account.
    pub async fn can_update_user(&self, _subject: &User, actor: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(actor))
    }

    /// Whether `actor` may delete the subject account.
    ///
    /// Self-deletion is refused, as is deleting an account still
    /// referenced in issue history or as a current assignee.
    pub async fn can_delete_user(&self, subject: &User, actor: &User) -> DomainResult<bool> {
        if !Self::acting_admin(actor) || actor.id == subject.id {
            return Ok(false);
        }
        Ok(!self.reader.user_is_referenced(subject.id).await?)
    }

    /// Whether `actor` may disable the subject account. Disabling your
    /// own account is refused.
    pub async fn can_disable_user(&self, subject: &User, actor: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(actor) && actor.id != subject.id && !subject.is_disabled)
    }

    /// Whether `actor` may re-enable the subject account.
    pub async fn can_enable_user(&self, subject: &User, actor: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(actor) && subject.is_disabled)
    }
}
