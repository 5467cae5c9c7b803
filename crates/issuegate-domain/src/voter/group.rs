//! Group administration decisions.

use crate::error::DomainResult;
use crate::model::{Group, User};
use crate::resolver::Repository;

use super::DecisionEngine;

impl<R: Repository> DecisionEngine<R> {
    /// Whether `user` may create a group.
    pub async fn can_create_group(&self, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user))
    }

    /// Whether `user` may update the group.
    pub async fn can_update_group(&self, _group: &Group, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user))
    }

    /// Whether `user` may delete the group.
    pub async fn can_delete_group(&self, _group: &Group, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user))
    }

    /// Whether `user` may add or remove group members.
    pub async fn can_manage_group_membership(
        &self,
        _group: &Group,
        user: &User,
    ) -> DomainResult<bool> {
        Ok(Self::acting_admin(user))
    }
}
