//! State administration decisions.

use crate::error::DomainResult;
use crate::model::{State, Template, User};
use crate::resolver::Repository;

use super::DecisionEngine;

impl<R: Repository> DecisionEngine<R> {
    /// Whether `user` may add a state to the template.
    pub async fn can_create_state(&self, template: &Template, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && template.is_locked)
    }

    /// Whether `user` may update the state.
    pub async fn can_update_state(&self, state: &State, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && state.template.is_locked)
    }

    /// Whether `user` may delete the state. A state referenced by any
    /// lifecycle event is not deletable.
    pub async fn can_delete_state(&self, state: &State, user: &User) -> DomainResult<bool> {
        if !Self::acting_admin(user) || !state.template.is_locked {
            return Ok(false);
        }
        Ok(!self.reader.state_has_events(state.id).await?)
    }

    /// Whether `user` may designate the state as the template's initial
    /// state.
    pub async fn can_set_initial_state(&self, state: &State, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && state.template.is_locked)
    }

    /// Whether `user` may edit the state's transition tables and
    /// responsible groups.
    pub async fn can_manage_state_transitions(
        &self,
        state: &State,
        user: &User,
    ) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && state.template.is_locked)
    }
}
