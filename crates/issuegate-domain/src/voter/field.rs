//! Field and list-item administration decisions.

use crate::error::DomainResult;
use crate::field::Field;
use crate::model::{ListItem, State, User};
use crate::resolver::Repository;

use super::DecisionEngine;

impl<R: Repository> DecisionEngine<R> {
    /// Whether `user` may add a field to the state.
    pub async fn can_create_field(&self, state: &State, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && state.template.is_locked)
    }

    /// Whether `user` may update a field of the state.
    pub async fn can_update_field(&self, state: &State, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && state.template.is_locked)
    }

    /// Whether `user` may delete the field.
    ///
    /// The admin gate comes first: for a non-admin the stored-value
    /// existence query is never reached. A field referenced by any
    /// stored value is not deletable.
    pub async fn can_delete_field(
        &self,
        state: &State,
        field: &Field,
        user: &User,
    ) -> DomainResult<bool> {
        if !Self::acting_admin(user) || !state.template.is_locked {
            return Ok(false);
        }
        Ok(!self.reader.field_has_values(field.id).await?)
    }

    /// Whether `user` may add a choice item to a list field.
    pub async fn can_create_list_item(&self, state: &State, user: &User) -> DomainResult<bool> {
        Ok(Self::acting_admin(user) && state.template.is_locked)
    }

    /// Whether `user` may delete the list item. An item referenced by
    /// any stored value is not deletable.
    pub async fn can_delete_list_item(
        &self,
        state: &State,
        item: &ListItem,
        user: &User,
    ) -> DomainResult<bool> {
        if !Self::acting_admin(user) || !state.template.is_locked {
            return Ok(false);
        }
        Ok(!self.reader.list_item_has_values(item.id).await?)
    }
}
