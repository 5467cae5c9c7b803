//! Access decision engine.
//!
//! One request-scoped [`DecisionEngine`] answers every yes/no
//! authorization question: issue actions, template/state/field/list-item
//! structure, projects, users, and groups. The engine composes the
//! permission resolver (and its memoization cache), the transition
//! resolver, and the responsible resolver over a single repository.
//!
//! Decisions follow a consistent gating order for issue actions:
//! 1. hard gate: template locked or project suspended denies everything
//!    except pure view checks;
//! 2. issue-state gates: suspended/closed/frozen preconditions per
//!    action;
//! 3. permission lookup through the permission resolver.
//!
//! The engine never writes. A calling command handler wraps
//! decide → mutate → persist in one transaction so a decision cannot go
//! stale before the mutation commits.

mod field;
mod group;
mod issue;
mod project;
mod state;
mod template;
mod user;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::DomainResult;
use crate::model::{Issue, State, User};
use crate::permission::PermissionResolver;
use crate::resolver::{Repository, ResponsibleResolver, TransitionResolver};

/// Engine-wide configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum attachment size in megabytes. Zero disables attachments
    /// globally.
    pub max_attachment_mb: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attachment_mb: 2,
        }
    }
}

/// Request-scoped access decision engine.
///
/// Construct one per inbound command and drop it with the request; the
/// permission cache inside must not survive permission edits happening
/// between requests.
pub struct DecisionEngine<R> {
    reader: Arc<R>,
    permissions: PermissionResolver<R>,
    transitions: TransitionResolver<R>,
    responsibles: ResponsibleResolver<R>,
    config: EngineConfig,
    now: DateTime<Utc>,
}

impl<R: Repository> DecisionEngine<R> {
    /// Creates an engine with default configuration.
    pub fn new(reader: Arc<R>) -> Self {
        Self::with_config(reader, EngineConfig::default())
    }

    /// Creates an engine with custom configuration.
    pub fn with_config(reader: Arc<R>, config: EngineConfig) -> Self {
        Self {
            reader: Arc::clone(&reader),
            permissions: PermissionResolver::new(Arc::clone(&reader)),
            transitions: TransitionResolver::new(Arc::clone(&reader)),
            responsibles: ResponsibleResolver::new(reader),
            config,
            now: Utc::now(),
        }
    }

    /// Pins the engine's notion of "now", e.g. to re-evaluate a
    /// historical decision.
    pub fn at_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// The permission resolver, sharing this engine's cache.
    pub fn permissions(&self) -> &PermissionResolver<R> {
        &self.permissions
    }

    /// States the user may move the issue to, per the transition
    /// resolver. Exposed for "next states" listings.
    pub async fn transitions_for(&self, issue: &Issue, user: &User) -> DomainResult<Vec<State>> {
        self.transitions.transitions_available_to(issue, user).await
    }

    /// Users eligible to be assigned responsible in a state.
    pub async fn responsibles_for(&self, state: &State) -> DomainResult<Vec<User>> {
        self.responsibles.responsibles_for(state).await
    }

    /// Whether the actor may act at all: a disabled account is denied
    /// everywhere, the decision-function analog of "unauthenticated".
    fn actor_enabled(user: &User) -> bool {
        !user.is_disabled
    }

    /// Whether the actor holds the global administrator flag.
    fn acting_admin(user: &User) -> bool {
        Self::actor_enabled(user) && user.is_admin
    }

    /// The hard gate shared by every non-view issue action.
    fn issue_gate(issue: &Issue) -> bool {
        !issue.template().is_locked && !issue.project().is_suspended
    }
}
