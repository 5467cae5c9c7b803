//! Entity snapshots consumed by the decision engine.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::types::{
    GroupId, IssueId, ListItemId, ProjectId, ResponsiblePolicy, StateId, StateKind, TemplateId,
    UserId,
};

/// A project grouping templates and their issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// A suspended project is a global kill-switch for every non-view
    /// action on its issues.
    pub is_suspended: bool,
}

/// A reusable workflow definition shared by many issues within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub project: Project,
    pub name: String,
    /// A locked template's workflow is immutable and cannot originate or
    /// mutate issues; structural edits happen only while locked.
    pub is_locked: bool,
    /// A template with no initial state cannot originate issues.
    pub initial_state_id: Option<StateId>,
    /// Days after closing before an issue becomes read-only. `None`
    /// disables freezing.
    pub frozen_time_days: Option<u32>,
}

/// A node in a template's workflow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub template: Template,
    pub name: String,
    pub kind: StateKind,
    pub responsible_policy: ResponsiblePolicy,
}

impl State {
    /// Whether issues in this state are closed.
    pub fn is_final(&self) -> bool {
        self.kind == StateKind::Final
    }
}

/// An issue snapshot, positioned in exactly one state of its template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub subject: String,
    pub author: UserId,
    pub responsible: Option<UserId>,
    pub state: State,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub is_suspended: bool,
}

impl Issue {
    /// The template this issue belongs to, via its current state.
    pub fn template(&self) -> &Template {
        &self.state.template
    }

    /// The project this issue belongs to.
    pub fn project(&self) -> &Project {
        &self.state.template.project
    }

    /// Whether the issue occupies a final state.
    pub fn is_closed(&self) -> bool {
        self.state.is_final()
    }

    /// Whether the issue has passed its template's frozen-time window.
    ///
    /// A frozen issue is read-only: only closed issues freeze, and only
    /// when the template configures a frozen time.
    pub fn is_frozen(&self, now: DateTime<Utc>) -> bool {
        let Some(days) = self.template().frozen_time_days else {
            return false;
        };
        match self.closed_at {
            Some(closed_at) => now - closed_at > Duration::days(i64::from(days)),
            None => false,
        }
    }

    /// Whether `user` authored this issue.
    pub fn is_author(&self, user: UserId) -> bool {
        self.author == user
    }

    /// Whether `user` is currently assigned responsible.
    pub fn is_responsible(&self, user: UserId) -> bool {
        self.responsible == Some(user)
    }
}

/// A choice item belonging to a list field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: ListItemId,
    pub field_id: super::types::FieldId,
    /// The stored integer value of the choice.
    pub value: i32,
    /// The display text of the choice.
    pub text: String,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub fullname: String,
    pub email: String,
    /// Global administrator flag gating all structural actions.
    pub is_admin: bool,
    pub is_disabled: bool,
}

/// An administrator-managed set of users, project-scoped or global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// `None` marks a global group.
    pub project_id: Option<ProjectId>,
    pub name: String,
}

impl Group {
    /// Whether the group is global rather than project-scoped.
    pub fn is_global(&self) -> bool {
        self.project_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn template(frozen_days: Option<u32>) -> Template {
        Template {
            id: TemplateId::new(1),
            project: Project {
                id: ProjectId::new(1),
                name: "Support".to_string(),
                is_suspended: false,
            },
            name: "Ticket".to_string(),
            is_locked: false,
            initial_state_id: Some(StateId::new(10)),
            frozen_time_days: frozen_days,
        }
    }

    fn issue_closed_at(frozen_days: Option<u32>, closed_at: Option<DateTime<Utc>>) -> Issue {
        let state = State {
            id: StateId::new(11),
            template: template(frozen_days),
            name: "Resolved".to_string(),
            kind: if closed_at.is_some() {
                StateKind::Final
            } else {
                StateKind::Normal
            },
            responsible_policy: ResponsiblePolicy::Remove,
        };
        Issue {
            id: IssueId::new(1),
            subject: "printer on fire".to_string(),
            author: UserId::new(1),
            responsible: None,
            state,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            closed_at,
            is_suspended: false,
        }
    }

    #[test]
    fn test_issue_is_closed_follows_state_kind() {
        let closed = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert!(issue_closed_at(None, Some(closed)).is_closed());
        assert!(!issue_closed_at(None, None).is_closed());
    }

    #[test]
    fn test_issue_freezes_after_frozen_time() {
        let closed = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let issue = issue_closed_at(Some(7), Some(closed));

        let within = closed + Duration::days(7);
        let past = closed + Duration::days(8);
        assert!(!issue.is_frozen(within), "still inside the window");
        assert!(issue.is_frozen(past), "window elapsed");
    }

    #[test]
    fn test_issue_never_freezes_without_policy() {
        let closed = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let issue = issue_closed_at(None, Some(closed));
        assert!(!issue.is_frozen(closed + Duration::days(3650)));
    }

    #[test]
    fn test_open_issue_never_freezes() {
        let issue = issue_closed_at(Some(1), None);
        assert!(!issue.is_frozen(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_role_helpers_compare_ids() {
        let mut issue = issue_closed_at(None, None);
        issue.responsible = Some(UserId::new(5));
        assert!(issue.is_author(UserId::new(1)));
        assert!(!issue.is_author(UserId::new(2)));
        assert!(issue.is_responsible(UserId::new(5)));
        assert!(!issue.is_responsible(UserId::new(1)));
    }
}
