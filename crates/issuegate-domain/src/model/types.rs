//! Identifier newtypes and workflow enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            /// Creates an identifier from its raw value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a project.
    ProjectId
);
id_type!(
    /// Identifies a workflow template.
    TemplateId
);
id_type!(
    /// Identifies a workflow state.
    StateId
);
id_type!(
    /// Identifies a custom field.
    FieldId
);
id_type!(
    /// Identifies a list-field choice item.
    ListItemId
);
id_type!(
    /// Identifies an issue.
    IssueId
);
id_type!(
    /// Identifies a user account.
    UserId
);
id_type!(
    /// Identifies a user group.
    GroupId
);

/// Role derived from the relationship between the acting user and an
/// issue, not from group membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemRole {
    /// Any authenticated user.
    Anyone,
    /// The user who created the issue.
    Author,
    /// The user currently assigned responsible.
    Responsible,
}

/// Action kinds grantable on a template, per role or per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplatePermission {
    ViewIssues,
    CreateIssues,
    EditIssues,
    DeleteIssues,
    ReassignIssues,
    SuspendIssues,
    ResumeIssues,
    AddComments,
    PrivateComments,
    AttachFiles,
    DeleteFiles,
    AddDependencies,
    RemoveDependencies,
}

/// Position of a state in its template's workflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    /// The state issues are created in.
    Initial,
    /// Any in-progress state.
    Normal,
    /// A terminal state; issues in it are closed.
    Final,
}

/// What happens to an issue's responsible assignment on entering a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponsiblePolicy {
    /// The current assignment is retained.
    Keep,
    /// An assignment is required on entry.
    Assign,
    /// The assignment is cleared on entry.
    Remove,
}
