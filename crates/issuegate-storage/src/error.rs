//! Storage error types.

use thiserror::Error;

/// Storage-specific errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Project not found.
    #[error("project not found: {project_id}")]
    ProjectNotFound { project_id: u64 },

    /// Template not found.
    #[error("template not found: {template_id}")]
    TemplateNotFound { template_id: u64 },

    /// State not found.
    #[error("state not found: {state_id}")]
    StateNotFound { state_id: u64 },

    /// Issue not found.
    #[error("issue not found: {issue_id}")]
    IssueNotFound { issue_id: u64 },

    /// Group not found.
    #[error("group not found: {group_id}")]
    GroupNotFound { group_id: u64 },

    /// User not found.
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: u64 },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
