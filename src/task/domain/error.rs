//! Error types for task domain validation and parsing.

use super::TaskStatus;
use thiserror::Error;

/// Validation rejections raised before any task mutation takes place.
///
/// The display text of each variant is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("Title is required")]
    EmptyTitle,

    /// The comment content is empty after trimming.
    #[error("Comment must not be empty")]
    EmptyComment,

    /// The requested status change skips the middle of the workflow.
    #[error("Cannot move task from {from} to {to}")]
    InvalidStatusTransition {
        /// Status the task is currently in.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
    },

    /// A task submitted with high priority has no assignee.
    #[error("High priority tasks must have an assignee")]
    HighPriorityWithoutAssignee,

    /// Priority was raised to high on a task that has no assignee.
    #[error("High priority tasks must have an assignee. Assign someone to this task first.")]
    AssigneeRequiredForHighPriority,

    /// The assignee was removed from a high-priority task.
    #[error(
        "Cannot remove the assignee from a high priority task. Change the priority first."
    )]
    HighPriorityRequiresAssignee,
}

/// Error returned while parsing a task status from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
