//! Comments attached to tasks.

use super::{CommentId, TaskDomainError, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a task. Deleted together with its owning task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Materializes a submitted comment with its storage-assigned identifier
    /// and timestamp.
    #[must_use]
    pub fn from_new(new_comment: NewComment, id: CommentId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            task_id: new_comment.task_id,
            author_id: new_comment.author_id,
            content: new_comment.content,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Comment payload submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    task_id: TaskId,
    author_id: UserId,
    content: String,
}

impl NewComment {
    /// Creates a comment payload with trimmed content.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyComment`] if the content is blank.
    pub fn new(
        task_id: TaskId,
        author_id: UserId,
        content: impl AsRef<str>,
    ) -> Result<Self, TaskDomainError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyComment);
        }
        Ok(Self {
            task_id,
            author_id,
            content: trimmed.to_owned(),
        })
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}
