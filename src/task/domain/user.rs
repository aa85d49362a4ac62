//! Users that tasks can be assigned to. Read-only from the task workflow.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Display name shown when an assignee cannot be resolved.
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

/// A user known to the task tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    avatar: String,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            avatar: avatar.into(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the avatar reference.
    #[must_use]
    pub fn avatar(&self) -> &str {
        &self.avatar
    }
}
