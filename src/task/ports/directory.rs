//! Read-only access to the users tasks can be assigned to.

use super::TaskRepositoryResult;
use crate::task::domain::User;
use async_trait::async_trait;

/// User directory contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns every known user.
    async fn fetch_users(&self) -> TaskRepositoryResult<Vec<User>>;
}
