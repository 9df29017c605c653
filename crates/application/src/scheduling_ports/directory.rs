use async_trait::async_trait;
use shiftdesk_core::AppResult;
use shiftdesk_domain::{UserId, UserRole};

/// User projection known to the scheduling directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    /// User identifier.
    pub user_id: UserId,
    /// Display name.
    pub display_name: String,
    /// Role tag.
    pub role: UserRole,
}

/// Read port resolving users to their role tag.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Finds one user, or `None` when unknown.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<DirectoryUser>>;
}
