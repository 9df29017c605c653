use std::collections::HashMap;

use async_trait::async_trait;
use shiftdesk_application::{DirectoryUser, RoleDirectory};
use shiftdesk_core::AppResult;
use shiftdesk_domain::UserId;
use tokio::sync::RwLock;

/// In-memory role directory used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    users: RwLock<HashMap<UserId, DirectoryUser>>,
}

impl InMemoryRoleDirectory {
    /// Creates a directory pre-populated with `users`.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = DirectoryUser>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|user| (user.user_id, user)).collect()),
        }
    }

    /// Adds or replaces one user.
    pub async fn upsert(&self, user: DirectoryUser) {
        self.users.write().await.insert(user.user_id, user);
    }
}

#[async_trait]
impl RoleDirectory for InMemoryRoleDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<DirectoryUser>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use shiftdesk_application::{DirectoryUser, RoleDirectory};
    use shiftdesk_domain::{UserId, UserRole};

    use super::InMemoryRoleDirectory;

    #[tokio::test]
    async fn upsert_replaces_role() {
        let user_id = UserId::new();
        let directory = InMemoryRoleDirectory::with_users([DirectoryUser {
            user_id,
            display_name: "Mina".to_owned(),
            role: UserRole::Employee,
        }]);

        directory
            .upsert(DirectoryUser {
                user_id,
                display_name: "Mina".to_owned(),
                role: UserRole::Admin,
            })
            .await;

        let found = directory.find_user(user_id).await.unwrap_or_default();
        assert_eq!(found.map(|user| user.role), Some(UserRole::Admin));
        assert!(matches!(directory.find_user(UserId::new()).await, Ok(None)));
    }
}
