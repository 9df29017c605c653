use std::sync::Arc;

use shiftdesk_core::{AppError, AppResult, UserIdentity};
use shiftdesk_domain::{Capability, UserId, UserRole};

use crate::scheduling_ports::{DirectoryUser, RoleDirectory};

/// Application service for role and capability checks.
#[derive(Clone)]
pub struct AuthorizationService {
    directory: Arc<dyn RoleDirectory>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a directory implementation.
    #[must_use]
    pub fn new(directory: Arc<dyn RoleDirectory>) -> Self {
        Self { directory }
    }

    /// Resolves a caller id to a known directory user.
    pub async fn resolve_actor(&self, user_id: UserId) -> AppResult<DirectoryUser> {
        self.directory
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized(format!("unknown actor '{user_id}'")))
    }

    /// Returns the role tag of an authenticated caller.
    pub async fn role_of(&self, actor: &UserIdentity) -> AppResult<UserRole> {
        Ok(self.resolve_actor(actor_id(actor)).await?.role)
    }

    /// Returns whether the caller is an administrator.
    pub async fn is_admin(&self, actor: &UserIdentity) -> AppResult<bool> {
        Ok(self.role_of(actor).await? == UserRole::Admin)
    }

    /// Returns whether the caller holds the capability.
    pub async fn has_capability(
        &self,
        actor: &UserIdentity,
        capability: Capability,
    ) -> AppResult<bool> {
        Ok(self.role_of(actor).await?.grants(capability))
    }

    /// Ensures the caller holds the capability.
    pub async fn require_capability(
        &self,
        actor: &UserIdentity,
        capability: Capability,
    ) -> AppResult<()> {
        if self.has_capability(actor, capability).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{}' is missing capability '{}'",
            actor.user_id(),
            capability.as_str()
        )))
    }
}

/// Returns the domain user id of an authenticated caller.
#[must_use]
pub fn actor_id(actor: &UserIdentity) -> UserId {
    UserId::from_uuid(actor.user_id())
}
