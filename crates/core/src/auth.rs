use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated caller resolved by the upstream auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: Uuid,
    display_name: String,
}

impl UserIdentity {
    /// Creates a user identity from an authenticated subject.
    #[must_use]
    pub fn new(user_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}
