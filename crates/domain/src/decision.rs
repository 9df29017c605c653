use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Administrator decision recorded on a leave or swap request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Administrator who decided the request.
    pub decided_by: UserId,
    /// Decision timestamp taken from the service clock.
    pub decided_at: DateTime<Utc>,
    /// Optional free-text note attached to the decision.
    pub note: Option<String>,
}
