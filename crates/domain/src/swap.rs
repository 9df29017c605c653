use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shiftdesk_core::{AppError, AppResult};

use crate::{Decision, ShiftId, SwapId, UserId};

/// Maximum number of characters accepted in a swap reason.
pub const SWAP_REASON_MAX_LENGTH: usize = 500;

/// Swap request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Approved and applied to both shifts.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl SwapStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for SwapStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::Validation(format!(
                "unknown swap status '{value}'"
            ))),
        }
    }
}

/// Persisted swap request fields used to rehydrate the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequestSnapshot {
    /// Swap identifier.
    pub id: SwapId,
    /// Employee asking for the swap.
    pub requester: UserId,
    /// Shift the requester currently holds.
    pub source_shift_id: ShiftId,
    /// Shift the requester wants instead.
    pub target_shift_id: ShiftId,
    /// Free-text reason.
    pub reason: String,
    /// Current status.
    pub status: SwapStatus,
    /// Decision metadata, present once decided.
    pub decision: Option<Decision>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request to exchange the assignees of two shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    id: SwapId,
    requester: UserId,
    source_shift_id: ShiftId,
    target_shift_id: ShiftId,
    reason: String,
    status: SwapStatus,
    decision: Option<Decision>,
    created_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Creates a validated pending swap request.
    pub fn new(
        id: SwapId,
        requester: UserId,
        source_shift_id: ShiftId,
        target_shift_id: ShiftId,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        if source_shift_id == target_shift_id {
            return Err(AppError::Validation(
                "swap source and target shift must differ".to_owned(),
            ));
        }

        let reason = reason.into().trim().to_owned();
        if reason.chars().count() > SWAP_REASON_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "swap reason must not exceed {SWAP_REASON_MAX_LENGTH} characters"
            )));
        }

        Ok(Self {
            id,
            requester,
            source_shift_id,
            target_shift_id,
            reason,
            status: SwapStatus::Pending,
            decision: None,
            created_at: now,
        })
    }

    /// Rebuilds a swap request from storage.
    #[must_use]
    pub fn from_snapshot(snapshot: SwapRequestSnapshot) -> Self {
        Self {
            id: snapshot.id,
            requester: snapshot.requester,
            source_shift_id: snapshot.source_shift_id,
            target_shift_id: snapshot.target_shift_id,
            reason: snapshot.reason,
            status: snapshot.status,
            decision: snapshot.decision,
            created_at: snapshot.created_at,
        }
    }

    /// Returns the swap identifier.
    #[must_use]
    pub fn id(&self) -> SwapId {
        self.id
    }

    /// Returns the requesting employee.
    #[must_use]
    pub fn requester(&self) -> UserId {
        self.requester
    }

    /// Returns the shift the requester gives away.
    #[must_use]
    pub fn source_shift_id(&self) -> ShiftId {
        self.source_shift_id
    }

    /// Returns the shift the requester takes over.
    #[must_use]
    pub fn target_shift_id(&self) -> ShiftId {
        self.target_shift_id
    }

    /// Returns the free-text reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> SwapStatus {
        self.status
    }

    /// Returns decision metadata once decided.
    #[must_use]
    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the swap approved.
    pub fn approve(&mut self, decision: Decision) -> AppResult<()> {
        self.decide(SwapStatus::Approved, decision)
    }

    /// Marks the swap rejected.
    pub fn reject(&mut self, decision: Decision) -> AppResult<()> {
        self.decide(SwapStatus::Rejected, decision)
    }

    fn decide(&mut self, status: SwapStatus, decision: Decision) -> AppResult<()> {
        if self.status != SwapStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "swap request '{}' is already {}",
                self.id,
                self.status.as_str()
            )));
        }

        self.status = status;
        self.decision = Some(decision);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use shiftdesk_core::AppError;

    use super::{SwapRequest, SwapStatus};
    use crate::{Decision, ShiftId, SwapId, UserId};

    #[test]
    fn swapping_a_shift_with_itself_is_rejected() {
        let shift_id = ShiftId::new();
        let created = SwapRequest::new(
            SwapId::new(),
            UserId::new(),
            shift_id,
            shift_id,
            "",
            Utc::now(),
        );
        assert!(matches!(created, Err(AppError::Validation(_))));
    }

    #[test]
    fn decided_swap_is_final() {
        let created = SwapRequest::new(
            SwapId::new(),
            UserId::new(),
            ShiftId::new(),
            ShiftId::new(),
            "doctor appointment",
            Utc::now(),
        );
        assert!(created.is_ok());
        let mut swap = created.unwrap_or_else(|_| unreachable!());

        let decision = Decision {
            decided_by: UserId::new(),
            decided_at: Utc::now(),
            note: None,
        };
        assert!(swap.reject(decision.clone()).is_ok());
        assert_eq!(swap.status(), SwapStatus::Rejected);
        assert!(matches!(
            swap.approve(decision),
            Err(AppError::InvalidState(_))
        ));
    }
}
