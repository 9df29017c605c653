use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shiftdesk_core::AppError;

/// Capabilities checked by application policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Submit and manage one's own leave and swap requests.
    SubmitRequests,
    /// Approve or reject leave and swap requests.
    DecideRequests,
    /// Create, edit, and delete shift assignments.
    ManageShifts,
    /// Edit or delete leave requests owned by anyone.
    ManageAnyLeave,
}

impl Capability {
    /// Returns a stable storage value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitRequests => "requests.submit",
            Self::DecideRequests => "requests.decide",
            Self::ManageShifts => "shifts.manage",
            Self::ManageAnyLeave => "leaves.manage_any",
        }
    }
}

/// Role tag projected for every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Scheduling administrator.
    Admin,
    /// Regular employee.
    Employee,
}

impl UserRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }

    /// Returns the capabilities granted by this role.
    #[must_use]
    pub fn capabilities(&self) -> &'static [Capability] {
        const ADMIN: &[Capability] = &[
            Capability::SubmitRequests,
            Capability::DecideRequests,
            Capability::ManageShifts,
            Capability::ManageAnyLeave,
        ];
        const EMPLOYEE: &[Capability] = &[Capability::SubmitRequests];

        match self {
            Self::Admin => ADMIN,
            Self::Employee => EMPLOYEE,
        }
    }

    /// Returns whether this role grants `capability`.
    #[must_use]
    pub fn grants(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            _ => Err(AppError::Validation(format!("unknown user role '{value}'"))),
        }
    }
}

/// Stable audit actions emitted by scheduling use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a leave request is approved.
    LeaveApproved,
    /// Emitted when a leave request is rejected.
    LeaveRejected,
    /// Emitted when a leave request is cancelled.
    LeaveCancelled,
    /// Emitted when a leave request is deleted.
    LeaveDeleted,
    /// Emitted for every shift removed by leave approval.
    ShiftVacated,
    /// Emitted when a replacement shift is assigned by leave approval.
    ShiftReassigned,
    /// Emitted when a swap request is approved.
    SwapApproved,
    /// Emitted when a swap request is rejected.
    SwapRejected,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeaveApproved => "leave.approved",
            Self::LeaveRejected => "leave.rejected",
            Self::LeaveCancelled => "leave.cancelled",
            Self::LeaveDeleted => "leave.deleted",
            Self::ShiftVacated => "shift.vacated",
            Self::ShiftReassigned => "shift.reassigned",
            Self::SwapApproved => "swap.approved",
            Self::SwapRejected => "swap.rejected",
        }
    }
}
