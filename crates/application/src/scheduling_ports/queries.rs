use shiftdesk_domain::{LeaveRequest, LeaveStatus, ShiftId, UserId};

/// Page size used when a leave listing does not specify one.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Largest accepted page size for leave listings.
pub const MAX_LIST_LIMIT: usize = 200;

/// Filter and pagination for leave listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveListQuery {
    /// Restrict to one owner.
    pub user_id: Option<UserId>,
    /// Restrict to one status.
    pub status: Option<LeaveStatus>,
    /// Maximum number of rows, newest first.
    pub limit: usize,
    /// Rows to skip.
    pub offset: usize,
}

impl Default for LeaveListQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            status: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

/// Optional inputs to a leave approval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproveLeaveOptions {
    /// Replacement shift handed to the employee when the leave accepts a swap.
    pub new_shift_id: Option<ShiftId>,
    /// Free-text note stored with the decision.
    pub note: Option<String>,
}

/// Result of approving or reconciling a leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveApprovalOutcome {
    /// Leave after the decision.
    pub leave: LeaveRequest,
    /// Shifts removed because they overlapped the leave.
    pub deleted_shift_ids: Vec<ShiftId>,
    /// Replacement shift now assigned to the employee.
    pub reassigned_shift_id: Option<ShiftId>,
}
