//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod decision;
mod ids;
mod leave;
mod schedule;
mod security;
mod shift;
mod swap;

pub use decision::Decision;
pub use ids::{LeaveId, ShiftId, SwapId, UserId};
pub use leave::{
    LEAVE_REASON_MAX_LENGTH, LeaveCategory, LeaveRequest, LeaveRequestInput, LeaveRequestSnapshot,
    LeaveStatus, MAX_SHIFT_PREFERENCES, ONLY_PENDING_DECIDABLE,
};
pub use schedule::{LeaveWindow, end_of_day, overlapping_shifts};
pub use security::{AuditAction, Capability, UserRole};
pub use shift::{ShiftAssignment, ShiftAssignmentInput, ShiftAssignmentSnapshot, ShiftStatus};
pub use swap::{SWAP_REASON_MAX_LENGTH, SwapRequest, SwapRequestSnapshot, SwapStatus};
