mod conversions;
mod types;

pub use types::{
    ApproveLeaveRequest, DecisionNoteRequest, LeaveApprovalResponse, LeaveListParams,
    LeaveResponse, SaveLeaveRequest,
};
