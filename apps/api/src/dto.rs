mod common;
mod leaves;
mod shifts;
mod swaps;

pub use common::HealthResponse;
pub use leaves::{
    ApproveLeaveRequest, DecisionNoteRequest, LeaveApprovalResponse, LeaveListParams,
    LeaveResponse, SaveLeaveRequest,
};
pub use shifts::{SaveShiftRequest, ShiftRangeParams, ShiftResponse};
pub use swaps::{CreateSwapRequest, SwapResponse};

pub(crate) use common::{parse_date, parse_optional_id};
