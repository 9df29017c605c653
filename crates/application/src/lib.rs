//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod leave_approval_workflow;
mod leave_request_service;
mod overlap_resolver;
mod request_gateway;
mod scheduling_ports;
mod shift_service;
mod swap_request_service;

#[cfg(test)]
mod test_support;

pub use authorization_service::{AuthorizationService, actor_id};
pub use leave_approval_workflow::LeaveApprovalWorkflow;
pub use leave_request_service::LeaveRequestService;
pub use overlap_resolver::OverlapResolver;
pub use request_gateway::RequestGateway;
pub use scheduling_ports::{
    ApproveLeaveOptions, AuditEvent, AuditRepository, Clock, DEFAULT_LIST_LIMIT, DirectoryUser,
    LeaveApprovalOutcome, LeaveListQuery, MAX_LIST_LIMIT, RoleDirectory, SchedulingStore,
    SchedulingUnitOfWork,
};
pub use shift_service::ShiftService;
pub use swap_request_service::{SubmitSwapInput, SwapRequestService};
