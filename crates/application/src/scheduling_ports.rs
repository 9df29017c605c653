mod audit;
mod clock;
mod directory;
mod queries;
mod store;

pub use audit::{AuditEvent, AuditRepository};
pub use clock::Clock;
pub use directory::{DirectoryUser, RoleDirectory};
pub use queries::{
    ApproveLeaveOptions, DEFAULT_LIST_LIMIT, LeaveApprovalOutcome, LeaveListQuery, MAX_LIST_LIMIT,
};
pub use store::{SchedulingStore, SchedulingUnitOfWork};
