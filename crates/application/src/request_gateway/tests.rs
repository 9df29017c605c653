use std::sync::Arc;

use shiftdesk_core::AppError;
use shiftdesk_domain::{LeaveId, LeaveStatus, UserId, UserRole};

use crate::scheduling_ports::{ApproveLeaveOptions, LeaveListQuery};
use crate::test_support::{
    FakeAuditRepository, FakeRoleDirectory, FakeSchedulingStore, FixedClock, date, identity,
    pending_leave,
};
use crate::{AuthorizationService, LeaveApprovalWorkflow};

use super::RequestGateway;

struct Harness {
    store: Arc<FakeSchedulingStore>,
    gateway: RequestGateway,
    admin: UserId,
    employee: UserId,
}

fn harness() -> Harness {
    let admin = UserId::new();
    let employee = UserId::new();
    let store = Arc::new(FakeSchedulingStore::default());
    let authorization_service = AuthorizationService::new(Arc::new(
        FakeRoleDirectory::with_users([(admin, UserRole::Admin), (employee, UserRole::Employee)]),
    ));
    let workflow = LeaveApprovalWorkflow::new(
        store.clone(),
        Arc::new(FixedClock::default()),
        Arc::new(FakeAuditRepository::default()),
    );
    let gateway = RequestGateway::new(authorization_service, workflow, store.clone());

    Harness {
        store,
        gateway,
        admin,
        employee,
    }
}

#[tokio::test]
async fn employee_cannot_approve() {
    let harness = harness();
    let leave = pending_leave(harness.employee, date(8, 20), date(8, 22), false);
    harness.store.seed_leave(leave.clone()).await;

    let result = harness
        .gateway
        .approve(
            &identity(harness.employee),
            leave.id(),
            ApproveLeaveOptions::default(),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert_eq!(
        harness
            .store
            .snapshot()
            .await
            .leaves
            .get(&leave.id())
            .map(|value| value.status()),
        Some(LeaveStatus::Pending)
    );
}

#[tokio::test]
async fn admin_rejects_with_note() {
    let harness = harness();
    let leave = pending_leave(harness.employee, date(8, 20), date(8, 22), false);
    harness.store.seed_leave(leave.clone()).await;

    let rejected = harness
        .gateway
        .reject(
            &identity(harness.admin),
            leave.id(),
            Some("peak season".to_owned()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(rejected.status(), LeaveStatus::Rejected);
    assert_eq!(
        rejected.decision().and_then(|value| value.note.as_deref()),
        Some("peak season")
    );
}

#[tokio::test]
async fn get_unknown_leave_is_not_found() {
    let harness = harness();
    let result = harness
        .gateway
        .get(&identity(harness.admin), LeaveId::new())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn employee_cannot_read_foreign_leave() {
    let harness = harness();
    let leave = pending_leave(UserId::new(), date(8, 20), date(8, 22), false);
    harness.store.seed_leave(leave.clone()).await;

    let result = harness
        .gateway
        .get(&identity(harness.employee), leave.id())
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn employee_listing_is_scoped_to_own_leaves() {
    let harness = harness();
    let own = pending_leave(harness.employee, date(8, 20), date(8, 22), false);
    harness.store.seed_leave(own.clone()).await;
    harness
        .store
        .seed_leave(pending_leave(UserId::new(), date(8, 20), date(8, 22), false))
        .await;

    let listed = harness
        .gateway
        .list(&identity(harness.employee), LeaveListQuery::default())
        .await
        .unwrap_or_default();
    assert_eq!(listed, vec![own]);

    let all = harness
        .gateway
        .list(&identity(harness.admin), LeaveListQuery::default())
        .await
        .unwrap_or_default();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn list_rejects_out_of_range_limit() {
    let harness = harness();
    let result = harness
        .gateway
        .list(
            &identity(harness.admin),
            LeaveListQuery {
                limit: 500,
                ..LeaveListQuery::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}
