use std::sync::Arc;

use shiftdesk_core::{AppError, AppResult};
use shiftdesk_domain::{
    AuditAction, Decision, LeaveId, LeaveRequest, LeaveStatus, ONLY_PENDING_DECIDABLE, ShiftId,
    UserId,
};

use crate::OverlapResolver;
use crate::scheduling_ports::{
    ApproveLeaveOptions, AuditEvent, AuditRepository, Clock, LeaveApprovalOutcome,
    SchedulingStore, SchedulingUnitOfWork,
};
use crate::shift_service::ensure_no_clash;

/// Decides leave requests and reconciles the schedule of approved ones.
///
/// Callers are expected to have checked that the acting user may decide
/// requests.
#[derive(Clone)]
pub struct LeaveApprovalWorkflow {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
    audit_repository: Arc<dyn AuditRepository>,
}

/// How the schedule absorbs an approved leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconciliation {
    /// Remove every conflicting shift.
    Vacate,
    /// Remove conflicting shifts and hand `replacement` to the employee.
    VacateAndReassign { replacement: ShiftId },
}

impl Reconciliation {
    fn for_leave(leave: &LeaveRequest, options: &ApproveLeaveOptions) -> AppResult<Self> {
        if !leave.accepts_swap() {
            return Ok(Self::Vacate);
        }

        options
            .new_shift_id
            .map(|replacement| Self::VacateAndReassign { replacement })
            .ok_or_else(|| {
                AppError::MissingParameter("no replacement shift id provided for swap".to_owned())
            })
    }

    fn replacement(self) -> Option<ShiftId> {
        match self {
            Self::Vacate => None,
            Self::VacateAndReassign { replacement } => Some(replacement),
        }
    }
}

impl LeaveApprovalWorkflow {
    /// Creates a workflow over the given ports.
    #[must_use]
    pub fn new(
        store: Arc<dyn SchedulingStore>,
        clock: Arc<dyn Clock>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            store,
            clock,
            audit_repository,
        }
    }

    /// Approves a pending leave and clears the employee's conflicting shifts.
    ///
    /// The status change, shift deletions, and replacement assignment commit
    /// together or not at all.
    pub async fn approve(
        &self,
        leave_id: LeaveId,
        admin_id: UserId,
        options: ApproveLeaveOptions,
    ) -> AppResult<LeaveApprovalOutcome> {
        let mut unit_of_work = self.store.begin().await?;
        let mut leave = load_leave(unit_of_work.as_mut(), leave_id).await?;

        leave.approve(Decision {
            decided_by: admin_id,
            decided_at: self.clock.now(),
            note: options.note.clone(),
        })?;
        let reconciliation = Reconciliation::for_leave(&leave, &options)?;

        if !unit_of_work.save_leave_if_pending(&leave).await? {
            return Err(AppError::InvalidState(ONLY_PENDING_DECIDABLE.to_owned()));
        }

        let outcome = reconcile_schedule(unit_of_work.as_mut(), leave, reconciliation).await?;
        unit_of_work.commit().await?;

        tracing::info!(
            leave_id = %leave_id,
            admin_id = %admin_id,
            deleted = outcome.deleted_shift_ids.len(),
            reassigned = outcome.reassigned_shift_id.is_some(),
            "leave approved"
        );

        self.append_audit_event(
            admin_id,
            AuditAction::LeaveApproved,
            "leave_request",
            leave_id.to_string(),
            outcome.leave.decision().and_then(|value| value.note.clone()),
        )
        .await;
        self.append_schedule_audit_events(admin_id, &outcome).await;

        Ok(outcome)
    }

    /// Rejects a pending leave. The schedule is left untouched.
    pub async fn reject(
        &self,
        leave_id: LeaveId,
        admin_id: UserId,
        note: Option<String>,
    ) -> AppResult<LeaveRequest> {
        let mut unit_of_work = self.store.begin().await?;
        let mut leave = load_leave(unit_of_work.as_mut(), leave_id).await?;

        leave.reject(Decision {
            decided_by: admin_id,
            decided_at: self.clock.now(),
            note: note.clone(),
        })?;

        if !unit_of_work.save_leave_if_pending(&leave).await? {
            return Err(AppError::InvalidState(ONLY_PENDING_DECIDABLE.to_owned()));
        }
        unit_of_work.commit().await?;

        tracing::info!(leave_id = %leave_id, admin_id = %admin_id, "leave rejected");
        self.append_audit_event(
            admin_id,
            AuditAction::LeaveRejected,
            "leave_request",
            leave_id.to_string(),
            note,
        )
        .await;

        Ok(leave)
    }

    /// Re-applies schedule reconciliation for an already approved leave.
    ///
    /// Shifts removed by an earlier run are simply no longer found, so a
    /// retry never deletes twice.
    pub async fn reconcile(
        &self,
        leave_id: LeaveId,
        options: ApproveLeaveOptions,
    ) -> AppResult<LeaveApprovalOutcome> {
        let mut unit_of_work = self.store.begin().await?;
        let leave = load_leave(unit_of_work.as_mut(), leave_id).await?;

        if leave.status() != LeaveStatus::Approved {
            return Err(AppError::InvalidState(format!(
                "leave request '{leave_id}' is {} and cannot be reconciled",
                leave.status().as_str()
            )));
        }

        let reconciliation = Reconciliation::for_leave(&leave, &options)?;
        let actor = leave
            .decision()
            .map(|decision| decision.decided_by)
            .unwrap_or_else(|| leave.user_id());

        let outcome = reconcile_schedule(unit_of_work.as_mut(), leave, reconciliation).await?;
        unit_of_work.commit().await?;

        tracing::info!(
            leave_id = %leave_id,
            deleted = outcome.deleted_shift_ids.len(),
            "leave schedule reconciled"
        );
        self.append_schedule_audit_events(actor, &outcome).await;

        Ok(outcome)
    }

    async fn append_schedule_audit_events(&self, actor: UserId, outcome: &LeaveApprovalOutcome) {
        let leave_id = outcome.leave.id();
        for shift_id in &outcome.deleted_shift_ids {
            self.append_audit_event(
                actor,
                AuditAction::ShiftVacated,
                "shift_assignment",
                shift_id.to_string(),
                Some(format!("leave_id={leave_id}")),
            )
            .await;
        }

        if let Some(shift_id) = outcome.reassigned_shift_id {
            self.append_audit_event(
                actor,
                AuditAction::ShiftReassigned,
                "shift_assignment",
                shift_id.to_string(),
                Some(format!(
                    "leave_id={leave_id} assigned_to={}",
                    outcome.leave.user_id()
                )),
            )
            .await;
        }
    }

    async fn append_audit_event(
        &self,
        actor: UserId,
        action: AuditAction,
        resource_type: &str,
        resource_id: String,
        detail: Option<String>,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                actor,
                action,
                resource_type: resource_type.to_owned(),
                resource_id: resource_id.clone(),
                detail,
            })
            .await;

        if let Err(error) = result {
            tracing::warn!(
                action = action.as_str(),
                resource_id = %resource_id,
                error = %error,
                "failed to append audit event after commit"
            );
        }
    }
}

pub(crate) async fn load_leave(
    unit_of_work: &mut dyn SchedulingUnitOfWork,
    leave_id: LeaveId,
) -> AppResult<LeaveRequest> {
    unit_of_work
        .find_leave_by_id(leave_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("leave request '{leave_id}' does not exist")))
}

async fn reconcile_schedule(
    unit_of_work: &mut dyn SchedulingUnitOfWork,
    leave: LeaveRequest,
    reconciliation: Reconciliation,
) -> AppResult<LeaveApprovalOutcome> {
    let replacement = reconciliation.replacement();
    let conflicting =
        OverlapResolver::resolve_in(unit_of_work, leave.user_id(), &leave.window()).await?;

    let deleted_shift_ids: Vec<ShiftId> = conflicting
        .iter()
        .map(|shift| shift.id())
        .filter(|shift_id| Some(*shift_id) != replacement)
        .collect();
    unit_of_work.delete_shifts(&deleted_shift_ids).await?;

    if let Some(shift_id) = replacement {
        let mut reassigned = unit_of_work
            .find_shift_by_id(shift_id)
            .await?
            .ok_or_else(|| missing_replacement(shift_id))?;
        reassigned.assign_to(Some(leave.user_id()));
        ensure_no_clash(unit_of_work, &reassigned).await?;

        if !unit_of_work
            .reassign_shift(shift_id, leave.user_id())
            .await?
        {
            return Err(missing_replacement(shift_id));
        }
    }

    Ok(LeaveApprovalOutcome {
        leave,
        deleted_shift_ids,
        reassigned_shift_id: replacement,
    })
}

fn missing_replacement(shift_id: ShiftId) -> AppError {
    AppError::NotFound(format!("replacement shift '{shift_id}' does not exist"))
}
