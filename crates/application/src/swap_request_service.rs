use std::sync::Arc;

use shiftdesk_core::{AppError, AppResult, UserIdentity};
use shiftdesk_domain::{
    AuditAction, Capability, Decision, ShiftAssignment, ShiftId, SwapId, SwapRequest,
};

use crate::AuthorizationService;
use crate::authorization_service::actor_id;
use crate::shift_service::ensure_no_clash;
use crate::scheduling_ports::{
    AuditEvent, AuditRepository, Clock, SchedulingStore, SchedulingUnitOfWork,
};

/// Input for a new shift swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSwapInput {
    /// Shift currently assigned to the requester.
    pub source_shift_id: ShiftId,
    /// Shift the requester wants to take over.
    pub target_shift_id: ShiftId,
    /// Free-text reason.
    pub reason: String,
}

/// Shift swap requests between employees.
#[derive(Clone)]
pub struct SwapRequestService {
    authorization_service: AuthorizationService,
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SwapRequestService {
    /// Creates a swap request service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        store: Arc<dyn SchedulingStore>,
        clock: Arc<dyn Clock>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            store,
            clock,
            audit_repository,
        }
    }

    /// Requests to exchange one of the caller's shifts for another.
    pub async fn submit(
        &self,
        actor: &UserIdentity,
        input: SubmitSwapInput,
    ) -> AppResult<SwapRequest> {
        self.authorization_service
            .require_capability(actor, Capability::SubmitRequests)
            .await?;

        let requester = actor_id(actor);
        let swap = SwapRequest::new(
            SwapId::new(),
            requester,
            input.source_shift_id,
            input.target_shift_id,
            input.reason,
            self.clock.now(),
        )?;

        let mut unit_of_work = self.store.begin().await?;
        let source = load_shift(unit_of_work.as_mut(), swap.source_shift_id()).await?;
        if source.assigned_to() != Some(requester) {
            return Err(AppError::Forbidden(format!(
                "user '{requester}' is not assigned to shift '{}'",
                source.id()
            )));
        }
        load_shift(unit_of_work.as_mut(), swap.target_shift_id()).await?;

        unit_of_work.insert_swap(&swap).await?;
        unit_of_work.commit().await?;

        tracing::info!(swap_id = %swap.id(), requester = %requester, "swap requested");
        Ok(swap)
    }

    /// Approves a pending swap and exchanges the assignees of both shifts.
    pub async fn approve(
        &self,
        actor: &UserIdentity,
        swap_id: SwapId,
        note: Option<String>,
    ) -> AppResult<SwapRequest> {
        self.authorization_service
            .require_capability(actor, Capability::DecideRequests)
            .await?;

        let mut unit_of_work = self.store.begin().await?;
        let mut swap = load_swap(unit_of_work.as_mut(), swap_id).await?;
        swap.approve(self.decision(actor, note))?;
        if !unit_of_work.save_swap_if_pending(&swap).await? {
            return Err(already_decided(swap_id));
        }

        let mut source = load_shift(unit_of_work.as_mut(), swap.source_shift_id()).await?;
        if source.assigned_to() != Some(swap.requester()) {
            return Err(AppError::Conflict(format!(
                "user '{}' is no longer assigned to shift '{}'",
                swap.requester(),
                source.id()
            )));
        }
        let mut target = load_shift(unit_of_work.as_mut(), swap.target_shift_id()).await?;
        let source_assignee = source.assigned_to();
        source.assign_to(target.assigned_to());
        target.assign_to(source_assignee);
        unit_of_work.save_shift(&source).await?;
        unit_of_work.save_shift(&target).await?;

        // Both rewrites are staged, so each check sees the other's new owner.
        ensure_no_clash(unit_of_work.as_mut(), &source).await?;
        ensure_no_clash(unit_of_work.as_mut(), &target).await?;
        unit_of_work.commit().await?;

        tracing::info!(swap_id = %swap_id, admin_id = %actor.user_id(), "swap approved");
        self.append_audit_event(actor, AuditAction::SwapApproved, swap_id)
            .await;
        Ok(swap)
    }

    /// Rejects a pending swap.
    pub async fn reject(
        &self,
        actor: &UserIdentity,
        swap_id: SwapId,
        note: Option<String>,
    ) -> AppResult<SwapRequest> {
        self.authorization_service
            .require_capability(actor, Capability::DecideRequests)
            .await?;

        let mut unit_of_work = self.store.begin().await?;
        let mut swap = load_swap(unit_of_work.as_mut(), swap_id).await?;
        swap.reject(self.decision(actor, note))?;
        if !unit_of_work.save_swap_if_pending(&swap).await? {
            return Err(already_decided(swap_id));
        }
        unit_of_work.commit().await?;

        self.append_audit_event(actor, AuditAction::SwapRejected, swap_id)
            .await;
        Ok(swap)
    }

    fn decision(&self, actor: &UserIdentity, note: Option<String>) -> Decision {
        Decision {
            decided_by: actor_id(actor),
            decided_at: self.clock.now(),
            note,
        }
    }

    async fn append_audit_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        swap_id: SwapId,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                actor: actor_id(actor),
                action,
                resource_type: "swap_request".to_owned(),
                resource_id: swap_id.to_string(),
                detail: None,
            })
            .await;

        if let Err(error) = result {
            tracing::warn!(
                action = action.as_str(),
                swap_id = %swap_id,
                error = %error,
                "failed to append audit event after commit"
            );
        }
    }
}

fn already_decided(swap_id: SwapId) -> AppError {
    AppError::InvalidState(format!("swap request '{swap_id}' was decided concurrently"))
}

async fn load_swap(
    unit_of_work: &mut dyn SchedulingUnitOfWork,
    swap_id: SwapId,
) -> AppResult<SwapRequest> {
    unit_of_work
        .find_swap_by_id(swap_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("swap request '{swap_id}' does not exist")))
}

async fn load_shift(
    unit_of_work: &mut dyn SchedulingUnitOfWork,
    shift_id: ShiftId,
) -> AppResult<ShiftAssignment> {
    unit_of_work
        .find_shift_by_id(shift_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shift '{shift_id}' does not exist")))
}
