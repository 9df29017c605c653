use std::sync::Arc;

use shiftdesk_core::{AppError, AppResult, UserIdentity};
use shiftdesk_domain::{
    AuditAction, Capability, LeaveId, LeaveRequest, LeaveRequestInput, LeaveStatus,
};

use crate::AuthorizationService;
use crate::authorization_service::actor_id;
use crate::leave_approval_workflow::load_leave;
use crate::scheduling_ports::{AuditEvent, AuditRepository, Clock, SchedulingStore};

/// Employee-facing leave request lifecycle before a decision.
#[derive(Clone)]
pub struct LeaveRequestService {
    authorization_service: AuthorizationService,
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl LeaveRequestService {
    /// Creates a leave request service.
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

    /// Submits a new pending leave owned by the caller.
    pub async fn submit(
        &self,
        actor: &UserIdentity,
        input: LeaveRequestInput,
    ) -> AppResult<LeaveRequest> {
        self.authorization_service
            .require_capability(actor, Capability::SubmitRequests)
            .await?;

        let leave = LeaveRequest::new(LeaveId::new(), actor_id(actor), input, self.clock.now())?;
        let mut unit_of_work = self.store.begin().await?;
        unit_of_work.insert_leave(&leave).await?;
        unit_of_work.commit().await?;

        tracing::info!(
            leave_id = %leave.id(),
            user_id = %leave.user_id(),
            start_date = %leave.start_date(),
            end_date = %leave.end_date(),
            "leave submitted"
        );
        Ok(leave)
    }

    /// Edits a pending leave.
    pub async fn update(
        &self,
        actor: &UserIdentity,
        leave_id: LeaveId,
        input: LeaveRequestInput,
    ) -> AppResult<LeaveRequest> {
        let mut unit_of_work = self.store.begin().await?;
        let mut leave = load_leave(unit_of_work.as_mut(), leave_id).await?;
        self.require_owner_or_manager(actor, &leave).await?;

        leave.revise(input, self.clock.now())?;
        if !unit_of_work.save_leave_if_pending(&leave).await? {
            return Err(AppError::InvalidState(format!(
                "leave request '{leave_id}' was decided concurrently"
            )));
        }
        unit_of_work.commit().await?;

        Ok(leave)
    }

    /// Withdraws a pending leave.
    pub async fn cancel(&self, actor: &UserIdentity, leave_id: LeaveId) -> AppResult<LeaveRequest> {
        let mut unit_of_work = self.store.begin().await?;
        let mut leave = load_leave(unit_of_work.as_mut(), leave_id).await?;
        self.require_owner_or_manager(actor, &leave).await?;

        leave.cancel(self.clock.now())?;
        if !unit_of_work.save_leave_if_pending(&leave).await? {
            return Err(AppError::InvalidState(format!(
                "leave request '{leave_id}' was decided concurrently"
            )));
        }
        unit_of_work.commit().await?;

        self.append_audit_event(actor, AuditAction::LeaveCancelled, leave_id)
            .await;
        Ok(leave)
    }

    /// Deletes a leave. Owners may delete pending leaves; managers any leave.
    pub async fn delete(&self, actor: &UserIdentity, leave_id: LeaveId) -> AppResult<()> {
        let mut unit_of_work = self.store.begin().await?;
        let leave = load_leave(unit_of_work.as_mut(), leave_id).await?;

        let is_manager = self
            .authorization_service
            .has_capability(actor, Capability::ManageAnyLeave)
            .await?;
        if !is_manager {
            if !leave.is_owned_by(actor_id(actor)) {
                return Err(forbidden(actor, leave_id));
            }
            if leave.status() != LeaveStatus::Pending {
                return Err(AppError::InvalidState(format!(
                    "leave request '{leave_id}' is {} and can no longer be deleted",
                    leave.status().as_str()
                )));
            }
        }

        if !unit_of_work.delete_leave(leave_id).await? {
            return Err(AppError::NotFound(format!(
                "leave request '{leave_id}' does not exist"
            )));
        }
        unit_of_work.commit().await?;

        self.append_audit_event(actor, AuditAction::LeaveDeleted, leave_id)
            .await;
        Ok(())
    }

    async fn require_owner_or_manager(
        &self,
        actor: &UserIdentity,
        leave: &LeaveRequest,
    ) -> AppResult<()> {
        if leave.is_owned_by(actor_id(actor))
            || self
                .authorization_service
                .has_capability(actor, Capability::ManageAnyLeave)
                .await?
        {
            return Ok(());
        }

        Err(forbidden(actor, leave.id()))
    }

    async fn append_audit_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        leave_id: LeaveId,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                actor: actor_id(actor),
                action,
                resource_type: "leave_request".to_owned(),
                resource_id: leave_id.to_string(),
                detail: None,
            })
            .await;

        if let Err(error) = result {
            tracing::warn!(
                action = action.as_str(),
                leave_id = %leave_id,
                error = %error,
                "failed to append audit event after commit"
            );
        }
    }
}

fn forbidden(actor: &UserIdentity, leave_id: LeaveId) -> AppError {
    AppError::Forbidden(format!(
        "user '{}' cannot modify leave request '{leave_id}'",
        actor.user_id()
    ))
}
