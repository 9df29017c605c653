use std::sync::Arc;

use shiftdesk_core::{AppError, AppResult, UserIdentity};
use shiftdesk_domain::{Capability, LeaveId, LeaveRequest};

use crate::authorization_service::actor_id;
use crate::scheduling_ports::{
    ApproveLeaveOptions, LeaveApprovalOutcome, LeaveListQuery, MAX_LIST_LIMIT, SchedulingStore,
};
use crate::{AuthorizationService, LeaveApprovalWorkflow};

/// Entry point for deciding and reading leave requests on behalf of a caller.
#[derive(Clone)]
pub struct RequestGateway {
    authorization_service: AuthorizationService,
    workflow: LeaveApprovalWorkflow,
    store: Arc<dyn SchedulingStore>,
}

impl RequestGateway {
    /// Creates a gateway over the workflow and store.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        workflow: LeaveApprovalWorkflow,
        store: Arc<dyn SchedulingStore>,
    ) -> Self {
        Self {
            authorization_service,
            workflow,
            store,
        }
    }

    /// Approves a leave as an administrator.
    pub async fn approve(
        &self,
        actor: &UserIdentity,
        leave_id: LeaveId,
        options: ApproveLeaveOptions,
    ) -> AppResult<LeaveApprovalOutcome> {
        self.authorization_service
            .require_capability(actor, Capability::DecideRequests)
            .await?;

        self.workflow
            .approve(leave_id, actor_id(actor), options)
            .await
    }

    /// Rejects a leave as an administrator.
    pub async fn reject(
        &self,
        actor: &UserIdentity,
        leave_id: LeaveId,
        note: Option<String>,
    ) -> AppResult<LeaveRequest> {
        self.authorization_service
            .require_capability(actor, Capability::DecideRequests)
            .await?;

        self.workflow.reject(leave_id, actor_id(actor), note).await
    }

    /// Re-runs schedule reconciliation for an approved leave.
    pub async fn reconcile(
        &self,
        actor: &UserIdentity,
        leave_id: LeaveId,
        options: ApproveLeaveOptions,
    ) -> AppResult<LeaveApprovalOutcome> {
        self.authorization_service
            .require_capability(actor, Capability::DecideRequests)
            .await?;

        self.workflow.reconcile(leave_id, options).await
    }

    /// Returns one leave. Employees may only read their own.
    pub async fn get(&self, actor: &UserIdentity, leave_id: LeaveId) -> AppResult<LeaveRequest> {
        let leave = self
            .store
            .find_leave_by_id(leave_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("leave request '{leave_id}' does not exist"))
            })?;

        if !leave.is_owned_by(actor_id(actor))
            && !self
                .authorization_service
                .has_capability(actor, Capability::DecideRequests)
                .await?
        {
            return Err(AppError::Forbidden(format!(
                "user '{}' cannot read leave request '{leave_id}'",
                actor.user_id()
            )));
        }

        Ok(leave)
    }

    /// Lists leaves newest first. Employees only see their own.
    pub async fn list(
        &self,
        actor: &UserIdentity,
        mut query: LeaveListQuery,
    ) -> AppResult<Vec<LeaveRequest>> {
        if query.limit == 0 || query.limit > MAX_LIST_LIMIT {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_LIST_LIMIT}"
            )));
        }

        if !self
            .authorization_service
            .has_capability(actor, Capability::DecideRequests)
            .await?
        {
            query.user_id = Some(actor_id(actor));
        }

        self.store.list_leaves(query).await
    }
}

#[cfg(test)]
mod tests;
