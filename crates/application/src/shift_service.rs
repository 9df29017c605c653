use std::sync::Arc;

use chrono::NaiveDate;
use shiftdesk_core::{AppError, AppResult, UserIdentity};
use shiftdesk_domain::{Capability, ShiftAssignment, ShiftAssignmentInput, ShiftId, UserId};

use crate::AuthorizationService;
use crate::authorization_service::actor_id;
use crate::scheduling_ports::{SchedulingStore, SchedulingUnitOfWork};

/// Administrator maintenance of shift assignments.
#[derive(Clone)]
pub struct ShiftService {
    authorization_service: AuthorizationService,
    store: Arc<dyn SchedulingStore>,
}

impl ShiftService {
    /// Creates a shift service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        store: Arc<dyn SchedulingStore>,
    ) -> Self {
        Self {
            authorization_service,
            store,
        }
    }

    /// Creates a shift.
    pub async fn create(
        &self,
        actor: &UserIdentity,
        input: ShiftAssignmentInput,
    ) -> AppResult<ShiftAssignment> {
        self.authorization_service
            .require_capability(actor, Capability::ManageShifts)
            .await?;

        let shift = ShiftAssignment::new(ShiftId::new(), input)?;
        let mut unit_of_work = self.store.begin().await?;
        ensure_no_clash(unit_of_work.as_mut(), &shift).await?;
        unit_of_work.save_shift(&shift).await?;
        unit_of_work.commit().await?;

        tracing::info!(shift_id = %shift.id(), date = %shift.date(), "shift created");
        Ok(shift)
    }

    /// Replaces the editable fields of a shift.
    pub async fn update(
        &self,
        actor: &UserIdentity,
        shift_id: ShiftId,
        input: ShiftAssignmentInput,
    ) -> AppResult<ShiftAssignment> {
        self.authorization_service
            .require_capability(actor, Capability::ManageShifts)
            .await?;

        let mut unit_of_work = self.store.begin().await?;
        let mut shift = unit_of_work
            .find_shift_by_id(shift_id)
            .await?
            .ok_or_else(|| not_found(shift_id))?;
        shift.revise(input)?;
        ensure_no_clash(unit_of_work.as_mut(), &shift).await?;
        unit_of_work.save_shift(&shift).await?;
        unit_of_work.commit().await?;

        Ok(shift)
    }

    /// Deletes a shift.
    pub async fn delete(&self, actor: &UserIdentity, shift_id: ShiftId) -> AppResult<()> {
        self.authorization_service
            .require_capability(actor, Capability::ManageShifts)
            .await?;

        let mut unit_of_work = self.store.begin().await?;
        if unit_of_work.delete_shifts(&[shift_id]).await? == 0 {
            return Err(not_found(shift_id));
        }
        unit_of_work.commit().await?;

        tracing::info!(shift_id = %shift_id, "shift deleted");
        Ok(())
    }

    /// Lists shifts of one user dated within `[from, to]`.
    ///
    /// Employees may list their own shifts.
    pub async fn list_for_user(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>> {
        if actor_id(actor) != user_id {
            self.authorization_service
                .require_capability(actor, Capability::ManageShifts)
                .await?;
        }

        if from > to {
            return Err(AppError::Validation(format!(
                "range start {from} must not be after range end {to}"
            )));
        }

        let mut shifts = self
            .store
            .find_shifts_by_user_and_date_range(user_id, from, to)
            .await?;
        shifts.sort_by_key(|shift| (shift.date(), shift.start_time()));
        Ok(shifts)
    }
}

pub(crate) async fn ensure_no_clash(
    unit_of_work: &mut dyn SchedulingUnitOfWork,
    shift: &ShiftAssignment,
) -> AppResult<()> {
    let Some(user_id) = shift.assigned_to() else {
        return Ok(());
    };

    let same_day = unit_of_work
        .find_shifts_by_user_and_date_range(user_id, shift.date(), shift.date())
        .await?;
    if let Some(existing) = same_day.iter().find(|other| shift.clashes_with(other)) {
        return Err(AppError::Conflict(format!(
            "shift overlaps shift '{}' of user '{user_id}' on {}",
            existing.id(),
            shift.date()
        )));
    }

    Ok(())
}

fn not_found(shift_id: ShiftId) -> AppError {
    AppError::NotFound(format!("shift '{shift_id}' does not exist"))
}
