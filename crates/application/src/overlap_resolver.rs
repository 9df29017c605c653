use std::sync::Arc;

use shiftdesk_core::AppResult;
use shiftdesk_domain::{LeaveWindow, ShiftAssignment, UserId, overlapping_shifts};

use crate::scheduling_ports::{SchedulingStore, SchedulingUnitOfWork};

/// Finds the shifts of one employee that intersect a leave window.
///
/// Storage narrows candidates by calendar date; the strict interval test
/// runs in the domain layer.
#[derive(Clone)]
pub struct OverlapResolver {
    store: Arc<dyn SchedulingStore>,
}

impl OverlapResolver {
    /// Creates a resolver reading from the store outside any unit of work.
    #[must_use]
    pub fn new(store: Arc<dyn SchedulingStore>) -> Self {
        Self { store }
    }

    /// Returns the shifts of `user_id` overlapping `window`.
    pub async fn resolve(
        &self,
        user_id: UserId,
        window: &LeaveWindow,
    ) -> AppResult<Vec<ShiftAssignment>> {
        let candidates = self
            .store
            .find_shifts_by_user_and_date_range(user_id, window.first_day(), window.last_day())
            .await?;

        Ok(overlapping_shifts(window, candidates))
    }

    /// Same as [`OverlapResolver::resolve`], reading through an open unit of work.
    pub async fn resolve_in(
        unit_of_work: &mut dyn SchedulingUnitOfWork,
        user_id: UserId,
        window: &LeaveWindow,
    ) -> AppResult<Vec<ShiftAssignment>> {
        let candidates = unit_of_work
            .find_shifts_by_user_and_date_range(user_id, window.first_day(), window.last_day())
            .await?;

        Ok(overlapping_shifts(window, candidates))
    }
}
