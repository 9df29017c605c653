use async_trait::async_trait;
use chrono::NaiveDate;
use shiftdesk_core::AppResult;
use shiftdesk_domain::{
    LeaveId, LeaveRequest, ShiftAssignment, ShiftId, SwapId, SwapRequest, UserId,
};

use super::queries::LeaveListQuery;

/// Repository port for leave requests, shifts, and swap requests.
///
/// Reads on the store are outside any unit of work. Every mutation goes
/// through a [`SchedulingUnitOfWork`] obtained from [`SchedulingStore::begin`].
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    /// Opens a unit of work. Dropping it without commit discards its writes.
    async fn begin(&self) -> AppResult<Box<dyn SchedulingUnitOfWork>>;

    /// Finds one leave request.
    async fn find_leave_by_id(&self, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>>;

    /// Lists leave requests newest first.
    async fn list_leaves(&self, query: LeaveListQuery) -> AppResult<Vec<LeaveRequest>>;

    /// Lists shifts assigned to `user_id` dated within `[from, to]`.
    async fn find_shifts_by_user_and_date_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>>;

    /// Finds one shift.
    async fn find_shift_by_id(&self, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>>;

    /// Finds one swap request.
    async fn find_swap_by_id(&self, swap_id: SwapId) -> AppResult<Option<SwapRequest>>;
}

/// Transactional view over the scheduling store.
#[async_trait]
pub trait SchedulingUnitOfWork: Send {
    /// Finds one leave request inside the unit of work.
    async fn find_leave_by_id(&mut self, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>>;

    /// Inserts a new leave request.
    async fn insert_leave(&mut self, leave: &LeaveRequest) -> AppResult<()>;

    /// Persists `leave` only if the stored row is still pending.
    ///
    /// Returns `false` when another writer already moved the row on.
    async fn save_leave_if_pending(&mut self, leave: &LeaveRequest) -> AppResult<bool>;

    /// Deletes one leave request. Returns `false` when it did not exist.
    async fn delete_leave(&mut self, leave_id: LeaveId) -> AppResult<bool>;

    /// Lists shifts assigned to `user_id` dated within `[from, to]`.
    async fn find_shifts_by_user_and_date_range(
        &mut self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>>;

    /// Finds one shift inside the unit of work.
    async fn find_shift_by_id(&mut self, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>>;

    /// Inserts or replaces one shift.
    async fn save_shift(&mut self, shift: &ShiftAssignment) -> AppResult<()>;

    /// Deletes the listed shifts and returns how many existed.
    ///
    /// Unknown ids are ignored, so repeating a call is a no-op.
    async fn delete_shifts(&mut self, shift_ids: &[ShiftId]) -> AppResult<u64>;

    /// Assigns one shift to `user_id`. Returns `false` when the shift does
    /// not exist.
    async fn reassign_shift(&mut self, shift_id: ShiftId, user_id: UserId) -> AppResult<bool>;

    /// Finds one swap request inside the unit of work.
    async fn find_swap_by_id(&mut self, swap_id: SwapId) -> AppResult<Option<SwapRequest>>;

    /// Inserts a new swap request.
    async fn insert_swap(&mut self, swap: &SwapRequest) -> AppResult<()>;

    /// Persists `swap` only if the stored row is still pending.
    async fn save_swap_if_pending(&mut self, swap: &SwapRequest) -> AppResult<bool>;

    /// Makes every write of this unit of work visible atomically.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
