use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shiftdesk_application::{LeaveListQuery, SchedulingStore, SchedulingUnitOfWork};
use shiftdesk_core::AppResult;
use shiftdesk_domain::{
    LeaveId, LeaveRequest, LeaveStatus, ShiftAssignment, ShiftId, SwapId, SwapRequest, SwapStatus,
    UserId,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
struct SchedulingState {
    leaves: HashMap<LeaveId, LeaveRequest>,
    shifts: HashMap<ShiftId, ShiftAssignment>,
    swaps: HashMap<SwapId, SwapRequest>,
}

impl SchedulingState {
    fn shifts_in_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<ShiftAssignment> {
        let mut shifts: Vec<ShiftAssignment> = self
            .shifts
            .values()
            .filter(|shift| shift.assigned_to() == Some(user_id))
            .filter(|shift| from <= shift.date() && shift.date() <= to)
            .cloned()
            .collect();
        shifts.sort_by_key(|shift| (shift.date(), shift.start_time()));
        shifts
    }
}

/// In-memory scheduling store.
///
/// A unit of work holds the store lock for its whole lifetime and stages
/// writes on a copy that replaces the shared state on commit.
#[derive(Debug, Default)]
pub struct InMemorySchedulingStore {
    state: Arc<Mutex<SchedulingState>>,
}

impl InMemorySchedulingStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchedulingStore for InMemorySchedulingStore {
    async fn begin(&self) -> AppResult<Box<dyn SchedulingUnitOfWork>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork { guard, staged }))
    }

    async fn find_leave_by_id(&self, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>> {
        Ok(self.state.lock().await.leaves.get(&leave_id).cloned())
    }

    async fn list_leaves(&self, query: LeaveListQuery) -> AppResult<Vec<LeaveRequest>> {
        let state = self.state.lock().await;
        let mut leaves: Vec<LeaveRequest> = state
            .leaves
            .values()
            .filter(|leave| query.user_id.is_none_or(|user_id| leave.user_id() == user_id))
            .filter(|leave| query.status.is_none_or(|status| leave.status() == status))
            .cloned()
            .collect();
        leaves.sort_by_key(|leave| (Reverse(leave.created_at()), leave.id().as_uuid()));

        Ok(leaves
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn find_shifts_by_user_and_date_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>> {
        Ok(self.state.lock().await.shifts_in_range(user_id, from, to))
    }

    async fn find_shift_by_id(&self, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>> {
        Ok(self.state.lock().await.shifts.get(&shift_id).cloned())
    }

    async fn find_swap_by_id(&self, swap_id: SwapId) -> AppResult<Option<SwapRequest>> {
        Ok(self.state.lock().await.swaps.get(&swap_id).cloned())
    }
}

struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<SchedulingState>,
    staged: SchedulingState,
}

#[async_trait]
impl SchedulingUnitOfWork for InMemoryUnitOfWork {
    async fn find_leave_by_id(&mut self, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>> {
        Ok(self.staged.leaves.get(&leave_id).cloned())
    }

    async fn insert_leave(&mut self, leave: &LeaveRequest) -> AppResult<()> {
        self.staged.leaves.insert(leave.id(), leave.clone());
        Ok(())
    }

    async fn save_leave_if_pending(&mut self, leave: &LeaveRequest) -> AppResult<bool> {
        match self.staged.leaves.get_mut(&leave.id()) {
            Some(stored) if stored.status() == LeaveStatus::Pending => {
                *stored = leave.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_leave(&mut self, leave_id: LeaveId) -> AppResult<bool> {
        Ok(self.staged.leaves.remove(&leave_id).is_some())
    }

    async fn find_shifts_by_user_and_date_range(
        &mut self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>> {
        Ok(self.staged.shifts_in_range(user_id, from, to))
    }

    async fn find_shift_by_id(&mut self, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>> {
        Ok(self.staged.shifts.get(&shift_id).cloned())
    }

    async fn save_shift(&mut self, shift: &ShiftAssignment) -> AppResult<()> {
        self.staged.shifts.insert(shift.id(), shift.clone());
        Ok(())
    }

    async fn delete_shifts(&mut self, shift_ids: &[ShiftId]) -> AppResult<u64> {
        let mut removed = 0;
        for shift_id in shift_ids {
            if self.staged.shifts.remove(shift_id).is_some() {
                removed += 1;
            }
        }
        // Mirrors the swap_requests foreign keys, which cascade on shift deletion.
        self.staged.swaps.retain(|_, swap| {
            !shift_ids.contains(&swap.source_shift_id())
                && !shift_ids.contains(&swap.target_shift_id())
        });
        Ok(removed)
    }

    async fn reassign_shift(&mut self, shift_id: ShiftId, user_id: UserId) -> AppResult<bool> {
        let Some(shift) = self.staged.shifts.get_mut(&shift_id) else {
            return Ok(false);
        };

        shift.assign_to(Some(user_id));
        Ok(true)
    }

    async fn find_swap_by_id(&mut self, swap_id: SwapId) -> AppResult<Option<SwapRequest>> {
        Ok(self.staged.swaps.get(&swap_id).cloned())
    }

    async fn insert_swap(&mut self, swap: &SwapRequest) -> AppResult<()> {
        self.staged.swaps.insert(swap.id(), swap.clone());
        Ok(())
    }

    async fn save_swap_if_pending(&mut self, swap: &SwapRequest) -> AppResult<bool> {
        match self.staged.swaps.get_mut(&swap.id()) {
            Some(stored) if stored.status() == SwapStatus::Pending => {
                *stored = swap.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn commit(mut self: Box<Self>) -> AppResult<()> {
        *self.guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
